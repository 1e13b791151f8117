#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Arena Survivors.

use std::{collections::VecDeque, time::Duration};

use arena_survivors_core::{
    ArenaSize, BuffKind, Command, Difficulty, EnemyArchetype, EnemyId, Event, Heading, Phase,
    PlayerClass, PlayerStats, SelectionError, SessionSummary, Strike, WorldPoint, ATTACK_COOLDOWN,
    ENEMY_RADIUS, EXPERIENCE_THRESHOLD_GROWTH, INITIAL_EXPERIENCE_THRESHOLD, PLAYER_RADIUS,
};

/// Represents the authoritative Arena Survivors session state.
#[derive(Debug)]
pub struct World {
    arena: ArenaSize,
    phase: Phase,
    difficulty: Difficulty,
    clock: Duration,
    kills: u32,
    player: Option<Player>,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    pending_offers: VecDeque<Vec<BuffKind>>,
    awaiting_offers: u32,
    summary: Option<SessionSummary>,
}

impl World {
    /// Creates a new world using the default arena, waiting in the start phase.
    #[must_use]
    pub fn new() -> Self {
        Self::with_arena(ArenaSize::DEFAULT)
    }

    /// Creates a new world for the provided arena dimensions.
    #[must_use]
    pub fn with_arena(arena: ArenaSize) -> Self {
        Self {
            arena,
            phase: Phase::Start,
            difficulty: Difficulty::default(),
            clock: Duration::ZERO,
            kills: 0,
            player: None,
            enemies: Vec::new(),
            next_enemy_id: 0,
            pending_offers: VecDeque::new(),
            awaiting_offers: 0,
            summary: None,
        }
    }

    fn reset_session(&mut self) {
        self.phase = Phase::Start;
        self.difficulty = Difficulty::default();
        self.clock = Duration::ZERO;
        self.kills = 0;
        self.player = None;
        self.enemies.clear();
        self.next_enemy_id = 0;
        self.pending_offers.clear();
        self.awaiting_offers = 0;
        self.summary = None;
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            self.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy)
    }

    fn strike(&mut self, strikes: Vec<Strike>, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        if strikes.is_empty() || !player.attack_ready(self.clock) {
            return;
        }

        for strike in strikes {
            let Some(enemy) = self.enemy_mut(strike.enemy) else {
                continue;
            };
            if enemy.health <= 0.0 {
                continue;
            }

            enemy.health -= strike.damage;
            let remaining_health = enemy.health;
            let archetype = enemy.archetype;
            let experience = enemy.experience;
            out_events.push(Event::EnemyStruck {
                enemy: strike.enemy,
                damage: strike.damage,
                critical: strike.critical,
                remaining_health,
            });

            if remaining_health <= 0.0 {
                self.kills = self.kills.saturating_add(1);
                out_events.push(Event::EnemyKilled {
                    enemy: strike.enemy,
                    archetype,
                    experience,
                });
                self.gain_experience(experience, out_events);
                self.heal_from_kill(out_events);
            }
        }

        if let Some(player) = self.player.as_mut() {
            player.last_attack = Some(self.clock);
        }
    }

    fn gain_experience(&mut self, experience: u32, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let amount = (f64::from(experience) * player.stats.experience_multiplier).floor() as u32;
        player.experience = player.experience.saturating_add(amount);
        let levelled_up = player.experience >= player.experience_threshold;
        if levelled_up {
            player.level = player.level.saturating_add(1);
            player.experience -= player.experience_threshold;
            player.experience_threshold = grow_threshold(player.experience_threshold);
        }
        let level = player.level;
        let experience_threshold = player.experience_threshold;
        out_events.push(Event::ExperienceGained {
            amount,
            experience: player.experience,
        });

        if levelled_up {
            tracing::info!(level, experience_threshold, "player levelled up");
            out_events.push(Event::LevelledUp {
                level,
                experience_threshold,
            });
            self.awaiting_offers = self.awaiting_offers.saturating_add(1);
            if self.phase == Phase::Playing {
                self.set_phase(Phase::LevelUp, out_events);
            }
        }
    }

    fn heal_from_kill(&mut self, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if player.stats.vampire_heal <= 0.0 {
            return;
        }

        let before = player.stats.health;
        player.stats.health = (before + player.stats.vampire_heal).min(player.stats.max_health);
        out_events.push(Event::PlayerHealed {
            amount: player.stats.health - before,
            health: player.stats.health,
        });
    }

    fn step_enemy(&mut self, enemy: EnemyId, heading: Heading, out_events: &mut Vec<Event>) {
        let Some(player_position) = self.player.as_ref().map(|player| player.position) else {
            return;
        };
        let Some(index) = self
            .enemies
            .iter()
            .position(|candidate| candidate.id == enemy)
        else {
            return;
        };

        let (damage, touching) = {
            let enemy = &mut self.enemies[index];
            enemy.position = enemy.position.advanced(heading, enemy.speed);
            out_events.push(Event::EnemyAdvanced {
                enemy: enemy.id,
                to: enemy.position,
            });
            let touching =
                enemy.position.distance(player_position) < ENEMY_RADIUS + PLAYER_RADIUS;
            if touching {
                enemy.health = 0.0;
            }
            (enemy.damage, touching)
        };

        if !touching {
            return;
        }

        let Some(player) = self.player.as_mut() else {
            return;
        };
        player.stats.health = (player.stats.health - damage).max(0.0);
        let health = player.stats.health;
        out_events.push(Event::PlayerHit {
            enemy,
            damage,
            health,
        });

        if health <= 0.0 && self.phase != Phase::GameOver {
            let summary = SessionSummary {
                elapsed: self.clock,
                kills: self.kills,
                level: player.level,
            };
            tracing::info!(
                elapsed_ms = summary.elapsed.as_millis() as u64,
                kills = summary.kills,
                level = summary.level,
                "player defeated"
            );
            self.summary = Some(summary);
            self.set_phase(Phase::GameOver, out_events);
            out_events.push(Event::GameOver { summary });
        }
    }

    fn offer_buffs(&mut self, buffs: Vec<BuffKind>, out_events: &mut Vec<Event>) {
        if self.awaiting_offers == 0 {
            tracing::debug!("ignoring buff offer without a pending level-up");
            return;
        }
        self.awaiting_offers -= 1;

        if buffs.is_empty() {
            tracing::debug!("empty buff offer, resuming play");
        } else {
            out_events.push(Event::BuffsOffered {
                buffs: buffs.clone(),
            });
            self.pending_offers.push_back(buffs);
        }
        self.resume_if_settled(out_events);
    }

    fn select_buff(&mut self, buff: BuffKind, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.validate_selection(buff) {
            tracing::warn!(buff = buff.id(), ?reason, "buff selection rejected");
            out_events.push(Event::BuffSelectionRejected { buff, reason });
            return;
        }

        let _ = self.pending_offers.pop_front();
        if let Some(player) = self.player.as_mut() {
            player.stats = buff.apply(player.stats);
        }
        out_events.push(Event::BuffApplied { buff });
        self.resume_if_settled(out_events);
    }

    fn validate_selection(&self, buff: BuffKind) -> Result<(), SelectionError> {
        if self.phase != Phase::LevelUp {
            return Err(SelectionError::NotAwaitingSelection);
        }
        let offer = self
            .pending_offers
            .front()
            .ok_or(SelectionError::NotAwaitingSelection)?;
        if offer.contains(&buff) {
            Ok(())
        } else {
            Err(SelectionError::NotOffered)
        }
    }

    fn resume_if_settled(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == Phase::LevelUp
            && self.pending_offers.is_empty()
            && self.awaiting_offers == 0
        {
            self.set_phase(Phase::Playing, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { class, difficulty } => {
            if world.phase != Phase::Start {
                tracing::warn!(phase = ?world.phase, "session already running");
                return;
            }
            world.reset_session();
            world.difficulty = difficulty;
            world.player = Some(Player::new(class, world.arena.center()));
            tracing::info!(class = class.id(), ?difficulty, "session started");
            out_events.push(Event::SessionStarted { class, difficulty });
            world.set_phase(Phase::Playing, out_events);
        }
        Command::Tick { dt } => {
            if world.phase != Phase::Playing {
                return;
            }
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { heading } => {
            let arena = world.arena;
            let Some(player) = world.player.as_mut() else {
                return;
            };
            let from = player.position;
            let moved = from.advanced(heading, player.stats.speed);
            player.position = arena.clamp(moved, PLAYER_RADIUS);
            if player.position != from {
                out_events.push(Event::PlayerMoved {
                    from,
                    to: player.position,
                });
            }
        }
        Command::StrikeEnemies { strikes } => world.strike(strikes, out_events),
        Command::StepEnemy { enemy, heading } => world.step_enemy(enemy, heading, out_events),
        Command::RemoveDefeatedEnemies => {
            if world.player.is_none() {
                return;
            }
            world.enemies.retain(|enemy| {
                if enemy.health <= 0.0 {
                    out_events.push(Event::EnemyRemoved { enemy: enemy.id });
                    false
                } else {
                    true
                }
            });
        }
        Command::SpawnEnemy {
            archetype,
            position,
        } => {
            if world.player.is_none() {
                return;
            }
            let id = EnemyId::new(world.next_enemy_id);
            world.next_enemy_id = world.next_enemy_id.saturating_add(1);
            world
                .enemies
                .push(Enemy::new(id, archetype, position, world.difficulty));
            out_events.push(Event::EnemySpawned {
                enemy: id,
                archetype,
                position,
            });
        }
        Command::OfferBuffs { buffs } => world.offer_buffs(buffs, out_events),
        Command::SelectBuff { buff } => world.select_buff(buff, out_events),
        Command::Restart => {
            world.reset_session();
            tracing::info!("session reset");
            out_events.push(Event::SessionReset);
            out_events.push(Event::PhaseChanged {
                phase: Phase::Start,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use arena_survivors_core::{
        ArenaSize, BuffKind, Difficulty, EnemySnapshot, EnemyView, Phase, PlayerSnapshot,
        SessionSummary, ATTACK_COOLDOWN, ENEMY_RADIUS, PLAYER_RADIUS,
    };

    /// Dimensions of the arena the session plays in.
    #[must_use]
    pub fn arena(world: &World) -> ArenaSize {
        world.arena
    }

    /// Currently active phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Difficulty preset of the running session.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Simulated time elapsed in the session.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock
    }

    /// Number of enemies killed by auto-attacks.
    #[must_use]
    pub fn kills(world: &World) -> u32 {
        world.kills
    }

    /// Captures the player, if a session is running.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        world.player.as_ref().map(|player| PlayerSnapshot {
            class: player.class,
            position: player.position,
            radius: PLAYER_RADIUS,
            stats: player.stats,
            level: player.level,
            experience: player.experience,
            experience_threshold: player.experience_threshold,
            last_attack: player.last_attack,
            attack_cooldown: ATTACK_COOLDOWN,
        })
    }

    /// Captures a read-only view of the enemies inside the arena.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    archetype: enemy.archetype,
                    position: enemy.position,
                    radius: ENEMY_RADIUS,
                    health: enemy.health,
                    max_health: enemy.max_health,
                    speed: enemy.speed,
                })
                .collect(),
        )
    }

    /// Buff offer awaiting a choice, if any.
    #[must_use]
    pub fn current_offer(world: &World) -> Option<&[BuffKind]> {
        world.pending_offers.front().map(Vec::as_slice)
    }

    /// Number of buff choices still owed to the player, including the current one.
    #[must_use]
    pub fn pending_selections(world: &World) -> usize {
        world.pending_offers.len() + world.awaiting_offers as usize
    }

    /// Final statistics once the player has been defeated.
    #[must_use]
    pub fn summary(world: &World) -> Option<SessionSummary> {
        world.summary
    }
}

#[derive(Clone, Debug)]
struct Player {
    class: PlayerClass,
    position: WorldPoint,
    stats: PlayerStats,
    level: u32,
    experience: u32,
    experience_threshold: u32,
    last_attack: Option<Duration>,
}

impl Player {
    fn new(class: PlayerClass, position: WorldPoint) -> Self {
        Self {
            class,
            position,
            stats: PlayerStats::from_template(class.template()),
            level: 1,
            experience: 0,
            experience_threshold: INITIAL_EXPERIENCE_THRESHOLD,
            last_attack: None,
        }
    }

    fn attack_ready(&self, clock: Duration) -> bool {
        self.last_attack
            .map_or(true, |last| clock.saturating_sub(last) >= ATTACK_COOLDOWN)
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    archetype: EnemyArchetype,
    position: WorldPoint,
    health: f32,
    max_health: f32,
    speed: f32,
    damage: f32,
    experience: u32,
}

impl Enemy {
    fn new(
        id: EnemyId,
        archetype: EnemyArchetype,
        position: WorldPoint,
        difficulty: Difficulty,
    ) -> Self {
        let stats = archetype.scaled_stats(difficulty);
        Self {
            id,
            archetype,
            position,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            experience: stats.experience,
        }
    }
}

fn grow_threshold(threshold: u32) -> u32 {
    (f64::from(threshold) * EXPERIENCE_THRESHOLD_GROWTH).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(class: PlayerClass) -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartSession {
                class,
                difficulty: Difficulty::Normal,
            },
            &mut events,
        );
        (world, events)
    }

    fn spawn_at(world: &mut World, archetype: EnemyArchetype, x: f32, y: f32) -> EnemyId {
        let position = WorldPoint::new(x, y);
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                archetype,
                position,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::EnemySpawned { enemy, .. }] => *enemy,
            other => panic!("unexpected spawn events: {other:?}"),
        }
    }

    fn tick(world: &mut World, millis: u64) {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
    }

    fn strike(world: &mut World, enemy: EnemyId, damage: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::StrikeEnemies {
                strikes: vec![Strike {
                    enemy,
                    damage,
                    critical: false,
                }],
            },
            &mut events,
        );
        events
    }

    #[test]
    fn start_session_places_player_at_arena_center() {
        let (world, events) = started(PlayerClass::Mage);

        let player = query::player(&world).expect("player");
        assert_eq!(player.position, WorldPoint::new(400.0, 300.0));
        assert_eq!(player.stats.health, 80.0);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience_threshold, 100);
        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(
            events.last(),
            Some(&Event::PhaseChanged {
                phase: Phase::Playing
            })
        );
    }

    #[test]
    fn tick_only_advances_while_playing() {
        let mut world = World::new();
        tick(&mut world, 16);
        assert_eq!(query::elapsed(&world), Duration::ZERO);

        let (mut world, _) = started(PlayerClass::Warrior);
        tick(&mut world, 16);
        assert_eq!(query::elapsed(&world), Duration::from_millis(16));
    }

    #[test]
    fn player_movement_is_clamped_to_arena() {
        let (mut world, _) = started(PlayerClass::Assassin);
        let mut events = Vec::new();
        for _ in 0..200 {
            apply(
                &mut world,
                Command::MovePlayer {
                    heading: Heading::new(-1.0, -1.0),
                },
                &mut events,
            );
        }
        let player = query::player(&world).expect("player");
        assert_eq!(player.position, WorldPoint::new(25.0, 25.0));
    }

    #[test]
    fn kill_awards_experience_and_credit() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let enemy = spawn_at(&mut world, EnemyArchetype::Normal, 400.0, 310.0);

        let events = strike(&mut world, enemy, 30.0);

        assert!(events.contains(&Event::EnemyKilled {
            enemy,
            archetype: EnemyArchetype::Normal,
            experience: 20,
        }));
        assert_eq!(query::kills(&world), 1);
        assert_eq!(query::player(&world).expect("player").experience, 20);
    }

    #[test]
    fn strikes_respect_cooldown() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let enemy = spawn_at(&mut world, EnemyArchetype::Tank, 400.0, 310.0);

        let _ = strike(&mut world, enemy, 15.0);
        tick(&mut world, 499);
        assert!(strike(&mut world, enemy, 15.0).is_empty());

        tick(&mut world, 1);
        assert!(!strike(&mut world, enemy, 15.0).is_empty());
    }

    #[test]
    fn large_gain_grants_single_level() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let mut events = Vec::new();
        world.gain_experience(200, &mut events);

        let player = query::player(&world).expect("player");
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 100);
        assert_eq!(player.experience_threshold, 120);
        assert_eq!(query::phase(&world), Phase::LevelUp);
    }

    #[test]
    fn contact_damages_player_and_destroys_enemy() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let enemy = spawn_at(&mut world, EnemyArchetype::Normal, 400.0, 300.0);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepEnemy {
                enemy,
                heading: Heading::ZERO,
            },
            &mut events,
        );
        apply(&mut world, Command::RemoveDefeatedEnemies, &mut events);

        assert_eq!(query::player(&world).expect("player").stats.health, 140.0);
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::kills(&world), 0);
    }

    #[test]
    fn lethal_contact_ends_session_once() {
        let (mut world, _) = started(PlayerClass::Mage);
        if let Some(player) = world.player.as_mut() {
            player.stats.health = 5.0;
        }
        let first = spawn_at(&mut world, EnemyArchetype::Tank, 400.0, 300.0);
        let second = spawn_at(&mut world, EnemyArchetype::Tank, 405.0, 300.0);
        let mut events = Vec::new();

        for enemy in [first, second] {
            apply(
                &mut world,
                Command::StepEnemy {
                    enemy,
                    heading: Heading::ZERO,
                },
                &mut events,
            );
        }

        let game_overs = events
            .iter()
            .filter(|event| matches!(event, Event::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(query::player(&world).expect("player").stats.health, 0.0);
        assert_eq!(query::phase(&world), Phase::GameOver);
        assert_eq!(
            query::summary(&world),
            Some(SessionSummary {
                elapsed: Duration::ZERO,
                kills: 0,
                level: 1,
            })
        );
    }

    #[test]
    fn selection_outside_offer_is_rejected() {
        let (mut world, _) = started(PlayerClass::Ranger);
        let mut events = Vec::new();
        world.gain_experience(100, &mut events);
        apply(
            &mut world,
            Command::OfferBuffs {
                buffs: vec![BuffKind::AttackUp, BuffKind::Vampire, BuffKind::SpeedUp],
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::SelectBuff {
                buff: BuffKind::MultiShot,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::BuffSelectionRejected {
                buff: BuffKind::MultiShot,
                reason: SelectionError::NotOffered,
            }]
        );
        assert_eq!(query::phase(&world), Phase::LevelUp);
    }

    #[test]
    fn selection_without_offer_is_rejected() {
        let (mut world, _) = started(PlayerClass::Ranger);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SelectBuff {
                buff: BuffKind::AttackUp,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::BuffSelectionRejected {
                buff: BuffKind::AttackUp,
                reason: SelectionError::NotAwaitingSelection,
            }]
        );
    }

    #[test]
    fn queued_offers_keep_session_paused_until_answered() {
        let (mut world, _) = started(PlayerClass::Ranger);
        let mut events = Vec::new();
        world.gain_experience(100, &mut events);
        world.gain_experience(120, &mut events);
        for buffs in [vec![BuffKind::AttackUp], vec![BuffKind::CritChance]] {
            apply(&mut world, Command::OfferBuffs { buffs }, &mut events);
        }
        assert_eq!(query::pending_selections(&world), 2);

        apply(
            &mut world,
            Command::SelectBuff {
                buff: BuffKind::AttackUp,
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), Phase::LevelUp);
        let offer = query::current_offer(&world).expect("queued offer");
        assert_eq!(offer, &[BuffKind::CritChance]);

        apply(
            &mut world,
            Command::SelectBuff {
                buff: BuffKind::CritChance,
            },
            &mut events,
        );
        let player = query::player(&world).expect("player");
        assert_eq!(player.stats.attack, 23.0);
        assert!((player.stats.crit_chance - 0.1).abs() < 1e-6);
        assert_eq!(query::phase(&world), Phase::Playing);
    }

    #[test]
    fn empty_offer_resumes_play() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let mut events = Vec::new();
        world.gain_experience(100, &mut events);
        let empty = Command::OfferBuffs { buffs: Vec::new() };
        apply(&mut world, empty, &mut events);
        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(query::current_offer(&world), None);
    }

    #[test]
    fn restart_discards_session_state() {
        let (mut world, _) = started(PlayerClass::Warrior);
        let _ = spawn_at(&mut world, EnemyArchetype::Fast, 0.0, 0.0);
        tick(&mut world, 100);
        let mut events = Vec::new();

        apply(&mut world, Command::Restart, &mut events);

        assert_eq!(query::phase(&world), Phase::Start);
        assert!(query::player(&world).is_none());
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::elapsed(&world), Duration::ZERO);
        assert_eq!(events[0], Event::SessionReset);
    }

    #[test]
    fn difficulty_scales_spawned_enemies() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartSession {
                class: PlayerClass::Warrior,
                difficulty: Difficulty::Nightmare,
            },
            &mut events,
        );
        let _ = spawn_at(&mut world, EnemyArchetype::Normal, 0.0, 0.0);
        let enemy = query::enemy_view(&world).into_vec()[0];
        assert_eq!(enemy.health, 60.0);
        assert_eq!(enemy.max_health, 60.0);
    }
}
