#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arena Survivors engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The simulation driver submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and adapters react to. Systems consume event streams and
//! immutable snapshots, and respond exclusively with new command batches.
//!
//! The static configuration tables (arena size, class templates, enemy
//! archetypes, difficulty presets and the buff catalog) also live here so every
//! crate agrees on the same numbers.

mod buff;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use buff::BuffKind;

/// Title shown by adapters when the game boots.
pub const WINDOW_TITLE: &str = "Arena Survivors";

/// Collision radius of the player measured in world units.
pub const PLAYER_RADIUS: f32 = 25.0;

/// Collision radius shared by every enemy archetype.
pub const ENEMY_RADIUS: f32 = 18.0;

/// Minimum simulated time between two player auto-attacks.
pub const ATTACK_COOLDOWN: Duration = Duration::from_millis(500);

/// Scalar applied to both axes when the player moves diagonally.
pub const DIAGONAL_FACTOR: f32 = 0.707;

/// Experience required to advance from level one to level two.
pub const INITIAL_EXPERIENCE_THRESHOLD: u32 = 100;

/// Multiplicative growth applied to the experience threshold on level-up.
pub const EXPERIENCE_THRESHOLD_GROWTH: f64 = 1.2;

/// Number of buffs offered whenever the player levels up.
pub const BUFF_OFFER_SIZE: usize = 3;

/// Top-level state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No session is running; the game waits for a class selection.
    #[default]
    Start,
    /// The simulation advances every frame.
    Playing,
    /// Simulation is paused until the player picks a buff.
    LevelUp,
    /// The player died; the session waits for a restart.
    GameOver,
}

impl Phase {
    /// Reports whether the simulation advances while this phase is active.
    #[must_use]
    pub const fn is_simulating(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Dimensions of the rectangular arena measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    width: f32,
    height: f32,
}

impl ArenaSize {
    /// Arena dimensions used when no override is configured.
    pub const DEFAULT: Self = Self::new(800.0, 600.0);

    /// Creates a new arena description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent of the arena.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the arena.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Point located in the middle of the arena.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps the point so a body of the given radius stays inside the arena.
    ///
    /// Both axes are limited to `[margin, extent - margin]`. When the arena is
    /// narrower than twice the margin the lower bound wins.
    #[must_use]
    pub fn clamp(&self, point: WorldPoint, margin: f32) -> WorldPoint {
        WorldPoint::new(
            point.x.min(self.width - margin).max(margin),
            point.y.min(self.height - margin).max(margin),
        )
    }
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Location within the arena expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns the point displaced along the heading by `scale` units.
    #[must_use]
    pub fn advanced(self, heading: Heading, scale: f32) -> WorldPoint {
        WorldPoint::new(self.x + heading.x * scale, self.y + heading.y * scale)
    }

    /// Unit heading pointing from this point toward `target`.
    ///
    /// Coincident points yield [`Heading::ZERO`] so callers never divide by a
    /// zero distance.
    #[must_use]
    pub fn heading_to(self, target: WorldPoint) -> Heading {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let distance = dx.hypot(dy);
        if distance > 0.0 {
            Heading::new(dx / distance, dy / distance)
        } else {
            Heading::ZERO
        }
    }
}

/// Direction of travel applied to an entity before scaling by its speed.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading {
    x: f32,
    y: f32,
}

impl Heading {
    /// Heading that leaves the entity in place.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a heading from raw components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Reports whether the heading leaves the entity stationary.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Snapshot of the directional keys held during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct InputSnapshot {
    /// Move toward decreasing x.
    pub left: bool,
    /// Move toward increasing x.
    pub right: bool,
    /// Move toward decreasing y.
    pub up: bool,
    /// Move toward increasing y.
    pub down: bool,
}

/// Opaque RGB color attached to classes and enemy archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Playable character classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    /// Sturdy melee fighter.
    Warrior,
    /// Fragile caster with long reach.
    Mage,
    /// Fast, short-ranged striker.
    Assassin,
    /// Archer with the longest reach.
    Ranger,
}

impl PlayerClass {
    /// Every selectable class in presentation order.
    pub const ALL: [PlayerClass; 4] = [Self::Warrior, Self::Mage, Self::Assassin, Self::Ranger];

    /// Stable lowercase identifier of the class.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Assassin => "assassin",
            Self::Ranger => "ranger",
        }
    }

    /// Starting statistics for the class.
    #[must_use]
    pub const fn template(self) -> ClassTemplate {
        match self {
            Self::Warrior => ClassTemplate {
                health: 150.0,
                attack: 15.0,
                speed: 3.0,
                attack_range: 50.0,
                color: EntityColor::from_rgb(0xff, 0x6b, 0x6b),
            },
            Self::Mage => ClassTemplate {
                health: 80.0,
                attack: 25.0,
                speed: 3.5,
                attack_range: 150.0,
                color: EntityColor::from_rgb(0x4e, 0xcd, 0xc4),
            },
            Self::Assassin => ClassTemplate {
                health: 100.0,
                attack: 20.0,
                speed: 5.0,
                attack_range: 45.0,
                color: EntityColor::from_rgb(0x95, 0xe1, 0xd3),
            },
            Self::Ranger => ClassTemplate {
                health: 110.0,
                attack: 18.0,
                speed: 4.0,
                attack_range: 200.0,
                color: EntityColor::from_rgb(0xf3, 0x81, 0x81),
            },
        }
    }
}

/// Starting statistics shared by every player of a class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassTemplate {
    /// Starting and maximum health.
    pub health: f32,
    /// Damage dealt per hit.
    pub attack: f32,
    /// Distance travelled per frame while a direction is held.
    pub speed: f32,
    /// Maximum distance at which enemies are auto-targeted.
    pub attack_range: f32,
    /// Color used to draw the player.
    pub color: EntityColor,
}

/// Mutable statistics of the player that buffs transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStats {
    /// Current health, kept within `[0, max_health]`.
    pub health: f32,
    /// Upper bound for `health`.
    pub max_health: f32,
    /// Damage dealt per hit before critical multipliers.
    pub attack: f32,
    /// Distance travelled per frame.
    pub speed: f32,
    /// Maximum auto-target distance.
    pub attack_range: f32,
    /// Probability that a hit deals double damage.
    pub crit_chance: f32,
    /// Scalar applied to every experience gain.
    pub experience_multiplier: f64,
    /// Flat health restored per enemy killed in combat.
    pub vampire_heal: f32,
    /// Number of enemies struck per attack.
    pub multi_shot: u32,
}

impl PlayerStats {
    /// Builds the initial statistics for the provided class.
    #[must_use]
    pub fn from_template(template: ClassTemplate) -> Self {
        Self {
            health: template.health,
            max_health: template.health,
            attack: template.attack,
            speed: template.speed,
            attack_range: template.attack_range,
            crit_chance: 0.0,
            experience_multiplier: 1.0,
            vampire_heal: 0.0,
            multi_shot: 1,
        }
    }
}

/// Hostile unit templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Baseline enemy.
    Normal,
    /// Quick but fragile enemy.
    Fast,
    /// Slow enemy with high health.
    Tank,
}

impl EnemyArchetype {
    /// Every archetype in declaration order.
    pub const ALL: [EnemyArchetype; 3] = [Self::Normal, Self::Fast, Self::Tank];

    /// Stable lowercase identifier of the archetype.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Tank => "tank",
        }
    }

    /// Unscaled statistics of the archetype.
    #[must_use]
    pub const fn stats(self) -> ArchetypeStats {
        match self {
            Self::Normal => ArchetypeStats {
                health: 30.0,
                speed: 1.5,
                damage: 10.0,
                experience: 20,
                color: EntityColor::from_rgb(0xff, 0x47, 0x57),
            },
            Self::Fast => ArchetypeStats {
                health: 20.0,
                speed: 3.0,
                damage: 8.0,
                experience: 15,
                color: EntityColor::from_rgb(0xff, 0xa5, 0x02),
            },
            Self::Tank => ArchetypeStats {
                health: 60.0,
                speed: 1.0,
                damage: 15.0,
                experience: 30,
                color: EntityColor::from_rgb(0x2e, 0xd5, 0x73),
            },
        }
    }

    /// Statistics of the archetype after applying difficulty modifiers.
    #[must_use]
    pub fn scaled_stats(self, difficulty: Difficulty) -> ArchetypeStats {
        let base = self.stats();
        let modifiers = difficulty.modifiers();
        ArchetypeStats {
            health: base.health * modifiers.enemy_health,
            damage: base.damage * modifiers.enemy_damage,
            experience: (f64::from(base.experience) * modifiers.experience).floor() as u32,
            ..base
        }
    }
}

/// Statistics describing a single enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeStats {
    /// Starting and maximum health.
    pub health: f32,
    /// Distance travelled per frame toward the player.
    pub speed: f32,
    /// Health removed from the player on contact.
    pub damage: f32,
    /// Experience awarded when killed in combat.
    pub experience: u32,
    /// Color used to draw the enemy.
    pub color: EntityColor,
}

/// Difficulty presets that scale enemy strength and rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Weaker enemies, bonus experience.
    Easy,
    /// Archetype statistics as listed.
    #[default]
    Normal,
    /// Tougher enemies, bonus experience.
    Hard,
    /// Twice as tough, half again the experience.
    Nightmare,
}

impl Difficulty {
    /// Multipliers applied by the preset.
    #[must_use]
    pub const fn modifiers(self) -> DifficultyModifiers {
        match self {
            Self::Easy => DifficultyModifiers {
                enemy_health: 0.7,
                enemy_damage: 0.7,
                experience: 1.2,
            },
            Self::Normal => DifficultyModifiers {
                enemy_health: 1.0,
                enemy_damage: 1.0,
                experience: 1.0,
            },
            Self::Hard => DifficultyModifiers {
                enemy_health: 1.5,
                enemy_damage: 1.5,
                experience: 1.3,
            },
            Self::Nightmare => DifficultyModifiers {
                enemy_health: 2.0,
                enemy_damage: 2.0,
                experience: 1.5,
            },
        }
    }
}

/// Multipliers contributed by a [`Difficulty`] preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyModifiers {
    /// Scalar applied to enemy health.
    pub enemy_health: f32,
    /// Scalar applied to enemy contact damage.
    pub enemy_damage: f32,
    /// Scalar applied to experience rewards.
    pub experience: f64,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Single hit resolved by the combat system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    /// Enemy receiving the hit.
    pub enemy: EnemyId,
    /// Health removed from the enemy.
    pub damage: f32,
    /// Whether the critical roll succeeded.
    pub critical: bool,
}

/// Final statistics of a session that ended in defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Simulated time survived.
    pub elapsed: Duration,
    /// Enemies killed in combat.
    pub kills: u32,
    /// Level reached.
    pub level: u32,
}

/// Reasons a buff selection may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionError {
    /// The session is not waiting for a buff choice.
    NotAwaitingSelection,
    /// The buff is not part of the current offer.
    NotOffered,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a new session with the chosen class.
    StartSession {
        /// Class template used for the player.
        class: PlayerClass,
        /// Preset scaling spawned enemies.
        difficulty: Difficulty,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player along the heading scaled by its speed.
    MovePlayer {
        /// Direction composed from the held keys.
        heading: Heading,
    },
    /// Applies an auto-attack volley.
    StrikeEnemies {
        /// Hits in target order.
        strikes: Vec<Strike>,
    },
    /// Moves an enemy along the heading scaled by its speed and resolves contact.
    StepEnemy {
        /// Enemy that moves.
        enemy: EnemyId,
        /// Unit direction toward the player.
        heading: Heading,
    },
    /// Drops every enemy whose health reached zero.
    RemoveDefeatedEnemies,
    /// Adds a new enemy to the arena.
    SpawnEnemy {
        /// Template of the new enemy.
        archetype: EnemyArchetype,
        /// Initial position.
        position: WorldPoint,
    },
    /// Attaches a buff offer to the oldest unanswered level-up.
    OfferBuffs {
        /// Buffs the player may choose from.
        buffs: Vec<BuffKind>,
    },
    /// Applies the chosen buff from the current offer.
    SelectBuff {
        /// Buff picked by the player.
        buff: BuffKind,
    },
    /// Discards the session and returns to the start phase.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A session started with a fresh player.
    SessionStarted {
        /// Selected class.
        class: PlayerClass,
        /// Selected difficulty.
        difficulty: Difficulty,
    },
    /// The session phase changed.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// The session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The player changed position.
    PlayerMoved {
        /// Position before the move.
        from: WorldPoint,
        /// Position after movement and clamping.
        to: WorldPoint,
    },
    /// An enemy took damage from an auto-attack.
    EnemyStruck {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Damage dealt.
        damage: f32,
        /// Whether the hit was critical.
        critical: bool,
        /// Health left after the hit.
        remaining_health: f32,
    },
    /// An enemy died to an auto-attack.
    EnemyKilled {
        /// Enemy that died.
        enemy: EnemyId,
        /// Template of the enemy.
        archetype: EnemyArchetype,
        /// Experience value of the enemy before the multiplier.
        experience: u32,
    },
    /// The player recovered health from a kill.
    PlayerHealed {
        /// Health restored after capping.
        amount: f32,
        /// Health after healing.
        health: f32,
    },
    /// The player gained experience.
    ExperienceGained {
        /// Experience added after the multiplier.
        amount: u32,
        /// Experience total after the gain (and any level-up carry-over).
        experience: u32,
    },
    /// The player reached a new level.
    LevelledUp {
        /// New level.
        level: u32,
        /// Experience required for the next level.
        experience_threshold: u32,
    },
    /// A set of buffs is waiting for a choice.
    BuffsOffered {
        /// Buffs on offer.
        buffs: Vec<BuffKind>,
    },
    /// A buff was applied to the player.
    BuffApplied {
        /// Applied buff.
        buff: BuffKind,
    },
    /// A buff selection was refused.
    BuffSelectionRejected {
        /// Requested buff.
        buff: BuffKind,
        /// Specific reason the selection failed.
        reason: SelectionError,
    },
    /// A new enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned by the world.
        enemy: EnemyId,
        /// Template of the enemy.
        archetype: EnemyArchetype,
        /// Initial position.
        position: WorldPoint,
    },
    /// An enemy moved toward the player.
    EnemyAdvanced {
        /// Enemy that moved.
        enemy: EnemyId,
        /// Position after the step.
        to: WorldPoint,
    },
    /// An enemy collided with the player and self-destructed.
    PlayerHit {
        /// Enemy that collided.
        enemy: EnemyId,
        /// Damage inflicted.
        damage: f32,
        /// Player health after the hit.
        health: f32,
    },
    /// A defeated enemy was removed from the arena.
    EnemyRemoved {
        /// Removed enemy.
        enemy: EnemyId,
    },
    /// The player died.
    GameOver {
        /// Final statistics of the session.
        summary: SessionSummary,
    },
    /// The session was discarded.
    SessionReset,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Class of the player.
    pub class: PlayerClass,
    /// Current position.
    pub position: WorldPoint,
    /// Collision radius.
    pub radius: f32,
    /// Current statistics.
    pub stats: PlayerStats,
    /// Current level.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub experience_threshold: u32,
    /// Session time of the last attack that found a target.
    pub last_attack: Option<Duration>,
    /// Minimum time between attacks.
    pub attack_cooldown: Duration,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Template of the enemy.
    pub archetype: EnemyArchetype,
    /// Current position.
    pub position: WorldPoint,
    /// Collision radius.
    pub radius: f32,
    /// Current health.
    pub health: f32,
    /// Starting health.
    pub max_health: f32,
    /// Distance travelled per frame.
    pub speed: f32,
}

/// Read-only snapshot describing all enemies in the arena.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which matches spawn order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArenaSize, BuffKind, Difficulty, EnemyArchetype, EnemyId, Heading, PlayerClass,
        SelectionError, WorldPoint,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn enemy_id_round_trips_through_bincode() {
        assert_round_trip(&EnemyId::new(42));
    }

    #[test]
    fn catalog_enums_round_trip_through_bincode() {
        for class in PlayerClass::ALL {
            assert_round_trip(&class);
        }
        for buff in BuffKind::ALL {
            assert_round_trip(&buff);
        }
        assert_round_trip(&Difficulty::Nightmare);
        assert_round_trip(&SelectionError::NotOffered);
    }

    #[test]
    fn clamp_keeps_body_inside_arena() {
        let arena = ArenaSize::DEFAULT;
        let clamped = arena.clamp(WorldPoint::new(-40.0, 900.0), 25.0);
        assert_eq!(clamped, WorldPoint::new(25.0, 575.0));

        let inside = WorldPoint::new(400.0, 300.0);
        assert_eq!(arena.clamp(inside, 25.0), inside);
    }

    #[test]
    fn heading_to_coincident_point_is_zero() {
        let point = WorldPoint::new(10.0, 10.0);
        assert_eq!(point.heading_to(point), Heading::ZERO);
    }

    #[test]
    fn heading_to_is_unit_length() {
        let heading = WorldPoint::new(0.0, 0.0).heading_to(WorldPoint::new(3.0, 4.0));
        assert!((heading.x() - 0.6).abs() < 1e-6);
        assert!((heading.y() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn warrior_template_matches_class_table() {
        let template = PlayerClass::Warrior.template();
        assert_eq!(template.health, 150.0);
        assert_eq!(template.attack, 15.0);
        assert_eq!(template.speed, 3.0);
    }

    #[test]
    fn normal_difficulty_leaves_archetypes_untouched() {
        for archetype in EnemyArchetype::ALL {
            let scaled = archetype.scaled_stats(Difficulty::Normal);
            assert_eq!(scaled, archetype.stats());
        }
    }

    #[test]
    fn hard_difficulty_scales_enemy_stats() {
        let scaled = EnemyArchetype::Fast.scaled_stats(Difficulty::Hard);
        assert_eq!(scaled.health, 30.0);
        assert_eq!(scaled.damage, 12.0);
        assert_eq!(scaled.experience, 19);
        assert_eq!(scaled.speed, EnemyArchetype::Fast.stats().speed);
    }
}
