#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-threaded frame driver that sequences the Arena Survivors systems.

mod frame;

use std::time::Duration;

use arena_survivors_core::{
    ArenaSize, BuffKind, Command, Difficulty, Event, InputSnapshot, Phase, PlayerClass,
};
use arena_survivors_rendering::{Frame, FrameInput};
use arena_survivors_system_combat::Combat;
use arena_survivors_system_movement::Movement;
use arena_survivors_system_progression::Progression;
use arena_survivors_system_spawning::{self as spawning, Spawning};
use arena_survivors_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Configuration required to construct a simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    arena: ArenaSize,
    difficulty: Difficulty,
    seed: u64,
}

impl Config {
    /// Creates a configuration for the provided arena, difficulty and seed.
    #[must_use]
    pub const fn new(arena: ArenaSize, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            arena,
            difficulty,
            seed,
        }
    }

    /// Arena every session is played in.
    #[must_use]
    pub const fn arena(&self) -> ArenaSize {
        self.arena
    }

    /// Difficulty applied to sessions started by class selection.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Seed of the random number generator shared by all systems.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(ArenaSize::DEFAULT, Difficulty::default(), 0)
    }
}

/// Errors returned by inbound session calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Classes and difficulties can only be chosen on the start screen.
    #[error("a session can only be configured on the start screen (current phase: {0:?})")]
    NotInStartPhase(Phase),
    /// No buff offer is waiting for an answer.
    #[error("no buff offer is pending")]
    NoPendingOffer,
    /// The chosen buff is not part of the current offer.
    #[error("buff '{}' is not part of the current offer", .0.id())]
    BuffNotOffered(BuffKind),
    /// The chosen offer slot does not exist.
    #[error("offer slot {index} is out of range for an offer of {len}")]
    ChoiceOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of buffs in the current offer.
        len: usize,
    },
}

/// Owns the world, the systems and the random number generator of a game.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    world: World,
    movement: Movement,
    combat: Combat,
    spawning: Spawning,
    progression: Progression,
    rng: ChaCha8Rng,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation sitting on the start screen.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            world: World::with_arena(config.arena),
            movement: Movement::default(),
            combat: Combat::new(),
            spawning: Spawning::new(spawning::Config::for_arena(config.arena)),
            progression: Progression::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events produced by the most recent call that changed the world.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Difficulty the next session will be started with.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Changes the difficulty used by the next session.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.ensure_start_phase()?;
        self.config.difficulty = difficulty;
        Ok(())
    }

    /// Starts a session with the chosen class.
    pub fn select_class(&mut self, class: PlayerClass) -> Result<(), SessionError> {
        self.ensure_start_phase()?;
        self.events.clear();
        self.spawning = Spawning::new(spawning::Config::for_arena(self.config.arena));
        self.combat = Combat::new();
        self.commands.push(Command::StartSession {
            class,
            difficulty: self.config.difficulty,
        });
        self.flush();
        Ok(())
    }

    /// Answers the current offer with the buff in slot `index`.
    pub fn choose_buff(&mut self, index: usize) -> Result<(), SessionError> {
        let offer = self.pending_offer()?;
        let buff = offer
            .get(index)
            .copied()
            .ok_or(SessionError::ChoiceOutOfRange {
                index,
                len: offer.len(),
            })?;
        self.select_buff(buff)
    }

    /// Answers the current offer with the provided buff.
    pub fn select_buff(&mut self, buff: BuffKind) -> Result<(), SessionError> {
        if !self.pending_offer()?.contains(&buff) {
            return Err(SessionError::BuffNotOffered(buff));
        }
        self.events.clear();
        self.commands.push(Command::SelectBuff { buff });
        self.flush();
        Ok(())
    }

    /// Discards the session and returns to the start screen.
    pub fn restart(&mut self) {
        self.events.clear();
        self.commands.push(Command::Restart);
        self.flush();
        self.spawning = Spawning::new(spawning::Config::for_arena(self.config.arena));
        self.combat = Combat::new();
    }

    /// Applies the inbound choices captured by an adapter, then advances.
    ///
    /// Choices that do not fit the current screen are ignored.
    pub fn handle_input(&mut self, dt: Duration, input: FrameInput) -> Frame {
        if let Some(class) = input.class_choice {
            if let Err(error) = self.select_class(class) {
                tracing::debug!(%error, "ignoring class choice");
            }
        }
        if let Some(index) = input.buff_choice {
            if let Err(error) = self.choose_buff(index) {
                tracing::debug!(%error, "ignoring buff choice");
            }
        }
        if input.restart {
            self.restart();
        }

        self.advance(dt, &input.movement)
    }

    /// Advances the session by `dt` and returns the frame to present.
    ///
    /// Only a frame that begins in the playing phase is simulated, and it runs
    /// to completion even if a level-up or defeat happens part way through.
    pub fn advance(&mut self, dt: Duration, input: &InputSnapshot) -> Frame {
        if query::phase(&self.world).is_simulating() {
            self.events.clear();
            self.step(dt, input);
        }
        frame::build(&self.world)
    }

    fn step(&mut self, dt: Duration, input: &InputSnapshot) {
        self.commands.push(Command::Tick { dt });
        self.movement.steer(input, &mut self.commands);
        self.flush();

        if let Some(player) = query::player(&self.world) {
            let enemies = query::enemy_view(&self.world);
            self.combat.handle(
                query::elapsed(&self.world),
                &player,
                &enemies,
                &mut self.rng,
                &mut self.commands,
            );
            let first_new_event = self.events.len();
            self.flush();
            self.progression.handle(
                &self.events[first_new_event..],
                &mut self.rng,
                &mut self.commands,
            );
            self.flush();

            let target = player.position;
            let enemies = query::enemy_view(&self.world);
            self.movement.chase(target, &enemies, &mut self.commands);
            self.flush();
        }

        self.commands.push(Command::RemoveDefeatedEnemies);
        self.spawning.handle(
            query::elapsed(&self.world),
            &mut self.rng,
            &mut self.commands,
        );
        self.flush();
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn ensure_start_phase(&self) -> Result<(), SessionError> {
        match query::phase(&self.world) {
            Phase::Start => Ok(()),
            phase => Err(SessionError::NotInStartPhase(phase)),
        }
    }

    fn pending_offer(&self) -> Result<&[BuffKind], SessionError> {
        if query::phase(&self.world) != Phase::LevelUp {
            return Err(SessionError::NoPendingOffer);
        }
        query::current_offer(&self.world).ok_or(SessionError::NoPendingOffer)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
