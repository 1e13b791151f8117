#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-driven spawning system responsible for emitting enemy wave commands.

use std::time::Duration;

use arena_survivors_core::{ArenaSize, Command, EnemyArchetype, WorldPoint};
use rand::Rng;

const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_millis(2000);
const DEFAULT_MINIMUM_INTERVAL: Duration = Duration::from_millis(1000);
const DEFAULT_INTERVAL_STEP: Duration = Duration::from_millis(50);
const DEFAULT_RAMP_PERIOD: Duration = Duration::from_secs(30);
const DEFAULT_BASE_COUNT: u32 = 3;
const DEFAULT_EDGE_MARGIN: f32 = 20.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    initial_interval: Duration,
    minimum_interval: Duration,
    interval_step: Duration,
    ramp_period: Duration,
    base_count: u32,
    edge_margin: f32,
    arena: ArenaSize,
}

impl Config {
    /// Creates a new configuration using the provided wave cadence.
    ///
    /// `interval_step` is subtracted from `initial_interval` once per elapsed
    /// `ramp_period`, never dropping below `minimum_interval`.
    #[must_use]
    pub const fn new(
        initial_interval: Duration,
        minimum_interval: Duration,
        interval_step: Duration,
        ramp_period: Duration,
        base_count: u32,
        edge_margin: f32,
        arena: ArenaSize,
    ) -> Self {
        Self {
            initial_interval,
            minimum_interval,
            interval_step,
            ramp_period,
            base_count,
            edge_margin,
            arena,
        }
    }

    /// Default wave cadence for the provided arena.
    #[must_use]
    pub const fn for_arena(arena: ArenaSize) -> Self {
        Self::new(
            DEFAULT_INITIAL_INTERVAL,
            DEFAULT_MINIMUM_INTERVAL,
            DEFAULT_INTERVAL_STEP,
            DEFAULT_RAMP_PERIOD,
            DEFAULT_BASE_COUNT,
            DEFAULT_EDGE_MARGIN,
            arena,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_arena(ArenaSize::DEFAULT)
    }
}

/// Pure system that emits enemy waves from the arena edges.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    last_spawn: Duration,
    interval: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            last_spawn: Duration::ZERO,
            interval: config.initial_interval,
        }
    }

    /// Interval that must elapse before the next wave.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Session time at which the previous wave spawned.
    #[must_use]
    pub fn last_spawn(&self) -> Duration {
        self.last_spawn
    }

    /// Emits a wave of `Command::SpawnEnemy` entries when the interval elapsed.
    ///
    /// The wave grows by one enemy for every two ramp periods survived, and the
    /// interval shrinks by one step per ramp period down to the minimum.
    pub fn handle<R: Rng>(&mut self, elapsed: Duration, rng: &mut R, out: &mut Vec<Command>) {
        if elapsed.saturating_sub(self.last_spawn) < self.interval {
            return;
        }

        let time_factor = self.time_factor(elapsed);
        let count = self.config.base_count.saturating_add(time_factor / 2);
        out.reserve(count as usize);
        for _ in 0..count {
            let position = self.edge_position(rng);
            let archetype = archetype_for_roll(rng.gen::<f32>());
            out.push(Command::SpawnEnemy {
                archetype,
                position,
            });
        }

        self.last_spawn = elapsed;
        let next = self
            .config
            .initial_interval
            .saturating_sub(self.config.interval_step.saturating_mul(time_factor))
            .max(self.config.minimum_interval);
        self.interval = self.interval.min(next);
    }

    fn time_factor(&self, elapsed: Duration) -> u32 {
        let period = self.config.ramp_period.as_millis();
        if period == 0 {
            return 0;
        }
        u32::try_from(elapsed.as_millis() / period).unwrap_or(u32::MAX)
    }

    fn edge_position<R: Rng>(&self, rng: &mut R) -> WorldPoint {
        let arena = self.config.arena;
        let margin = self.config.edge_margin;
        let edge = rng.gen_range(0..4);
        let along = rng.gen::<f32>();
        match edge {
            0 => WorldPoint::new(along * arena.width(), -margin),
            1 => WorldPoint::new(arena.width() + margin, along * arena.height()),
            2 => WorldPoint::new(along * arena.width(), arena.height() + margin),
            _ => WorldPoint::new(-margin, along * arena.height()),
        }
    }
}

/// Maps a uniform roll in `[0, 1)` to an archetype.
///
/// Both thresholds test the same roll: above 0.7 is fast, and above 0.85 the
/// second test overrides it to tank.
#[must_use]
pub fn archetype_for_roll(roll: f32) -> EnemyArchetype {
    let mut archetype = EnemyArchetype::Normal;
    if roll > 0.7 {
        archetype = EnemyArchetype::Fast;
    }
    if roll > 0.85 {
        archetype = EnemyArchetype::Tank;
    }
    archetype
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_thresholds_are_exclusive() {
        assert_eq!(archetype_for_roll(0.0), EnemyArchetype::Normal);
        assert_eq!(archetype_for_roll(0.7), EnemyArchetype::Normal);
        assert_eq!(archetype_for_roll(0.75), EnemyArchetype::Fast);
        assert_eq!(archetype_for_roll(0.85), EnemyArchetype::Fast);
        assert_eq!(archetype_for_roll(0.9), EnemyArchetype::Tank);
    }

    #[test]
    fn time_factor_counts_whole_ramp_periods() {
        let spawning = Spawning::new(Config::default());
        assert_eq!(spawning.time_factor(Duration::from_millis(29_999)), 0);
        assert_eq!(spawning.time_factor(Duration::from_secs(30)), 1);
        assert_eq!(spawning.time_factor(Duration::from_secs(95)), 3);
    }
}
