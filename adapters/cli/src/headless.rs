//! Window-less runs driven by a scripted input pattern.

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use arena_survivors_core::{Difficulty, InputSnapshot, Phase, PlayerClass};
use arena_survivors_rendering::Screen;
use arena_survivors_simulation::{Config, Simulation};
use arena_survivors_world::query;
use serde::Serialize;

/// Frames spent walking in one direction before turning.
const FRAMES_PER_LEG: u32 = 90;

/// Outcome of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct RunReport {
    class: PlayerClass,
    difficulty: Difficulty,
    seed: u64,
    frames: u32,
    elapsed_seconds: f64,
    kills: u32,
    level: u32,
    health: f32,
    buffs_taken: u32,
    game_over: bool,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.game_over { "defeated" } else { "alive" };
        write!(f, "{} on {:?}", self.class.id(), self.difficulty)?;
        write!(f, " (seed {}): {outcome}", self.seed)?;
        write!(f, " after {:.1}s", self.elapsed_seconds)?;
        write!(f, " over {} frames", self.frames)?;
        write!(f, ", level {}, {} kills", self.level, self.kills)?;
        write!(f, ", {} buffs", self.buffs_taken)?;
        write!(f, ", {:.0} health", self.health)
    }
}

/// Walks the player around the arena centre in a square.
fn scripted_input(frame: u32) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    match (frame / FRAMES_PER_LEG) % 4 {
        0 => input.right = true,
        1 => input.down = true,
        2 => input.left = true,
        _ => input.up = true,
    }
    input
}

/// Plays up to `frames` frames, always taking the first offered buff.
///
/// The run stops early when the player is defeated.
pub(crate) fn run(
    config: Config,
    class: PlayerClass,
    frames: u32,
    frame: Duration,
) -> Result<RunReport> {
    let mut simulation = Simulation::new(config);
    simulation
        .select_class(class)
        .context("failed to start headless session")?;
    tracing::info!(class = class.id(), frames, "starting headless run");

    let mut played = 0;
    let mut buffs_taken = 0;
    while played < frames {
        let presented = simulation.advance(frame, &scripted_input(played));
        played += 1;
        match presented.screen {
            Screen::LevelUp { .. } => {
                simulation
                    .choose_buff(0)
                    .context("failed to answer buff offer")?;
                buffs_taken += 1;
            }
            Screen::GameOver { .. } => break,
            Screen::Start | Screen::Game => {}
        }
    }

    let world = simulation.world();
    let player = query::player(world).context("headless session has no player")?;
    let report = RunReport {
        class,
        difficulty: config.difficulty(),
        seed: config.seed(),
        frames: played,
        elapsed_seconds: query::elapsed(world).as_secs_f64(),
        kills: query::kills(world),
        level: player.level,
        health: player.stats.health,
        buffs_taken,
        game_over: query::phase(world) == Phase::GameOver,
    };
    tracing::info!(
        kills = report.kills,
        level = report.level,
        "headless run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_survivors_core::ArenaSize;

    #[test]
    fn scripted_input_walks_a_square() {
        assert!(scripted_input(0).right);
        assert!(scripted_input(FRAMES_PER_LEG).down);
        assert!(scripted_input(FRAMES_PER_LEG * 2).left);
        assert!(scripted_input(FRAMES_PER_LEG * 3).up);
        assert!(scripted_input(FRAMES_PER_LEG * 4).right);
    }

    #[test]
    fn runs_are_reproducible_for_a_seed() {
        let config = Config::new(ArenaSize::DEFAULT, Difficulty::Hard, 9);
        let frame = Duration::from_millis(16);

        let first = run(config, PlayerClass::Mage, 1_500, frame).expect("run");
        let second = run(config, PlayerClass::Mage, 1_500, frame).expect("run");

        assert_eq!(first, second);
        assert!(first.frames <= 1_500);
        assert!(first.elapsed_seconds <= 1_500.0 * 0.016 + 1e-6);
    }

    #[test]
    fn zero_frames_reports_a_fresh_session() {
        let report = run(
            Config::default(),
            PlayerClass::Warrior,
            0,
            Duration::from_millis(16),
        )
        .expect("run");

        assert_eq!(report.frames, 0);
        assert_eq!(report.level, 1);
        assert_eq!(report.health, 150.0);
        assert!(!report.game_over);
    }
}
