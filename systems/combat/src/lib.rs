#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects auto-attack targets and resolves their damage.

use std::time::Duration;

use arena_survivors_core::{Command, EnemyId, EnemyView, PlayerSnapshot, Strike};
use rand::Rng;

/// Auto-attack system that reuses a scratch buffer to rank enemies in range.
#[derive(Debug, Default)]
pub struct Combat {
    candidates: Vec<Candidate>,
}

impl Combat {
    /// Creates a new combat system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a `Command::StrikeEnemies` volley when the player may attack.
    ///
    /// Enemies within the player's attack range are ranked by distance, ties
    /// keeping identifier order, and the nearest `multi_shot` are struck. Each
    /// strike rolls independently for a critical hit that doubles its damage.
    /// Nothing is emitted while the cooldown is running or no enemy is in
    /// range, so the cooldown only restarts after a volley that found a target.
    pub fn handle<R: Rng>(
        &mut self,
        clock: Duration,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        if !cooldown_elapsed(clock, player) {
            return;
        }

        self.candidates.clear();
        for enemy in enemies.iter() {
            if enemy.health <= 0.0 {
                continue;
            }
            let distance = player.position.distance(enemy.position);
            if distance <= player.stats.attack_range {
                self.candidates.push(Candidate {
                    enemy: enemy.id,
                    distance,
                });
            }
        }

        if self.candidates.is_empty() {
            return;
        }

        self.candidates
            .sort_by(|left, right| left.distance.total_cmp(&right.distance));

        let volley = player.stats.multi_shot as usize;
        let strikes = self
            .candidates
            .iter()
            .take(volley)
            .map(|candidate| {
                let critical = rng.gen::<f32>() < player.stats.crit_chance;
                let damage = if critical {
                    player.stats.attack * 2.0
                } else {
                    player.stats.attack
                };
                Strike {
                    enemy: candidate.enemy,
                    damage,
                    critical,
                }
            })
            .collect();

        out.push(Command::StrikeEnemies { strikes });
    }
}

fn cooldown_elapsed(clock: Duration, player: &PlayerSnapshot) -> bool {
    player
        .last_attack
        .map_or(true, |last| clock.saturating_sub(last) >= player.attack_cooldown)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    enemy: EnemyId,
    distance: f32,
}
