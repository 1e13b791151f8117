#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that steers the player and chases it with enemies.

use arena_survivors_core::{
    Command, EnemyView, Heading, InputSnapshot, WorldPoint, DIAGONAL_FACTOR,
};

/// Pure system that turns held input and snapshots into movement commands.
#[derive(Debug)]
pub struct Movement {
    diagonal_factor: f32,
}

impl Movement {
    /// Creates a movement system scaling diagonal input by the provided factor.
    #[must_use]
    pub const fn new(diagonal_factor: f32) -> Self {
        Self { diagonal_factor }
    }

    /// Emits the player's movement for the held directional keys.
    ///
    /// Nothing is emitted while no direction is held.
    pub fn steer(&self, input: &InputSnapshot, out: &mut Vec<Command>) {
        let heading = self.heading_for(input);
        if heading.is_zero() {
            return;
        }
        out.push(Command::MovePlayer { heading });
    }

    /// Emits one chase step per enemy toward the player's position.
    ///
    /// Steps are emitted in enemy identifier order. Enemies that coincide with
    /// the player still receive a zero heading so contact is resolved.
    pub fn chase(&self, player: WorldPoint, enemies: &EnemyView, out: &mut Vec<Command>) {
        for enemy in enemies.iter() {
            out.push(Command::StepEnemy {
                enemy: enemy.id,
                heading: enemy.position.heading_to(player),
            });
        }
    }

    /// Composes the heading for the held keys, scaling diagonals.
    #[must_use]
    pub fn heading_for(&self, input: &InputSnapshot) -> Heading {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.left {
            dx -= 1.0;
        }
        if input.right {
            dx += 1.0;
        }
        if input.up {
            dy -= 1.0;
        }
        if input.down {
            dy += 1.0;
        }

        if dx != 0.0 && dy != 0.0 {
            dx *= self.diagonal_factor;
            dy *= self.diagonal_factor;
        }
        Heading::new(dx, dy)
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(DIAGONAL_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel_out() {
        let movement = Movement::default();
        let input = InputSnapshot {
            left: true,
            right: true,
            ..InputSnapshot::default()
        };
        assert!(movement.heading_for(&input).is_zero());
    }

    #[test]
    fn diagonal_input_is_scaled() {
        let movement = Movement::default();
        let input = InputSnapshot {
            right: true,
            up: true,
            ..InputSnapshot::default()
        };
        assert_eq!(movement.heading_for(&input), Heading::new(0.707, -0.707));
    }

    #[test]
    fn idle_input_emits_nothing() {
        let movement = Movement::default();
        let mut commands = Vec::new();
        movement.steer(&InputSnapshot::default(), &mut commands);
        assert!(commands.is_empty());
    }
}
