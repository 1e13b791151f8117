#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that answers level-ups with randomly drawn buff offers.

use arena_survivors_core::{BuffKind, Command, Event, BUFF_OFFER_SIZE};
use rand::{seq::SliceRandom, Rng};

/// Configuration parameters required to construct the progression system.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    catalog: Vec<BuffKind>,
    offer_size: usize,
}

impl Config {
    /// Creates a configuration drawing `offer_size` distinct buffs from `catalog`.
    #[must_use]
    pub fn new(catalog: Vec<BuffKind>, offer_size: usize) -> Self {
        Self {
            catalog,
            offer_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(BuffKind::ALL.to_vec(), BUFF_OFFER_SIZE)
    }
}

/// Progression system emitting one offer per level-up.
#[derive(Debug)]
pub struct Progression {
    config: Config,
}

impl Progression {
    /// Creates a new progression system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits a `Command::OfferBuffs` for every `Event::LevelledUp` in order.
    ///
    /// Offers are drawn uniformly without replacement. A catalog smaller than
    /// the offer size yields a smaller offer, and an empty catalog yields an
    /// empty one.
    pub fn handle<R: Rng>(&self, events: &[Event], rng: &mut R, out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelledUp { .. } = event {
                out.push(Command::OfferBuffs {
                    buffs: self.draw(rng),
                });
            }
        }
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> Vec<BuffKind> {
        self.config
            .catalog
            .choose_multiple(rng, self.config.offer_size)
            .copied()
            .collect()
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
