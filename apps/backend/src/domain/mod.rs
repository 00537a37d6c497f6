//! Domain layer: pure room and card rules, free of storage and HTTP.

pub mod actions;
pub mod deck;
pub mod modes;
pub mod ranking;
pub mod rng;
pub mod room_code;

#[cfg(test)]
mod tests_modes;
#[cfg(test)]
mod tests_props_deck;

pub use actions::{ActionData, CardProgress, LoggedAction, PlayerAction};
pub use modes::{rules_for, CardContext, Gate, ModeRules, Resolution, ScoreEffect, StatOutcome};
pub use rng::{RandomSource, SeededRandom};
