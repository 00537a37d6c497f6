//! Exhaust-then-reshuffle card selection.
//!
//! Every card in the eligible pool is drawn once before any card repeats.
//! The service layer supplies the pool and the set of cards already played
//! since the last `round_reset` marker.

use std::collections::HashSet;

use crate::domain::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPick {
    Card(i64),
    /// Every eligible card has been played this cycle; a new cycle must start.
    Exhausted,
    /// No card belongs to an enabled mode.
    Empty,
}

/// Uniform pick among `eligible` cards not in `played`.
///
/// `eligible` is expected in a stable order (by id) so that seeded runs are
/// reproducible.
pub fn pick_next_card(
    eligible: &[i64],
    played: &HashSet<i64>,
    rng: &dyn RandomSource,
) -> DeckPick {
    if eligible.is_empty() {
        return DeckPick::Empty;
    }
    let remaining: Vec<i64> = eligible
        .iter()
        .copied()
        .filter(|id| !played.contains(id))
        .collect();
    if remaining.is_empty() {
        return DeckPick::Exhausted;
    }
    DeckPick::Card(remaining[rng.below(remaining.len())])
}

/// First pick of a new cycle. The card that closed the previous cycle is held
/// back so it cannot come straight back, unless it is the whole pool.
pub fn pick_after_reset(
    eligible: &[i64],
    last_played: Option<i64>,
    rng: &dyn RandomSource,
) -> DeckPick {
    let held_back: HashSet<i64> = match last_played {
        Some(card_id) if eligible.len() > 1 => HashSet::from([card_id]),
        _ => HashSet::new(),
    };
    pick_next_card(eligible, &held_back, rng)
}
