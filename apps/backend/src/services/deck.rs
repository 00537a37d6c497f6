//! Card deck selection against the action log.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::domain::deck::{pick_after_reset, pick_next_card, DeckPick};
use crate::domain::rng::RandomSource;
use crate::errors::domain::DomainError;
use crate::repos::{cards, game_actions, game_modes};

/// Pick the room's next card, starting a new deck cycle when every eligible
/// card has been played since the last reset. The first card of a new cycle
/// is never the one that ended the previous cycle, unless the pool has only
/// one card.
///
/// Returns `None` only when no enabled mode has any card.
pub async fn next_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    rng: &dyn RandomSource,
) -> Result<Option<i64>, DomainError> {
    let mode_ids = game_modes::enabled_mode_ids(conn, room_id).await?;
    let pool = cards::ids_for_modes(conn, &mode_ids).await?;
    let played = game_actions::played_since_reset(conn, room_id).await?;

    match pick_next_card(&pool, &played, rng) {
        DeckPick::Card(card_id) => Ok(Some(card_id)),
        DeckPick::Empty => {
            debug!(room_id, "no cards in enabled modes");
            Ok(None)
        }
        DeckPick::Exhausted => {
            let last_played = game_actions::last_played_card(conn, room_id).await?;
            let marker = game_actions::append_round_reset(conn, room_id).await?;
            info!(room_id, marker, pool = pool.len(), "deck_reset");
            match pick_after_reset(&pool, last_played, rng) {
                DeckPick::Card(card_id) => Ok(Some(card_id)),
                DeckPick::Empty | DeckPick::Exhausted => Ok(None),
            }
        }
    }
}
