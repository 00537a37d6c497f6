use std::collections::HashSet;

use partyroom::domain::actions::PlayerAction;
use partyroom::entities::game_modes::GameModeKind;
use partyroom::AppError;

use crate::support::party::Party;
use crate::support::test_state::build_test_state;

/// Truth or dare ships four cards.
const TRUTH_OR_DARE_CARDS: usize = 4;

#[tokio::test]
async fn every_card_is_played_before_any_repeats() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users) = party.lobby(&["Alice", "Bob"]).await?;
    party.only_mode(&users[0], GameModeKind::TruthOrDare).await?;
    party.start(&users[0]).await?;

    let mut seen = HashSet::new();
    let mut last = None;
    for round in 0..TRUTH_OR_DARE_CARDS {
        let view = party.poll(&users[round % 2]).await?;
        let card = view.current_card.expect("pool is not exhausted yet");
        assert!(seen.insert(card.id), "card {} repeated in round {round}", card.id);
        party.act(&users[round % 2], PlayerAction::Complete).await?;
        last = Some(card.id);
    }
    assert_eq!(seen.len(), TRUTH_OR_DARE_CARDS);

    // Exhausted: the deck reshuffles instead of stalling, and the card that
    // closed the cycle does not come straight back.
    let view = party.poll(&users[0]).await?;
    let card = view.current_card.expect("a new cycle starts");
    assert!(seen.contains(&card.id));
    assert_ne!(Some(card.id), last);
    Ok(())
}

#[tokio::test]
async fn draws_follow_the_modes_enabled_right_now() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    assert_eq!(
        view.current_card.map(|c| c.mode),
        Some(GameModeKind::TruthOrDare)
    );

    party.only_mode(&users[0], GameModeKind::Taboo).await?;
    party.act(&users[1], PlayerAction::Complete).await?;

    let next = party.poll(&users[1]).await?;
    assert_eq!(next.current_card.map(|c| c.mode), Some(GameModeKind::Taboo));
    Ok(())
}

#[tokio::test]
async fn restarting_begins_a_fresh_cycle_with_zeroed_scores() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    party.act(&users[0], PlayerAction::Complete).await?;
    assert!(party.info(&users[0]).await?.me.points > 0);

    party.end(&users[0]).await?;
    party.start(&users[0]).await?;

    let view = party.poll(&users[0]).await?;
    assert_eq!(view.my_points, 0);
    assert!(view.current_card.is_some());
    Ok(())
}
