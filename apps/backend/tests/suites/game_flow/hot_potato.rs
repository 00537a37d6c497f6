use partyroom::domain::actions::PlayerAction;
use partyroom::entities::game_modes::GameModeKind;
use partyroom::errors::ErrorCode;
use partyroom::AppError;

use crate::common::assert_code;
use crate::support::party::Party;
use crate::support::test_state::build_test_state_with_potato_odds;

fn pass_to(target: i64) -> PlayerAction {
    PlayerAction::Pass {
        target_player_id: target,
    }
}

#[tokio::test]
async fn only_the_holder_may_pass() -> Result<(), AppError> {
    let party = Party::new(build_test_state_with_potato_odds(0).await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::HotPotato)
        .await?;
    let (alice, bob, carol) = (&users[0], &users[1], &users[2]);
    let card = view.current_card.clone().expect("card drawn");
    assert!(card.timer_seconds.is_some());

    // Nobody holds it yet, so anyone may start.
    let receipt = party.act(alice, pass_to(bob.id)).await?;
    assert_eq!(receipt.exploded, Some(false));
    assert!(!receipt.advanced);

    let progress = party.poll(carol).await?.progress.expect("potato progress");
    assert_eq!(progress.holder_id, Some(bob.id));
    assert_eq!(progress.passes, 1);

    assert_code(party.act(alice, pass_to(carol.id)).await, ErrorCode::OutOfTurn);
    assert_code(party.act(bob, pass_to(bob.id)).await, ErrorCode::InvalidPayload);

    // Passing back to an earlier holder is fine.
    party.act(bob, pass_to(alice.id)).await?;
    party.act(alice, pass_to(bob.id)).await?;
    let progress = party.poll(carol).await?.progress.expect("potato progress");
    assert_eq!(progress.passes, 3);
    assert_eq!(
        party.poll(carol).await?.current_card.map(|c| c.id),
        Some(card.id)
    );
    Ok(())
}

#[tokio::test]
async fn explosion_penalizes_the_passer_and_ends_the_card() -> Result<(), AppError> {
    let party = Party::new(build_test_state_with_potato_odds(10).await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::HotPotato)
        .await?;
    let card = view.current_card.clone().expect("card drawn");
    let rules = party.state.game.hot_potato;

    let receipt = party.act(&users[0], pass_to(users[1].id)).await?;
    assert_eq!(receipt.exploded, Some(true));
    assert!(receipt.advanced);
    assert_eq!(receipt.points, -rules.penalty_points);
    assert_eq!(receipt.drinks, rules.penalty_drinks);

    let next = party.poll(&users[1]).await?;
    assert_ne!(next.current_card.map(|c| c.id), Some(card.id));
    assert_eq!(next.my_points, 0);
    Ok(())
}

#[tokio::test]
async fn a_departed_holder_frees_the_potato() -> Result<(), AppError> {
    let party = Party::new(build_test_state_with_potato_odds(0).await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::HotPotato)
        .await?;
    let (alice, bob, carol) = (&users[0], &users[1], &users[2]);

    party.act(alice, pass_to(bob.id)).await?;
    party.leave(bob).await?;

    assert_code(party.act(alice, pass_to(bob.id)).await, ErrorCode::InvalidPayload);
    let receipt = party.act(carol, pass_to(alice.id)).await?;
    assert_eq!(receipt.exploded, Some(false));
    Ok(())
}
