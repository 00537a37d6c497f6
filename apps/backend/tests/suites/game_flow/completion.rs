// Cards resolved by a single response: truth or dare, never have I ever,
// taboo and trivia.

use partyroom::domain::actions::PlayerAction;
use partyroom::entities::game_actions::ActionType;
use partyroom::entities::game_modes::GameModeKind;
use partyroom::errors::ErrorCode;
use partyroom::services::game_flow::CardView;
use partyroom::AppError;

use crate::common::assert_code;
use crate::support::party::Party;
use crate::support::test_state::build_test_state;

fn current(card: &Option<CardView>) -> &CardView {
    card.as_ref().expect("a started game should have a card in play")
}

#[tokio::test]
async fn first_poll_draws_a_card_from_the_enabled_mode() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;

    assert!(view.game_started);
    let card = current(&view.current_card);
    assert_eq!(card.mode, GameModeKind::TruthOrDare);
    assert_eq!(card.mode_name, "Truth or Dare");
    assert!(view.waiting_for_action);
    assert!(view.progress.is_none());

    // Polling again keeps the same card.
    let again = party.poll(&users[1]).await?;
    assert_eq!(current(&again.current_card).id, card.id);
    Ok(())
}

#[tokio::test]
async fn complete_awards_the_card_points() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    let card = current(&view.current_card).clone();

    let receipt = party.act(&users[0], PlayerAction::Complete).await?;
    assert_eq!(receipt.card_id, card.id);
    assert_eq!(receipt.action, ActionType::Complete);
    assert!(receipt.advanced);
    assert_eq!(receipt.points, card.points);
    assert_eq!(receipt.drinks, 0);

    let next = party.poll(&users[1]).await?;
    assert_ne!(current(&next.current_card).id, card.id);
    assert_eq!(next.players[0].user_id, users[0].id);
    assert_eq!(next.players[0].points, card.points);
    assert_eq!(next.my_points, 0);
    Ok(())
}

#[tokio::test]
async fn fail_costs_points_and_adds_drinks() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::NeverHaveI)
        .await?;
    let card = current(&view.current_card).clone();

    let receipt = party.act(&users[1], PlayerAction::Fail).await?;
    assert!(receipt.advanced);
    assert_eq!(receipt.points, -card.points);
    assert_eq!(receipt.drinks, card.difficulty);

    let bob = party.poll(&users[1]).await?;
    assert_eq!(bob.my_points, -card.points);
    assert_eq!(bob.my_drinks, card.difficulty);
    Ok(())
}

#[tokio::test]
async fn a_resolved_card_cannot_be_scored_twice() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::Taboo)
        .await?;
    let card = current(&view.current_card).clone();

    party
        .act_on(&users[0], card.id, PlayerAction::Complete)
        .await?;
    assert_code(
        party
            .act_on(&users[0], card.id, PlayerAction::Complete)
            .await,
        ErrorCode::NoActiveCard,
    );

    // Once the next card is drawn the stale id is still refused.
    party.poll(&users[0]).await?;
    assert_code(
        party
            .act_on(&users[0], card.id, PlayerAction::Complete)
            .await,
        ErrorCode::NoActiveCard,
    );

    let info = party.info(&users[0]).await?;
    assert_eq!(info.me.points, card.points);
    assert_eq!(info.me.cards_completed, 1);
    Ok(())
}

#[tokio::test]
async fn racing_completions_score_once() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    let card = current(&view.current_card).clone();

    let (a, b) = tokio::join!(
        party.act_on(&users[0], card.id, PlayerAction::Complete),
        party.act_on(&users[1], card.id, PlayerAction::Complete),
    );
    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.code() == ErrorCode::NoActiveCard));

    let standings = party.poll(&users[0]).await?.players;
    let total: i32 = standings.iter().map(|p| p.points).sum();
    assert_eq!(total, card.points);
    Ok(())
}

#[tokio::test]
async fn trivia_answers_are_accepted_and_blank_ones_refused() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::Trivia)
        .await?;
    let card = current(&view.current_card).clone();

    assert_code(
        party
            .act(
                &users[0],
                PlayerAction::Answer {
                    answer: "   ".into(),
                },
            )
            .await,
        ErrorCode::InvalidPayload,
    );

    let receipt = party
        .act(
            &users[0],
            PlayerAction::Answer {
                answer: "Canberra".into(),
            },
        )
        .await?;
    assert_eq!(receipt.action, ActionType::Answer);
    assert!(receipt.advanced);
    assert_eq!(receipt.points, card.points);
    Ok(())
}

#[tokio::test]
async fn actions_must_fit_the_card_mode() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;

    assert_code(
        party
            .act(
                &users[0],
                PlayerAction::Pass {
                    target_player_id: users[1].id,
                },
            )
            .await,
        ErrorCode::InvalidPayload,
    );
    assert_code(
        party
            .act(
                &users[0],
                PlayerAction::Vote {
                    target_player_id: Some(users[1].id),
                    statement_index: None,
                },
            )
            .await,
        ErrorCode::InvalidPayload,
    );
    Ok(())
}

#[tokio::test]
async fn nothing_happens_before_the_game_starts() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users) = party.lobby(&["Alice", "Bob"]).await?;

    let view = party.poll(&users[0]).await?;
    assert!(!view.game_started);
    assert!(view.current_card.is_none());
    assert!(!view.waiting_for_action);
    assert_eq!(view.players.len(), 2);

    assert_code(
        party.act(&users[0], PlayerAction::Complete).await,
        ErrorCode::GameNotStarted,
    );
    assert_code(party.drink(&users[0]).await, ErrorCode::GameNotStarted);
    Ok(())
}

#[tokio::test]
async fn acting_before_any_card_is_drawn_is_refused() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users) = party.lobby(&["Alice", "Bob"]).await?;
    party.start(&users[0]).await?;

    assert_code(
        party.act(&users[1], PlayerAction::Complete).await,
        ErrorCode::NoActiveCard,
    );
    Ok(())
}

#[tokio::test]
async fn drinking_never_goes_below_zero() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    let difficulty = current(&view.current_card).difficulty;

    assert_eq!(party.drink(&users[0]).await?.drinks, 0);

    party.act(&users[0], PlayerAction::Fail).await?;
    assert_eq!(party.drink(&users[0]).await?.drinks, difficulty - 1);
    for _ in 0..5 {
        party.drink(&users[0]).await?;
    }
    assert_eq!(party.poll(&users[0]).await?.my_drinks, 0);
    Ok(())
}

#[tokio::test]
async fn outsiders_cannot_poll_or_act() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    let eve = party.user("Eve").await?;

    assert_code(party.poll(&eve).await, ErrorCode::NotInRoom);
    assert_code(
        party.act(&eve, PlayerAction::Complete).await,
        ErrorCode::NotInRoom,
    );
    Ok(())
}
