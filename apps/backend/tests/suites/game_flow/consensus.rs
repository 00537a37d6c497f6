// Room-wide votes: most likely to, two truths and a lie.

use partyroom::domain::actions::PlayerAction;
use partyroom::entities::game_modes::GameModeKind;
use partyroom::errors::ErrorCode;
use partyroom::AppError;

use crate::common::assert_code;
use crate::support::party::Party;
use crate::support::test_state::build_test_state;

fn vote_for(target: i64) -> PlayerAction {
    PlayerAction::Vote {
        target_player_id: Some(target),
        statement_index: None,
    }
}

fn pick_statement(index: u8) -> PlayerAction {
    PlayerAction::Vote {
        target_player_id: None,
        statement_index: Some(index),
    }
}

fn statements(lie_index: u8) -> PlayerAction {
    PlayerAction::SubmitStatements {
        statements: vec![
            "I have been to Iceland".into(),
            "I can juggle".into(),
            "I own a boat".into(),
        ],
        lie_index,
    }
}

// ============================================================================
// Most likely to
// ============================================================================

#[tokio::test]
async fn most_likely_waits_for_every_member() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::MostLikely)
        .await?;
    let (alice, bob, carol) = (&users[0], &users[1], &users[2]);
    let card = view.current_card.clone().expect("card drawn");

    let progress = view.progress.clone().expect("vote progress is reported");
    assert_eq!((progress.votes_cast, progress.votes_needed), (0, 3));

    assert!(!party.act(alice, vote_for(bob.id)).await?.advanced);
    assert!(!party.act(bob, vote_for(alice.id)).await?.advanced);

    let alice_view = party.poll(alice).await?;
    assert!(!alice_view.waiting_for_action);
    assert_eq!(alice_view.progress.map(|p| p.votes_cast), Some(2));
    assert!(party.poll(carol).await?.waiting_for_action);

    let last = party.act(carol, vote_for(bob.id)).await?;
    assert!(last.advanced);

    // Bob got two of three votes and drinks; nobody gains or loses points.
    let info = party.info(alice).await?;
    for member in &info.members {
        assert_eq!(member.points, 0);
        let expected = if member.user_id == bob.id { card.difficulty } else { 0 };
        assert_eq!(member.drinks, expected, "drinks for {}", member.display_name);
    }
    Ok(())
}

#[tokio::test]
async fn a_member_votes_once_per_card() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::MostLikely)
        .await?;

    party.act(&users[0], vote_for(users[1].id)).await?;
    assert_code(
        party.act(&users[0], vote_for(users[2].id)).await,
        ErrorCode::AlreadyActed,
    );
    Ok(())
}

#[tokio::test]
async fn votes_must_name_a_member() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob"], GameModeKind::MostLikely)
        .await?;
    let eve = party.user("Eve").await?;

    assert_code(
        party.act(&users[0], vote_for(eve.id)).await,
        ErrorCode::InvalidPayload,
    );
    assert_code(
        party
            .act(
                &users[0],
                PlayerAction::Vote {
                    target_player_id: None,
                    statement_index: None,
                },
            )
            .await,
        ErrorCode::InvalidPayload,
    );
    Ok(())
}

#[tokio::test]
async fn a_departure_completes_the_vote_on_the_next_poll() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::MostLikely)
        .await?;
    let (alice, bob, carol) = (&users[0], &users[1], &users[2]);
    let card = view.current_card.clone().expect("card drawn");

    party.act(alice, vote_for(bob.id)).await?;
    party.act(bob, vote_for(alice.id)).await?;
    party.leave(carol).await?;

    let after = party.poll(alice).await?;
    let next = after.current_card.expect("a new card is drawn");
    assert_ne!(next.id, card.id);
    // One vote each: a tie at the top means both drink.
    assert_eq!(after.my_drinks, card.difficulty);
    assert!(after.players.iter().all(|p| p.drinks == card.difficulty));
    Ok(())
}

// ============================================================================
// Two truths and a lie
// ============================================================================

#[tokio::test]
async fn finding_the_lie_scores_and_missing_it_drinks() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, view) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::TwoTruthsLie)
        .await?;
    let (alice, bob, carol) = (&users[0], &users[1], &users[2]);
    let card = view.current_card.clone().expect("card drawn");

    assert_code(party.act(bob, pick_statement(2)).await, ErrorCode::InvalidPayload);

    party.act(alice, statements(2)).await?;
    let progress = party
        .poll(bob)
        .await?
        .progress
        .expect("vote progress is reported");
    assert_eq!(progress.teller_id, Some(alice.id));
    assert_eq!(progress.statements.map(|s| s.len()), Some(3));

    assert!(!party.act(bob, pick_statement(2)).await?.advanced);
    assert!(!party.act(carol, pick_statement(0)).await?.advanced);
    assert!(party.act(alice, pick_statement(2)).await?.advanced);

    let info = party.info(alice).await?;
    let by_user = |id: i64| {
        info.members
            .iter()
            .find(|m| m.user_id == id)
            .expect("member listed")
    };
    assert_eq!((by_user(alice.id).points, by_user(alice.id).drinks), (0, 0));
    assert_eq!((by_user(bob.id).points, by_user(bob.id).drinks), (card.points, 0));
    assert_eq!((by_user(carol.id).points, by_user(carol.id).drinks), (0, card.difficulty));
    assert_eq!(by_user(bob.id).cards_completed, 1);
    assert_eq!(by_user(carol.id).cards_failed, 1);
    Ok(())
}

#[tokio::test]
async fn statements_are_submitted_once_and_validated() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TwoTruthsLie)
        .await?;

    assert_code(
        party
            .act(
                &users[0],
                PlayerAction::SubmitStatements {
                    statements: vec!["only one".into()],
                    lie_index: 0,
                },
            )
            .await,
        ErrorCode::InvalidPayload,
    );
    assert_code(party.act(&users[0], statements(3)).await, ErrorCode::InvalidPayload);

    party.act(&users[0], statements(1)).await?;
    assert_code(party.act(&users[1], statements(0)).await, ErrorCode::AlreadyActed);
    Ok(())
}
