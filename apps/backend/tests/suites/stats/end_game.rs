use partyroom::domain::actions::PlayerAction;
use partyroom::entities::game_modes::GameModeKind;
use partyroom::errors::ErrorCode;
use partyroom::AppError;

use crate::common::assert_code;
use crate::support::party::Party;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn ending_ranks_players_and_folds_lifetime_stats() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (room, users, view) = party
        .started_game(&["Alice", "Bob"], GameModeKind::TruthOrDare)
        .await?;
    let (alice, bob) = (&users[0], &users[1]);
    let first = view.current_card.expect("card drawn");

    party.act(alice, PlayerAction::Complete).await?;
    let second = party
        .poll(bob)
        .await?
        .current_card
        .expect("card drawn");
    party.act(bob, PlayerAction::Fail).await?;

    let summary = party.end(alice).await?;
    assert_eq!(summary.room_id, room.id);
    assert!(summary.game_id.is_some());
    assert_eq!(summary.standings.len(), 2);
    assert_eq!(summary.standings[0].user_id, alice.id);
    assert_eq!(summary.standings[0].rank, 1);
    assert_eq!(summary.standings[0].display_name, "Alice");
    assert_eq!(summary.standings[0].points, first.points);
    assert_eq!(summary.standings[1].user_id, bob.id);
    assert_eq!(summary.standings[1].rank, 2);
    assert_eq!(summary.standings[1].points, -second.points);

    let info = party.info(alice).await?;
    assert!(!info.room.is_game_started);
    assert!(info.room.is_active);

    let a = party.stats_of(alice).await?.totals;
    assert_eq!((a.games_played, a.games_won), (1, 1));
    assert_eq!(a.total_points, first.points);
    assert_eq!(a.max_points_in_game, first.points);
    assert_eq!((a.cards_completed, a.cards_failed), (1, 0));

    let b = party.stats_of(bob).await?.totals;
    assert_eq!((b.games_played, b.games_won), (1, 0));
    assert_eq!(b.total_points, -second.points);
    assert_eq!(b.total_drinks, second.difficulty);
    assert_eq!((b.cards_completed, b.cards_failed), (0, 1));
    Ok(())
}

#[tokio::test]
async fn a_scoreless_tie_goes_to_the_earliest_arrival() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::TruthOrDare)
        .await?;

    let summary = party.end(&users[0]).await?;
    let ranks: Vec<(i64, u32)> = summary
        .standings
        .iter()
        .map(|s| (s.user_id, s.rank))
        .collect();
    assert_eq!(
        ranks,
        vec![(users[0].id, 1), (users[1].id, 2), (users[2].id, 3)]
    );

    let winners: i32 = {
        let mut total = 0;
        for user in &users {
            total += party.stats_of(user).await?.totals.games_won;
        }
        total
    };
    assert_eq!(winners, 1);
    Ok(())
}

#[tokio::test]
async fn only_the_admin_ends_a_running_game() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users) = party.lobby(&["Alice", "Bob"]).await?;

    assert_code(party.end(&users[0]).await, ErrorCode::NotAuthorized);

    party.start(&users[0]).await?;
    assert_code(party.end(&users[1]).await, ErrorCode::NotAuthorized);

    party.end(&users[0]).await?;
    assert_code(party.end(&users[0]).await, ErrorCode::NotAuthorized);
    Ok(())
}

#[tokio::test]
async fn departed_players_are_not_credited() -> Result<(), AppError> {
    let party = Party::new(build_test_state().await?);
    let (_, users, _) = party
        .started_game(&["Alice", "Bob", "Carol"], GameModeKind::TruthOrDare)
        .await?;
    party.act(&users[2], PlayerAction::Complete).await?;
    party.leave(&users[2]).await?;

    let summary = party.end(&users[0]).await?;
    assert_eq!(summary.standings.len(), 2);
    assert!(summary.standings.iter().all(|s| s.user_id != users[2].id));
    assert_eq!(party.stats_of(&users[2]).await?.totals.games_played, 0);
    Ok(())
}
