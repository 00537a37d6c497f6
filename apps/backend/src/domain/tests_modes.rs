use crate::config::game::HotPotatoRules;
use crate::domain::actions::{ActionData, CardProgress, LoggedAction, PlayerAction};
use crate::domain::modes::{rules_for, CardContext, Gate, ScoreEffect, StatOutcome};
use crate::domain::rng::ScriptedRandom;
use crate::entities::game_actions::ActionType;
use crate::entities::game_modes::GameModeKind;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

const MEMBERS: [i64; 3] = [1, 2, 3];

fn ctx<'a>(progress: &'a CardProgress, hot_potato: &'a HotPotatoRules) -> CardContext<'a> {
    CardContext {
        card_id: 77,
        points: 3,
        difficulty: 2,
        members: &MEMBERS,
        progress,
        hot_potato,
    }
}

fn vote_for(target: i64) -> PlayerAction {
    PlayerAction::Vote {
        target_player_id: Some(target),
        statement_index: None,
    }
}

fn vote_statement(index: u8) -> PlayerAction {
    PlayerAction::Vote {
        target_player_id: None,
        statement_index: Some(index),
    }
}

/// Resolve `action` and fold the recorded entry into `progress`.
fn apply(
    kind: GameModeKind,
    progress: &mut CardProgress,
    actor: i64,
    action: PlayerAction,
) -> Result<(), DomainError> {
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::default();
    let resolution = rules_for(kind).resolve(&ctx(progress, &hp), actor, &action, &rng)?;
    progress.record(Some(actor), resolution.action_type, &resolution.data);
    Ok(())
}

fn is_invalid(err: &DomainError) -> bool {
    matches!(err, DomainError::Validation(ValidationKind::InvalidPayload, _))
}

#[test]
fn gates_per_mode() {
    assert_eq!(rules_for(GameModeKind::TruthOrDare).gate(), Gate::Completion);
    assert_eq!(rules_for(GameModeKind::NeverHaveI).gate(), Gate::Completion);
    assert_eq!(rules_for(GameModeKind::Taboo).gate(), Gate::Completion);
    assert_eq!(rules_for(GameModeKind::Trivia).gate(), Gate::Completion);
    assert_eq!(rules_for(GameModeKind::MostLikely).gate(), Gate::Consensus);
    assert_eq!(rules_for(GameModeKind::TwoTruthsLie).gate(), Gate::Consensus);
    assert_eq!(rules_for(GameModeKind::HotPotato).gate(), Gate::HotPotato);
    assert_eq!(
        rules_for(GameModeKind::Taboo).kind(),
        GameModeKind::Taboo
    );
}

#[test]
fn complete_awards_points_and_advances() {
    let progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::default();
    let r = rules_for(GameModeKind::TruthOrDare)
        .resolve(&ctx(&progress, &hp), 2, &PlayerAction::Complete, &rng)
        .unwrap();
    assert!(r.advance);
    assert_eq!(r.action_type, ActionType::Complete);
    assert_eq!(
        r.effects,
        vec![ScoreEffect {
            user_id: 2,
            points: 3,
            drinks: 0,
            outcome: Some(StatOutcome::Completed)
        }]
    );
}

#[test]
fn fail_deducts_points_and_adds_difficulty_drinks() {
    let progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::default();
    let r = rules_for(GameModeKind::NeverHaveI)
        .resolve(&ctx(&progress, &hp), 1, &PlayerAction::Fail, &rng)
        .unwrap();
    assert!(r.advance);
    assert_eq!(r.effects[0].points, -3);
    assert_eq!(r.effects[0].drinks, 2);
    assert_eq!(r.effects[0].outcome, Some(StatOutcome::Failed));
}

#[test]
fn per_turn_modes_reject_votes_and_passes() {
    let mut progress = CardProgress::default();
    let err = apply(GameModeKind::Taboo, &mut progress, 1, vote_for(2)).unwrap_err();
    assert!(is_invalid(&err));
    let err = apply(
        GameModeKind::TruthOrDare,
        &mut progress,
        1,
        PlayerAction::Pass {
            target_player_id: 2,
        },
    )
    .unwrap_err();
    assert!(is_invalid(&err));
}

#[test]
fn trivia_accepts_answers_but_not_blank_ones() {
    let progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::default();
    let rules = rules_for(GameModeKind::Trivia);

    let blank = PlayerAction::Answer {
        answer: "   ".into(),
    };
    assert!(is_invalid(
        &rules
            .resolve(&ctx(&progress, &hp), 1, &blank, &rng)
            .unwrap_err()
    ));

    let answer = PlayerAction::Answer {
        answer: " Canberra ".into(),
    };
    let r = rules.resolve(&ctx(&progress, &hp), 1, &answer, &rng).unwrap();
    assert_eq!(r.action_type, ActionType::Answer);
    assert_eq!(r.data.answer.as_deref(), Some("Canberra"));
    assert!(r.advance);
    assert_eq!(r.effects[0].points, 3);
}

#[test]
fn most_likely_waits_for_every_member() {
    let mut progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rules = rules_for(GameModeKind::MostLikely);

    apply(GameModeKind::MostLikely, &mut progress, 1, vote_for(3)).unwrap();
    assert!(rules.settle(&ctx(&progress, &hp)).is_none());
    apply(GameModeKind::MostLikely, &mut progress, 2, vote_for(3)).unwrap();
    assert!(rules.settle(&ctx(&progress, &hp)).is_none());
    apply(GameModeKind::MostLikely, &mut progress, 3, vote_for(1)).unwrap();

    let effects = rules.settle(&ctx(&progress, &hp)).unwrap();
    let drawn: Vec<i64> = effects
        .iter()
        .filter(|e| e.outcome == Some(StatOutcome::Drawn))
        .map(|e| e.user_id)
        .collect();
    assert_eq!(drawn, vec![1, 2, 3]);
    let drinkers: Vec<(i64, i32)> = effects
        .iter()
        .filter(|e| e.outcome.is_none())
        .map(|e| (e.user_id, e.drinks))
        .collect();
    assert_eq!(drinkers, vec![(3, 2)]);
}

#[test]
fn most_likely_tie_makes_everyone_on_top_drink() {
    let mut progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    apply(GameModeKind::MostLikely, &mut progress, 1, vote_for(2)).unwrap();
    apply(GameModeKind::MostLikely, &mut progress, 2, vote_for(1)).unwrap();
    apply(GameModeKind::MostLikely, &mut progress, 3, vote_for(3)).unwrap();
    let effects = rules_for(GameModeKind::MostLikely)
        .settle(&ctx(&progress, &hp))
        .unwrap();
    assert_eq!(effects.iter().filter(|e| e.outcome.is_none()).count(), 3);
}

#[test]
fn most_likely_rejects_double_votes_and_strangers() {
    let mut progress = CardProgress::default();
    apply(GameModeKind::MostLikely, &mut progress, 1, vote_for(2)).unwrap();
    let err = apply(GameModeKind::MostLikely, &mut progress, 1, vote_for(3)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyActed, _)
    ));
    let err = apply(GameModeKind::MostLikely, &mut progress, 2, vote_for(99)).unwrap_err();
    assert!(is_invalid(&err));
    let missing = PlayerAction::Vote {
        target_player_id: None,
        statement_index: Some(1),
    };
    let err = apply(GameModeKind::MostLikely, &mut progress, 2, missing).unwrap_err();
    assert!(is_invalid(&err));
}

#[test]
fn two_truths_requires_exactly_three_statements() {
    let mut progress = CardProgress::default();
    let two = PlayerAction::SubmitStatements {
        statements: vec!["a".into(), "b".into()],
        lie_index: 0,
    };
    assert!(is_invalid(
        &apply(GameModeKind::TwoTruthsLie, &mut progress, 1, two).unwrap_err()
    ));
    let bad_index = PlayerAction::SubmitStatements {
        statements: vec!["a".into(), "b".into(), "c".into()],
        lie_index: 3,
    };
    assert!(is_invalid(
        &apply(GameModeKind::TwoTruthsLie, &mut progress, 1, bad_index).unwrap_err()
    ));
    assert!(is_invalid(
        &apply(GameModeKind::TwoTruthsLie, &mut progress, 2, vote_statement(1)).unwrap_err()
    ));
}

#[test]
fn two_truths_scores_guessers_once_all_voted() {
    let mut progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rules = rules_for(GameModeKind::TwoTruthsLie);

    let submit = PlayerAction::SubmitStatements {
        statements: vec!["I have a cat".into(), "I was born in May".into(), "I can juggle".into()],
        lie_index: 2,
    };
    apply(GameModeKind::TwoTruthsLie, &mut progress, 1, submit.clone()).unwrap();
    let again = apply(GameModeKind::TwoTruthsLie, &mut progress, 2, submit).unwrap_err();
    assert!(matches!(
        again,
        DomainError::Conflict(ConflictKind::AlreadyActed, _)
    ));

    apply(GameModeKind::TwoTruthsLie, &mut progress, 2, vote_statement(2)).unwrap();
    apply(GameModeKind::TwoTruthsLie, &mut progress, 3, vote_statement(0)).unwrap();
    assert!(rules.settle(&ctx(&progress, &hp)).is_none());
    apply(GameModeKind::TwoTruthsLie, &mut progress, 1, vote_statement(2)).unwrap();

    let effects = rules.settle(&ctx(&progress, &hp)).unwrap();
    assert!(effects.contains(&ScoreEffect {
        user_id: 1,
        points: 0,
        drinks: 0,
        outcome: Some(StatOutcome::Drawn)
    }));
    assert!(effects.contains(&ScoreEffect {
        user_id: 2,
        points: 3,
        drinks: 0,
        outcome: Some(StatOutcome::Completed)
    }));
    assert!(effects.contains(&ScoreEffect {
        user_id: 3,
        points: 0,
        drinks: 2,
        outcome: Some(StatOutcome::Failed)
    }));
    assert_eq!(effects.len(), 3);
}

#[test]
fn hot_potato_explodes_on_low_roll() {
    let progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    // below(10) == 1 < 3
    let rng = ScriptedRandom::new([1]);
    let pass = PlayerAction::Pass {
        target_player_id: 2,
    };
    let r = rules_for(GameModeKind::HotPotato)
        .resolve(&ctx(&progress, &hp), 1, &pass, &rng)
        .unwrap();
    assert!(r.advance);
    assert_eq!(r.data.exploded, Some(true));
    assert_eq!(
        r.effects,
        vec![ScoreEffect {
            user_id: 1,
            points: -1,
            drinks: 2,
            outcome: Some(StatOutcome::Failed)
        }]
    );
}

#[test]
fn hot_potato_survives_high_roll_and_moves_holder() {
    let mut progress = CardProgress::default();
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::new([7]);
    let pass = PlayerAction::Pass {
        target_player_id: 3,
    };
    let r = rules_for(GameModeKind::HotPotato)
        .resolve(&ctx(&progress, &hp), 1, &pass, &rng)
        .unwrap();
    assert!(!r.advance);
    assert!(r.effects.is_empty());
    assert_eq!(r.data.target_player_id, Some(3));
    progress.record(Some(1), r.action_type, &r.data);
    assert_eq!(progress.holder(), Some(3));

    // only the holder may pass now
    let err = apply(
        GameModeKind::HotPotato,
        &mut progress,
        2,
        PlayerAction::Pass {
            target_player_id: 1,
        },
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::OutOfTurn, _)));
}

#[test]
fn hot_potato_held_by_a_departed_member_is_free_to_pass() {
    let mut progress = CardProgress::default();
    progress.record(
        Some(1),
        ActionType::Pass,
        &ActionData {
            target_player_id: Some(3),
            exploded: Some(false),
            ..Default::default()
        },
    );
    let hp = HotPotatoRules::default();
    let rng = ScriptedRandom::new([9]);
    let remaining = [1, 2];
    let ctx = CardContext {
        members: &remaining,
        ..ctx(&progress, &hp)
    };
    let r = rules_for(GameModeKind::HotPotato)
        .resolve(
            &ctx,
            2,
            &PlayerAction::Pass {
                target_player_id: 1,
            },
            &rng,
        )
        .unwrap();
    assert_eq!(r.data.target_player_id, Some(1));
    assert!(!r.advance);
}

#[test]
fn hot_potato_rejects_self_pass_and_strangers() {
    let mut progress = CardProgress::default();
    let to_self = PlayerAction::Pass {
        target_player_id: 1,
    };
    assert!(is_invalid(
        &apply(GameModeKind::HotPotato, &mut progress, 1, to_self).unwrap_err()
    ));
    let stranger = PlayerAction::Pass {
        target_player_id: 42,
    };
    assert!(is_invalid(
        &apply(GameModeKind::HotPotato, &mut progress, 1, stranger).unwrap_err()
    ));
    assert!(is_invalid(
        &apply(GameModeKind::HotPotato, &mut progress, 1, PlayerAction::Complete).unwrap_err()
    ));
}

#[test]
fn replayed_log_matches_incremental_progress() {
    let mut incremental = CardProgress::default();
    apply(GameModeKind::MostLikely, &mut incremental, 1, vote_for(2)).unwrap();
    apply(GameModeKind::MostLikely, &mut incremental, 2, vote_for(2)).unwrap();

    let log = vec![
        LoggedAction {
            user_id: Some(1),
            action_type: ActionType::Vote,
            data: ActionData {
                target_player_id: Some(2),
                ..Default::default()
            },
        },
        LoggedAction {
            user_id: Some(2),
            action_type: ActionType::Vote,
            data: ActionData {
                target_player_id: Some(2),
                ..Default::default()
            },
        },
    ];
    assert_eq!(CardProgress::replay(&log), incremental);
}
