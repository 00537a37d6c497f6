//! Per-mode resolution rules.
//!
//! Each game mode decides which actions it accepts, what a valid payload
//! looks like, how scores move, and when the room advances to the next card.
//! Rules are pure: they read the replayed `CardProgress` and return effects
//! for the service layer to persist.

use std::collections::HashMap;

use crate::config::game::HotPotatoRules;
use crate::domain::actions::{ActionData, CardProgress, PlayerAction};
use crate::domain::rng::RandomSource;
use crate::entities::game_actions::ActionType;
use crate::entities::game_modes::GameModeKind;
use crate::errors::domain::{ConflictKind, DomainError};

/// What ends a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The acting player's single response resolves the card.
    Completion,
    /// Every current member must vote.
    Consensus,
    /// Passed around until it explodes.
    HotPotato,
}

/// Card statistic bucket an effect counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOutcome {
    Drawn,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEffect {
    pub user_id: i64,
    pub points: i32,
    pub drinks: i32,
    /// `None` for side effects that are not the player's own play of the card
    pub outcome: Option<StatOutcome>,
}

impl ScoreEffect {
    fn completed(user_id: i64, points: i32) -> Self {
        Self {
            user_id,
            points,
            drinks: 0,
            outcome: Some(StatOutcome::Completed),
        }
    }

    fn failed(user_id: i64, points: i32, drinks: i32) -> Self {
        Self {
            user_id,
            points: -points,
            drinks,
            outcome: Some(StatOutcome::Failed),
        }
    }

    fn drawn(user_id: i64) -> Self {
        Self {
            user_id,
            points: 0,
            drinks: 0,
            outcome: Some(StatOutcome::Drawn),
        }
    }

    fn drink(user_id: i64, drinks: i32) -> Self {
        Self {
            user_id,
            points: 0,
            drinks,
            outcome: None,
        }
    }
}

/// Outcome of applying one action to the current card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub action_type: ActionType,
    pub data: ActionData,
    pub effects: Vec<ScoreEffect>,
    pub advance: bool,
}

impl Resolution {
    fn record_only(action_type: ActionType, data: ActionData) -> Self {
        Self {
            action_type,
            data,
            effects: Vec::new(),
            advance: false,
        }
    }

    fn resolved(action_type: ActionType, data: ActionData, effects: Vec<ScoreEffect>) -> Self {
        Self {
            action_type,
            data,
            effects,
            advance: true,
        }
    }

    /// `+P`, counted as completed.
    fn complete(ctx: &CardContext<'_>, actor: i64, data: ActionData) -> Self {
        Self::resolved(
            ActionType::Complete,
            data,
            vec![ScoreEffect::completed(actor, ctx.points)],
        )
    }

    /// `-P` and `+D` drinks, counted as failed.
    fn fail(ctx: &CardContext<'_>, actor: i64) -> Self {
        Self::resolved(
            ActionType::Fail,
            ActionData::default(),
            vec![ScoreEffect::failed(actor, ctx.points, ctx.difficulty)],
        )
    }
}

/// Everything a rule may look at when resolving an action.
pub struct CardContext<'a> {
    pub card_id: i64,
    pub points: i32,
    pub difficulty: i32,
    /// Current room members, in join order.
    pub members: &'a [i64],
    pub progress: &'a CardProgress,
    pub hot_potato: &'a HotPotatoRules,
}

pub trait ModeRules: Send + Sync {
    fn kind(&self) -> GameModeKind;

    fn gate(&self) -> Gate;

    /// Validate `action` from `actor` and decide its effects.
    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError>;

    /// Effects of a completed consensus round, or `None` while still collecting.
    fn settle(&self, _ctx: &CardContext<'_>) -> Option<Vec<ScoreEffect>> {
        None
    }
}

pub fn rules_for(kind: GameModeKind) -> &'static dyn ModeRules {
    match kind {
        GameModeKind::TruthOrDare => &PerTurn(GameModeKind::TruthOrDare),
        GameModeKind::NeverHaveI => &PerTurn(GameModeKind::NeverHaveI),
        GameModeKind::Taboo => &PerTurn(GameModeKind::Taboo),
        GameModeKind::Trivia => &Trivia,
        GameModeKind::MostLikely => &MostLikely,
        GameModeKind::TwoTruthsLie => &TwoTruthsLie,
        GameModeKind::HotPotato => &HotPotato,
    }
}

fn unsupported(kind: GameModeKind, action: &PlayerAction) -> DomainError {
    DomainError::invalid_payload(format!(
        "{:?} is not a valid action for {kind:?} cards",
        action.action_type()
    ))
}

fn ensure_first_vote(ctx: &CardContext<'_>, actor: i64) -> Result<(), DomainError> {
    if ctx.progress.has_voted(actor) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyActed,
            "You have already voted on this card",
        ));
    }
    Ok(())
}

fn votes_complete(ctx: &CardContext<'_>) -> bool {
    !ctx.members.is_empty() && ctx.progress.member_votes(ctx.members).count() >= ctx.members.len()
}

/// Truth or dare, never have I ever, taboo: resolved by the actor alone.
struct PerTurn(GameModeKind);

impl ModeRules for PerTurn {
    fn kind(&self) -> GameModeKind {
        self.0
    }

    fn gate(&self) -> Gate {
        Gate::Completion
    }

    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        _rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        match action {
            PlayerAction::Complete => Ok(Resolution::complete(ctx, actor, ActionData::default())),
            PlayerAction::Fail => Ok(Resolution::fail(ctx, actor)),
            other => Err(unsupported(self.0, other)),
        }
    }
}

/// Answers are accepted as given; a human judge may use complete/fail instead.
struct Trivia;

impl ModeRules for Trivia {
    fn kind(&self) -> GameModeKind {
        GameModeKind::Trivia
    }

    fn gate(&self) -> Gate {
        Gate::Completion
    }

    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        _rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        match action {
            PlayerAction::Answer { answer } => {
                let answer = answer.trim();
                if answer.is_empty() {
                    return Err(DomainError::invalid_payload("Answer must not be empty"));
                }
                let data = ActionData {
                    answer: Some(answer.to_string()),
                    ..Default::default()
                };
                let mut resolution = Resolution::complete(ctx, actor, data);
                resolution.action_type = ActionType::Answer;
                Ok(resolution)
            }
            PlayerAction::Complete => Ok(Resolution::complete(ctx, actor, ActionData::default())),
            PlayerAction::Fail => Ok(Resolution::fail(ctx, actor)),
            other => Err(unsupported(GameModeKind::Trivia, other)),
        }
    }
}

/// Everyone votes for a player; the most voted drink.
struct MostLikely;

impl ModeRules for MostLikely {
    fn kind(&self) -> GameModeKind {
        GameModeKind::MostLikely
    }

    fn gate(&self) -> Gate {
        Gate::Consensus
    }

    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        _rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        let PlayerAction::Vote {
            target_player_id, ..
        } = action
        else {
            return Err(unsupported(GameModeKind::MostLikely, action));
        };
        let target = target_player_id
            .ok_or_else(|| DomainError::invalid_payload("target_player_id is required"))?;
        if !ctx.members.contains(&target) {
            return Err(DomainError::invalid_payload(
                "Vote target is not a member of this room",
            ));
        }
        ensure_first_vote(ctx, actor)?;
        Ok(Resolution::record_only(
            ActionType::Vote,
            ActionData {
                target_player_id: Some(target),
                ..Default::default()
            },
        ))
    }

    fn settle(&self, ctx: &CardContext<'_>) -> Option<Vec<ScoreEffect>> {
        if !votes_complete(ctx) {
            return None;
        }
        let mut tally: HashMap<i64, usize> = HashMap::new();
        let mut effects = Vec::new();
        for (voter, data) in ctx.progress.member_votes(ctx.members) {
            effects.push(ScoreEffect::drawn(*voter));
            if let Some(target) = data.target_player_id.filter(|t| ctx.members.contains(t)) {
                *tally.entry(target).or_default() += 1;
            }
        }
        if let Some(top) = tally.values().copied().max() {
            // join order keeps the effect list stable
            for member in ctx.members {
                if tally.get(member) == Some(&top) {
                    effects.push(ScoreEffect::drink(*member, ctx.difficulty));
                }
            }
        }
        Some(effects)
    }
}

/// One teller submits three statements; everyone votes for the lie.
struct TwoTruthsLie;

impl ModeRules for TwoTruthsLie {
    fn kind(&self) -> GameModeKind {
        GameModeKind::TwoTruthsLie
    }

    fn gate(&self) -> Gate {
        Gate::Consensus
    }

    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        _rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        match action {
            PlayerAction::SubmitStatements {
                statements,
                lie_index,
            } => {
                if statements.len() != 3 {
                    return Err(DomainError::invalid_payload(format!(
                        "Exactly 3 statements are required, got {}",
                        statements.len()
                    )));
                }
                if statements.iter().any(|s| s.trim().is_empty()) {
                    return Err(DomainError::invalid_payload("Statements must not be empty"));
                }
                if *lie_index >= 3 {
                    return Err(DomainError::invalid_payload("lie_index must be 0, 1 or 2"));
                }
                if ctx.progress.statements().is_some() {
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadyActed,
                        "Statements were already submitted for this card",
                    ));
                }
                Ok(Resolution::record_only(
                    ActionType::SubmitStatements,
                    ActionData {
                        statements: Some(statements.iter().map(|s| s.trim().to_string()).collect()),
                        lie_index: Some(*lie_index),
                        ..Default::default()
                    },
                ))
            }
            PlayerAction::Vote {
                statement_index, ..
            } => {
                let index = statement_index
                    .ok_or_else(|| DomainError::invalid_payload("statement_index is required"))?;
                if index >= 3 {
                    return Err(DomainError::invalid_payload(
                        "statement_index must be 0, 1 or 2",
                    ));
                }
                if ctx.progress.statements().is_none() {
                    return Err(DomainError::invalid_payload(
                        "No statements have been submitted yet",
                    ));
                }
                ensure_first_vote(ctx, actor)?;
                Ok(Resolution::record_only(
                    ActionType::Vote,
                    ActionData {
                        statement_index: Some(index),
                        ..Default::default()
                    },
                ))
            }
            other => Err(unsupported(GameModeKind::TwoTruthsLie, other)),
        }
    }

    fn settle(&self, ctx: &CardContext<'_>) -> Option<Vec<ScoreEffect>> {
        let statements = ctx.progress.statements()?;
        if !votes_complete(ctx) {
            return None;
        }
        let mut effects = vec![ScoreEffect::drawn(statements.teller)];
        for (voter, data) in ctx.progress.member_votes(ctx.members) {
            if *voter == statements.teller {
                continue;
            }
            if data.statement_index == Some(statements.lie_index) {
                effects.push(ScoreEffect::completed(*voter, ctx.points));
            } else {
                effects.push(ScoreEffect::failed(*voter, 0, ctx.difficulty));
            }
        }
        Some(effects)
    }
}

/// Pass until it explodes; the odds come from configuration.
struct HotPotato;

impl ModeRules for HotPotato {
    fn kind(&self) -> GameModeKind {
        GameModeKind::HotPotato
    }

    fn gate(&self) -> Gate {
        Gate::HotPotato
    }

    fn resolve(
        &self,
        ctx: &CardContext<'_>,
        actor: i64,
        action: &PlayerAction,
        rng: &dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        let PlayerAction::Pass { target_player_id } = action else {
            return Err(unsupported(GameModeKind::HotPotato, action));
        };
        let target = *target_player_id;
        if target == actor {
            return Err(DomainError::invalid_payload("You cannot pass to yourself"));
        }
        if !ctx.members.contains(&target) {
            return Err(DomainError::invalid_payload(
                "Pass target is not a member of this room",
            ));
        }
        // A holder who left the room frees the potato for anyone.
        if let Some(holder) = ctx.progress.holder().filter(|h| ctx.members.contains(h)) {
            if holder != actor {
                return Err(DomainError::conflict(
                    ConflictKind::OutOfTurn,
                    "Only the player holding the potato can pass it",
                ));
            }
        }

        let rules = ctx.hot_potato;
        let exploded = rng.chance(rules.explosion_numerator, rules.explosion_denominator);
        let data = ActionData {
            target_player_id: Some(target),
            exploded: Some(exploded),
            ..Default::default()
        };
        if exploded {
            Ok(Resolution::resolved(
                ActionType::Pass,
                data,
                vec![ScoreEffect::failed(
                    actor,
                    rules.penalty_points,
                    rules.penalty_drinks,
                )],
            ))
        } else {
            Ok(Resolution::record_only(ActionType::Pass, data))
        }
    }
}
