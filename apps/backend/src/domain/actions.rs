//! Player actions and the replayed per-card progress built from the log.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::game_actions::ActionType;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A player's response to the current card, as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    Complete,
    Fail,
    /// `target_player_id` for most-likely, `statement_index` for two truths
    Vote {
        target_player_id: Option<i64>,
        statement_index: Option<u8>,
    },
    Answer {
        answer: String,
    },
    SubmitStatements {
        statements: Vec<String>,
        lie_index: u8,
    },
    Pass {
        target_player_id: i64,
    },
}

impl PlayerAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            PlayerAction::Complete => ActionType::Complete,
            PlayerAction::Fail => ActionType::Fail,
            PlayerAction::Vote { .. } => ActionType::Vote,
            PlayerAction::Answer { .. } => ActionType::Answer,
            PlayerAction::SubmitStatements { .. } => ActionType::SubmitStatements,
            PlayerAction::Pass { .. } => ActionType::Pass,
        }
    }
}

/// Action types that take a player out of the waiting set for a card.
pub fn is_terminal(action_type: ActionType) -> bool {
    matches!(
        action_type,
        ActionType::Complete
            | ActionType::Fail
            | ActionType::Vote
            | ActionType::Answer
            | ActionType::Pass
    )
}

/// Structured payload persisted alongside a log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_index: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lie_index: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploded: Option<bool>,
}

impl ActionData {
    /// JSON text for the `action_data` column; `None` when there is nothing to store.
    pub fn encode(&self) -> Result<Option<String>, DomainError> {
        if *self == ActionData::default() {
            return Ok(None);
        }
        serde_json::to_string(self).map(Some).map_err(|e| {
            DomainError::infra(InfraErrorKind::Other("serde".into()), format!("encode action data: {e}"))
        })
    }

    pub fn decode(raw: Option<&str>) -> Result<ActionData, DomainError> {
        match raw {
            None => Ok(ActionData::default()),
            Some(text) => serde_json::from_str(text).map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("stored action data is not valid: {e}"),
                )
            }),
        }
    }
}

/// One log entry as seen by the replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAction {
    pub user_id: Option<i64>,
    pub action_type: ActionType,
    pub data: ActionData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub teller: i64,
    pub statements: Vec<String>,
    pub lie_index: u8,
}

/// State of the current card rebuilt from its log entries since the last
/// round reset. Nothing here is stored; replaying the same entries always
/// yields the same progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardProgress {
    acted: HashSet<i64>,
    votes: Vec<(i64, ActionData)>,
    statements: Option<Statements>,
    holder: Option<i64>,
    passes: u32,
}

impl CardProgress {
    pub fn replay<'a>(actions: impl IntoIterator<Item = &'a LoggedAction>) -> Self {
        let mut progress = Self::default();
        for action in actions {
            progress.record(action.user_id, action.action_type, &action.data);
        }
        progress
    }

    /// Fold one more entry into the progress.
    pub fn record(&mut self, user_id: Option<i64>, action_type: ActionType, data: &ActionData) {
        let Some(user_id) = user_id else {
            return;
        };
        if is_terminal(action_type) {
            self.acted.insert(user_id);
        }
        match action_type {
            ActionType::Vote => self.votes.push((user_id, data.clone())),
            ActionType::SubmitStatements if self.statements.is_none() => {
                if let (Some(statements), Some(lie_index)) = (&data.statements, data.lie_index) {
                    self.statements = Some(Statements {
                        teller: user_id,
                        statements: statements.clone(),
                        lie_index,
                    });
                }
            }
            ActionType::Pass => {
                self.passes += 1;
                self.holder = data.target_player_id;
            }
            _ => {}
        }
    }

    pub fn has_acted(&self, user_id: i64) -> bool {
        self.acted.contains(&user_id)
    }

    pub fn has_voted(&self, user_id: i64) -> bool {
        self.votes.iter().any(|(voter, _)| *voter == user_id)
    }

    /// Votes cast by users in `members`, in log order.
    pub fn member_votes<'a>(
        &'a self,
        members: &'a [i64],
    ) -> impl Iterator<Item = &'a (i64, ActionData)> + 'a {
        self.votes
            .iter()
            .filter(move |(voter, _)| members.contains(voter))
    }

    pub fn statements(&self) -> Option<&Statements> {
        self.statements.as_ref()
    }

    /// Player currently holding the hot potato, if it has been passed.
    pub fn holder(&self) -> Option<i64> {
        self.holder
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }
}
