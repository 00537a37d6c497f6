//! Per-card action collection and resolution.
//!
//! The room row is locked for the whole transaction, and the current card is
//! re-read under that lock. Two racing resolvers therefore serialize: the
//! second sees the card already cleared (or replaced) and is rejected.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{deck, ensure_started, locked_room_of, membership_ids};
use crate::config::game::GameConfig;
use crate::domain::actions::{is_terminal, CardProgress, PlayerAction};
use crate::domain::modes::{rules_for, CardContext, Gate, ModeRules, ScoreEffect};
use crate::domain::rng::RandomSource;
use crate::entities::game_actions::ActionType;
use crate::entities::game_modes::GameModeKind;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::cards::{self, Card};
use crate::repos::game_modes::{self, GameMode};
use crate::repos::memberships::{self, Membership, ScoreDelta};
use crate::repos::rooms::{self, Room};
use crate::repos::{game_actions, stats, users};
use crate::services::rooms::{summary, RoomSummary};

/// Body of `POST /api/game/actions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardActionRequest {
    /// Card the client was looking at; must still be current. Required so a
    /// retried request cannot land on the card drawn after it resolved.
    pub card_id: i64,
    #[serde(flatten)]
    pub action: PlayerAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReceipt {
    pub card_id: i64,
    pub action: ActionType,
    /// The card was resolved and the room will draw a new one.
    pub advanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploded: Option<bool>,
    pub points: i32,
    pub drinks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkReceipt {
    pub drinks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    pub user_id: i64,
    pub display_name: String,
    pub points: i32,
    pub drinks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub points: i32,
    pub difficulty: i32,
    /// Display only; no deadline is enforced
    pub timer_seconds: Option<i32>,
    pub mode: GameModeKind,
    pub mode_name: String,
}

/// Collection progress for consensus and hot-potato cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardProgressView {
    pub votes_cast: usize,
    pub votes_needed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teller_id: Option<i64>,
    /// Submitted statements; which one is the lie stays hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_id: Option<i64>,
    pub passes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStateView {
    pub room: RoomSummary,
    pub game_started: bool,
    pub current_card: Option<CardView>,
    /// Points desc, then join order
    pub players: Vec<PlayerStanding>,
    pub my_points: i32,
    pub my_drinks: i32,
    pub waiting_for_action: bool,
    pub progress: Option<CardProgressView>,
}

/// The current card with everything resolution needs.
struct ActiveCard {
    card: Card,
    mode: GameMode,
    rules: &'static dyn ModeRules,
    progress: CardProgress,
}

impl ActiveCard {
    fn context<'a>(&'a self, members: &'a [i64], config: &'a GameConfig) -> CardContext<'a> {
        CardContext {
            card_id: self.card.id,
            points: self.card.points,
            difficulty: self.card.difficulty,
            members,
            progress: &self.progress,
            hot_potato: &config.hot_potato,
        }
    }
}

/// Game flow service: polling state, player actions and drinks.
#[derive(Clone)]
pub struct GameFlowService {
    config: GameConfig,
    rng: Arc<dyn RandomSource>,
}

impl GameFlowService {
    pub fn new(config: GameConfig, rng: Arc<dyn RandomSource>) -> Self {
        Self { config, rng }
    }

    /// Polling entry point.
    ///
    /// Draws a card lazily when the room has none, and settles a consensus
    /// card whose vote count became sufficient because a member left.
    pub async fn game_state(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<GameStateView, AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        let members = memberships::list_by_room(txn, room.id).await?;
        let member_ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();

        let mut active = None;
        if room.is_game_started {
            let mut current = room.current_card_id;
            if let Some(card_id) = current {
                let loaded = self.load_card(txn, &room, card_id).await?;
                if self
                    .settle_if_complete(txn, &room, &members, &member_ids, &loaded)
                    .await?
                {
                    current = None;
                } else {
                    active = Some(loaded);
                }
            }
            if current.is_none() {
                if let Some(card_id) = deck::next_card(txn, room.id, self.rng.as_ref()).await? {
                    rooms::set_current_card(txn, room.id, Some(card_id)).await?;
                    info!(room_id = room.id, card_id, "card_drawn");
                    active = Some(self.load_card(txn, &room, card_id).await?);
                } else {
                    rooms::set_current_card(txn, room.id, None).await?;
                }
            }
        }

        // Scores may have moved while settling; read them fresh.
        let members = memberships::list_by_room(txn, room.id).await?;
        let me = members
            .iter()
            .find(|m| m.user_id == user_id)
            .cloned()
            .ok_or_else(|| DomainError::conflict(ConflictKind::NotInRoom, "You are not in a room"))?;
        let players = standings(txn, &members).await?;

        let waiting_for_action = active
            .as_ref()
            .is_some_and(|a| !a.progress.has_acted(user_id));
        let progress = active
            .as_ref()
            .and_then(|a| progress_view(a, &member_ids));
        let current_card = active.as_ref().map(card_view);

        Ok(GameStateView {
            room: summary(&room, members.len()),
            game_started: room.is_game_started,
            current_card,
            players,
            my_points: me.points,
            my_drinks: me.drinks,
            waiting_for_action,
            progress,
        })
    }

    /// Validate and log one action on the current card, applying score
    /// effects and advancing the room when the mode says the card is done.
    pub async fn record_card_action(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        req: CardActionRequest,
    ) -> Result<ActionReceipt, AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        ensure_started(&room)?;
        let card_id = room.current_card_id.ok_or_else(no_active_card)?;
        if req.card_id != card_id {
            return Err(DomainError::conflict(
                ConflictKind::NoActiveCard,
                "That card is no longer in play",
            )
            .into());
        }

        let members = memberships::list_by_room(txn, room.id).await?;
        let member_ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
        let mut active = self.load_card(txn, &room, card_id).await?;

        let action_type = req.action.action_type();
        if action_type != ActionType::Pass
            && is_terminal(action_type)
            && active.progress.has_acted(user_id)
        {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyActed,
                "You have already responded to this card",
            )
            .into());
        }

        let resolution = {
            let ctx = active.context(&member_ids, &self.config);
            active
                .rules
                .resolve(&ctx, user_id, &req.action, self.rng.as_ref())?
        };
        game_actions::append(
            txn,
            room.id,
            card_id,
            user_id,
            resolution.action_type,
            &resolution.data,
        )
        .await?;
        active
            .progress
            .record(Some(user_id), resolution.action_type, &resolution.data);
        debug!(room_id = room.id, card_id, user_id, action = ?resolution.action_type, "action_recorded");

        let exploded = resolution.data.exploded;
        let effects = if resolution.advance {
            Some(resolution.effects)
        } else if active.rules.gate() == Gate::Consensus {
            active.rules.settle(&active.context(&member_ids, &self.config))
        } else {
            None
        };

        let advanced = effects.is_some();
        if let Some(effects) = effects {
            if exploded == Some(true) {
                info!(room_id = room.id, card_id, user_id, "hot_potato_exploded");
            }
            self.finish_card(txn, &room, &members, card_id, &effects)
                .await?;
        }

        let me = memberships::require_membership(txn, user_id).await?;
        Ok(ActionReceipt {
            card_id,
            action: resolution.action_type,
            advanced,
            exploded,
            points: me.points,
            drinks: me.drinks,
        })
    }

    /// One drink taken: decrement with a floor at zero.
    pub async fn drink(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<DrinkReceipt, AppError> {
        let (membership, room) = locked_room_of(txn, user_id).await?;
        ensure_started(&room)?;
        let drinks = (membership.drinks - 1).max(0);
        memberships::set_drinks(txn, membership.id, drinks).await?;
        debug!(room_id = room.id, user_id, drinks, "drink_taken");
        Ok(DrinkReceipt { drinks })
    }

    async fn load_card(
        &self,
        txn: &DatabaseTransaction,
        room: &Room,
        card_id: i64,
    ) -> Result<ActiveCard, DomainError> {
        let card = cards::require_card(txn, card_id).await?;
        let mode = game_modes::require_mode(txn, card.game_mode_id).await?;
        let log = game_actions::card_log(txn, room.id, card_id).await?;
        Ok(ActiveCard {
            rules: rules_for(mode.slug),
            progress: CardProgress::replay(&log),
            card,
            mode,
        })
    }

    /// Settle a consensus card that already has every current member's vote.
    async fn settle_if_complete(
        &self,
        txn: &DatabaseTransaction,
        room: &Room,
        members: &[Membership],
        member_ids: &[i64],
        active: &ActiveCard,
    ) -> Result<bool, DomainError> {
        if active.rules.gate() != Gate::Consensus {
            return Ok(false);
        }
        match active.rules.settle(&active.context(member_ids, &self.config)) {
            Some(effects) => {
                debug!(room_id = room.id, card_id = active.card.id, "consensus settled on poll");
                self.finish_card(txn, room, members, active.card.id, &effects)
                    .await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply effects, update card statistics and clear the current card.
    async fn finish_card(
        &self,
        txn: &DatabaseTransaction,
        room: &Room,
        members: &[Membership],
        card_id: i64,
        effects: &[ScoreEffect],
    ) -> Result<(), DomainError> {
        let ids = membership_ids(members);
        for effect in effects {
            // Effects only name current members; anyone else left mid-card.
            let Some(&membership_id) = ids.get(&effect.user_id) else {
                continue;
            };
            memberships::apply_delta(txn, membership_id, ScoreDelta::from(effect)).await?;
            if let Some(outcome) = effect.outcome {
                stats::record_card_outcome(txn, effect.user_id, card_id, outcome).await?;
            }
        }
        rooms::set_current_card(txn, room.id, None).await?;
        info!(room_id = room.id, card_id, effects = effects.len(), "card_resolved");
        Ok(())
    }
}

fn no_active_card() -> DomainError {
    DomainError::conflict(ConflictKind::NoActiveCard, "There is no card in play")
}

/// Points desc; the stable sort keeps join order among equals.
async fn standings(
    txn: &DatabaseTransaction,
    members: &[Membership],
) -> Result<Vec<PlayerStanding>, DomainError> {
    let ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
    let names: HashMap<i64, String> = users::display_names(txn, &ids).await?;
    let mut players: Vec<PlayerStanding> = members
        .iter()
        .map(|m| PlayerStanding {
            user_id: m.user_id,
            display_name: names.get(&m.user_id).cloned().unwrap_or_default(),
            points: m.points,
            drinks: m.drinks,
        })
        .collect();
    players.sort_by(|a, b| b.points.cmp(&a.points));
    Ok(players)
}

fn card_view(active: &ActiveCard) -> CardView {
    CardView {
        id: active.card.id,
        title: active.card.title.clone(),
        content: active.card.content.clone(),
        points: active.card.points,
        difficulty: active.card.difficulty,
        timer_seconds: active.card.timer_seconds,
        mode: active.mode.slug,
        mode_name: active.mode.display_name.clone(),
    }
}

fn progress_view(active: &ActiveCard, member_ids: &[i64]) -> Option<CardProgressView> {
    match active.rules.gate() {
        Gate::Completion => None,
        Gate::Consensus => {
            let statements = active.progress.statements();
            Some(CardProgressView {
                votes_cast: active.progress.member_votes(member_ids).count(),
                votes_needed: member_ids.len(),
                teller_id: statements.map(|s| s.teller),
                statements: statements.map(|s| s.statements.clone()),
                ..Default::default()
            })
        }
        Gate::HotPotato => Some(CardProgressView {
            holder_id: active.progress.holder(),
            passes: active.progress.passes(),
            ..Default::default()
        }),
    }
}
