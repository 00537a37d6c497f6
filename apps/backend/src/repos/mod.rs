//! Repository functions: adapter calls wrapped into domain models with
//! `DomainError` failures.

pub mod cards;
pub mod game_actions;
pub mod game_modes;
pub mod games;
pub mod memberships;
pub mod rooms;
pub mod stats;
pub mod users;
