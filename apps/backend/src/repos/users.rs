//! Read access to identity records owned by the auth collaborator.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub sub: String,
    pub display_name: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            display_name: model.display_name,
        }
    }
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_sub(conn, sub).await?.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_id(conn, user_id).await?.map(User::from))
}

/// Find the user for `sub`, inserting one when the identity layer has not yet.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
    display_name: &str,
) -> Result<User, DomainError> {
    if let Some(user) = find_by_sub(conn, sub).await? {
        return Ok(user);
    }
    Ok(users_adapter::create_user(conn, sub, display_name).await?.into())
}

/// Display names keyed by user id; unknown ids are simply absent.
pub async fn display_names<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<HashMap<i64, String>, DomainError> {
    let rows = users_adapter::find_by_ids(conn, user_ids).await?;
    Ok(rows.into_iter().map(|u| (u.id, u.display_name)).collect())
}
