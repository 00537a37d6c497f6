use partyroom::repos::users::{self, User};
use partyroom::AppError;
use sea_orm::ConnectionTrait;

/// Stable `sub` for a display name, e.g. `Alice` -> `test-sub-alice`.
pub fn test_sub(name: &str) -> String {
    format!("test-sub-{}", name.to_lowercase())
}

/// Create (or fetch) a user keyed by display name.
pub async fn create_test_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<User, AppError> {
    Ok(users::ensure_user(conn, &test_sub(name), name).await?)
}
