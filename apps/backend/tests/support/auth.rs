//! JWT helpers for route tests

use std::time::{Duration, SystemTime};

use partyroom::auth::jwt::mint_access_token;
use partyroom::state::security_config::SecurityConfig;

use super::factory::test_sub;

/// Mint a bearer token for the user created under `name`.
pub fn mint_test_token(name: &str, sec: &SecurityConfig) -> String {
    let sub = test_sub(name);
    let email = format!("{sub}@example.test");
    mint_access_token(&sub, &email, SystemTime::now(), sec).expect("should mint token successfully")
}

/// Full `Authorization` header value.
pub fn bearer_header(name: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(name, sec))
}

/// Token issued two hours ago, already past its expiry.
pub fn mint_expired_token(name: &str, sec: &SecurityConfig) -> String {
    let sub = test_sub(name);
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .expect("clock should be past the epoch");
    mint_access_token(&sub, "expired@example.test", past, sec)
        .expect("should mint expired token successfully")
}
