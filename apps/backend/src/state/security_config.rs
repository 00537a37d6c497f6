use jsonwebtoken::Algorithm;

use crate::config::db::must_var;
use crate::error::AppError;

/// Configuration for JWT security settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Read `APP_JWT_SECRET`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = must_var("APP_JWT_SECRET")?;
        if secret.len() < 16 {
            return Err(AppError::config(
                "APP_JWT_SECRET must be at least 16 bytes",
            ));
        }
        Ok(Self::new(secret.into_bytes()))
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
