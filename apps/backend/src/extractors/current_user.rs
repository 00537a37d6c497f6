use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use tracing::warn;

use crate::auth::jwt::Claims;
use crate::error::AppError;
use crate::repos::users::{self, User};
use crate::state::app_state::AppState;
use crate::web::trace_ctx;

/// The authenticated caller, resolved from JWT claims to a `users` row.
///
/// Requires `JwtExtract` to have run; a missing claim is a 401 and a `sub`
/// with no matching user is a 403.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub display_name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            sub: user.sub,
            display_name: user.display_name,
        }
    }
}

impl CurrentUser {
    pub fn as_user(&self) -> User {
        User {
            id: self.id,
            sub: self.sub.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(AppError::unauthorized)?;
            let state =
                state.ok_or_else(|| AppError::internal("AppState not available"))?;

            match users::find_by_sub(state.db(), &claims.sub).await? {
                Some(user) => Ok(user.into()),
                None => {
                    warn!(trace_id = %trace_ctx::trace_id(), sub = %claims.sub, "token subject has no user record");
                    Err(AppError::forbidden_user_not_found())
                }
            }
        })
    }
}
