use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tower_sessions::Session;
use wedding_app::domain::CoupleRole;
use wedding_app::AppContext;
use wedding_errors::AppError;

const VOTER_KEY: &str = "voter_key";
const COUPLE_ROLE_HEADER: &str = "x-couple-role";

/// Caller presented the admin bearer token.
pub struct AdminAuth;

impl<S> FromRequestParts<S> for AdminAuth
where
    AppContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AppContext::from_ref(state);
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        if !tokens_match(token.trim().as_bytes(), ctx.admin_token.as_bytes()) {
            tracing::warn!("Rejected admin request with a wrong token");
            return Err(AppError::Unauthorized);
        }

        Ok(AdminAuth)
    }
}

/// Verified bride or groom. Requires the admin token plus `X-Couple-Role`.
pub struct CoupleRoleClaim(pub CoupleRole);

impl<S> FromRequestParts<S> for CoupleRoleClaim
where
    AppContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AdminAuth::from_request_parts(parts, state).await?;

        let role = parts
            .headers
            .get(COUPLE_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Forbidden("Only the bride or groom can do that".to_string()))?
            .parse()?;

        Ok(CoupleRoleClaim(role))
    }
}

fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Voter key of this browser session, created on first use.
pub async fn voter_key(session: &Session) -> Result<String, AppError> {
    if let Some(key) = current_voter_key(session).await {
        return Ok(key);
    }

    let key = uuid::Uuid::new_v4().to_string();
    session.insert(VOTER_KEY, &key).await.map_err(|e| {
        tracing::error!("Failed to store voter key: {}", e);
        AppError::Internal("session unavailable".to_string())
    })?;
    Ok(key)
}

pub async fn current_voter_key(session: &Session) -> Option<String> {
    session.get::<String>(VOTER_KEY).await.ok().flatten()
}
