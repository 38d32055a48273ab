//! Identity extractors.
//!
//! The identity resolver runs at most once per request; its outcome is
//! stashed in the request extensions so that a handler taking both
//! extractors does not resolve twice.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use afrifilm_auth::{Credentials, Identity, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's principal, or `None` for anonymous callers.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl MaybePrincipal {
    /// Borrow the principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

/// Read the bearer header and the session cookie.
fn credentials(parts: &Parts, cookie_name: &str) -> Credentials {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let session_cookie = CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|c| c.value().to_string());

    Credentials {
        bearer,
        session_cookie,
    }
}

async fn identify(parts: &mut Parts, state: &AppState) -> Result<Identity, ApiError> {
    if let Some(identity) = parts.extensions.get::<Identity>() {
        return Ok(identity.clone());
    }

    let creds = credentials(parts, &state.config.auth.session_cookie_name);
    let identity = state.identity.resolve(&creds).await?;
    parts.extensions.insert(identity.clone());
    Ok(identity)
}

impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = identify(parts, state).await?;
        Ok(Self(identity.principal().cloned()))
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(identify(parts, state).await?.require()?)
    }
}
