//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use afrifilm_auth::Principal;
use afrifilm_entity::user::User;
use afrifilm_service::LoginResult;

use crate::dto::request::{LoginBody, RegisterBody};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterBody>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.accounts.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
///
/// Returns the token for bearer clients and sets the session cookie for
/// browser clients.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> Result<(CookieJar, Json<LoginResult>), ApiError> {
    let result = state.accounts.login(&body.username, &body.password).await?;

    let cookie = Cookie::build((
        state.config.auth.session_cookie_name.clone(),
        result.token.token.clone(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(state.config.auth.secure_cookie);

    Ok((jar.add(cookie), Json(result)))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie = Cookie::build(state.config.auth.session_cookie_name.clone()).path("/");
    (
        jar.remove(cookie),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.accounts.me(&principal).await?))
}
