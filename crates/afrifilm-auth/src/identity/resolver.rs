//! Resolves bearer tokens and session cookies to an [`Identity`].

use std::sync::Arc;

use tracing::debug;

use afrifilm_core::result::AppResult;
use afrifilm_database::UserStore;

use super::principal::{Identity, Principal};
use crate::jwt::JwtDecoder;

/// Raw credentials extracted from a request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Token from an `Authorization: Bearer` header.
    pub bearer: Option<String>,
    /// Token from the session cookie.
    pub session_cookie: Option<String>,
}

impl Credentials {
    /// Candidate tokens in resolution order: bearer first, then cookie.
    fn candidates(&self) -> impl Iterator<Item = &str> {
        self.bearer
            .iter()
            .chain(self.session_cookie.iter())
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Turns credentials into an identity.
///
/// The first candidate that decodes to a valid, unexpired token whose user
/// still exists wins. Malformed, expired or orphaned credentials resolve to
/// [`Identity::Anonymous`]. Only store failures surface as errors.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    /// Creates a resolver backed by the given user store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Resolve the caller.
    pub async fn resolve(&self, credentials: &Credentials) -> AppResult<Identity> {
        for token in credentials.candidates() {
            let claims = match self.decoder.decode(token) {
                Ok(claims) => claims,
                Err(e) => {
                    debug!(reason = %e.message, "Ignoring invalid credential");
                    continue;
                }
            };

            match self.users.find_by_id(claims.user_id()).await? {
                Some(user) => return Ok(Identity::Authenticated(Principal::from(&user))),
                None => {
                    debug!(user_id = %claims.user_id(), "Credential references a deleted user");
                }
            }
        }

        Ok(Identity::Anonymous)
    }
}
