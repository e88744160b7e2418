use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::{AuthCtx, IdentityOutcome};

/// Extractor that gives a handler the AuthCtx of its request.
/// Never rejects: a missing outcome (middleware did not run) becomes an
/// anonymous AuthCtx, and the backend client refuses task calls for it.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let outcome = parts.extensions.get::<IdentityOutcome>().cloned();
        Ok(AuthCtxExtractor(AuthCtx::from(outcome)))
    }
}
