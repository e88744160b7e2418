//! Bearer token verification → `IdentityOutcome` in request extensions.
//!
//! - Never rejects: the outcome (verified or not) is attached and the next
//!   stage always runs. Task operations decide later (see `rpc::client`).
//! - Applied to protected routes only; public routes see no outcome at all.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::{IdentityOutcome, TokenVerifier, VerifyError};

/// Attach identity verification to every route of `router`.
///
/// ```ignore
/// let private = Router::new().route("/createtask", post(create_task));
/// let private = middleware::auth::identity::apply(private, state.verifier.clone());
/// ```
pub fn apply<S>(router: Router<S>, verifier: Arc<TokenVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // route_layer: unmatched paths fall through without being verified
    router.route_layer(middleware::from_fn_with_state(verifier, identity_middleware))
}

/// Token after `Bearer `, or `""` when the header is absent or not a bearer.
pub fn extract_bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
}

async fn identity_middleware(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = extract_bearer_token(req.headers());

    let outcome = if token.is_empty() {
        IdentityOutcome::Invalid(VerifyError::MalformedHeader)
    } else {
        verifier.verify(token)
    };

    if let IdentityOutcome::Invalid(err) = &outcome {
        tracing::warn!(reason = %err, "identity verification failed");
    }

    // middleware → extractor
    req.extensions_mut().insert(outcome);

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, http::StatusCode, routing::get};
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use tower::ServiceExt;

    const SECRET: &[u8] = b"middleware-secret";

    async fn echo(outcome: Option<Extension<IdentityOutcome>>) -> String {
        match outcome {
            Some(Extension(IdentityOutcome::Verified(id))) => format!("verified:{}", id.user_id),
            Some(Extension(IdentityOutcome::Invalid(err))) => format!("invalid:{err}"),
            None => "none".to_string(),
        }
    }

    fn app() -> Router {
        let private = Router::new().route("/private", get(echo));
        let private = apply(private, Arc::new(TokenVerifier::new(SECRET)));
        Router::new().route("/public", get(echo)).merge(private)
    }

    fn token(uid: i64, secret: &[u8]) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "uid": uid }),
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    async fn call(path: &str, auth: Option<String>) -> (StatusCode, String) {
        let mut req = Request::builder().uri(path);
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        let resp = app()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let (status, body) = call("/private", Some(format!("Bearer {}", token(7, SECRET)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "verified:7");
    }

    #[tokio::test]
    async fn missing_header_still_reaches_handler() {
        let (status, body) = call("/private", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "invalid:missing or malformed authorization header");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_malformed() {
        let (_, body) = call("/private", Some("Basic dXNlcjpwYXNz".into())).await;
        assert_eq!(body, "invalid:missing or malformed authorization header");
    }

    #[tokio::test]
    async fn foreign_signature_is_invalid() {
        let (status, body) =
            call("/private", Some(format!("Bearer {}", token(7, b"other")))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "invalid:invalid token signature");
    }

    #[tokio::test]
    async fn public_routes_are_not_verified() {
        let (_, body) = call("/public", Some(format!("Bearer {}", token(7, SECRET)))).await;
        assert_eq!(body, "none");
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), "");

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), "abc.def");

        headers.insert(header::AUTHORIZATION, "bearer abc.def".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), "");
    }
}
