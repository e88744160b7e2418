use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;

use super::context::{IdentityOutcome, VerifiedIdentity};

/// Reasons a bearer credential failed verification.
///
/// Stored in request extensions, so it carries rendered detail instead of the
/// underlying `jsonwebtoken` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("missing or malformed authorization header")]
    MalformedHeader,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("missing 'uid' claim")]
    MissingClaim,
    #[error("invalid 'uid' claim (expected integer)")]
    InvalidClaim,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

/// Claim set the gateway cares about. Everything else in the token is ignored.
///
/// `uid` stays a raw JSON value: issuers commonly emit it as a float (`42.0`).
#[derive(Debug, Clone, Deserialize)]
struct IdentityClaims {
    #[serde(default)]
    uid: Option<serde_json::Value>,
}

/// HMAC (shared secret) identity-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // exp/nbf are checked when present but not required; the issuer decides.
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify a token and fold the result into an [`IdentityOutcome`].
    ///
    /// Failures are data, not errors: whoever needs the identity decides
    /// whether to reject.
    pub fn verify(&self, token: &str) -> IdentityOutcome {
        match self.verify_identity(token) {
            Ok(identity) => IdentityOutcome::Verified(identity),
            Err(err) => IdentityOutcome::Invalid(err),
        }
    }

    pub fn verify_identity(&self, token: &str) -> Result<VerifiedIdentity, VerifyError> {
        let data =
            jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)?;

        let uid = data.claims.uid.ok_or(VerifyError::MissingClaim)?;
        let user_id = uid_from_claim(&uid)?;

        Ok(VerifiedIdentity { user_id })
    }
}

// Integers pass through; floats only when they are integral and fit in i64.
fn uid_from_claim(value: &serde_json::Value) -> Result<i64, VerifyError> {
    let serde_json::Value::Number(n) = value else {
        return Err(VerifyError::InvalidClaim);
    };

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }

    match n.as_f64() {
        Some(f)
            if f.is_finite()
                && f.fract() == 0.0
                && f >= i64::MIN as f64
                && f < i64::MAX as f64 =>
        {
            Ok(f as i64)
        }
        _ => Err(VerifyError::InvalidClaim),
    }
}
