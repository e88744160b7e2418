/*
 * Responsibility
 * - middleware から必要な箇所まで運ぶリクエスト単位の identity
 * - middleware は request extensions に IdentityOutcome をちょうど 1 つ入れる
 *   (無い場合は middleware 未適用 = public route)
 */
use super::identity_jwt::VerifyError;

/// Identity proven by a verified bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: i64,
}

/// Result of verifying the request's credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityOutcome {
    Verified(VerifiedIdentity),
    Invalid(VerifyError),
}

/// What a handler hands to the backend client.
///
/// - `None`: no verification happened for this request
/// - `Some(Verified)` / `Some(Invalid)`: the middleware's verdict
#[derive(Debug, Clone, Default)]
pub struct AuthCtx {
    outcome: Option<IdentityOutcome>,
}

impl AuthCtx {
    pub fn new(outcome: IdentityOutcome) -> Self {
        Self {
            outcome: Some(outcome),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn verified(user_id: i64) -> Self {
        Self::new(IdentityOutcome::Verified(VerifiedIdentity { user_id }))
    }

    pub fn outcome(&self) -> Option<&IdentityOutcome> {
        self.outcome.as_ref()
    }

    pub fn identity(&self) -> Option<VerifiedIdentity> {
        match self.outcome {
            Some(IdentityOutcome::Verified(identity)) => Some(identity),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&VerifyError> {
        match &self.outcome {
            Some(IdentityOutcome::Invalid(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<Option<IdentityOutcome>> for AuthCtx {
    fn from(outcome: Option<IdentityOutcome>) -> Self {
        Self { outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_and_invalid_are_exclusive() {
        let ok = AuthCtx::verified(3);
        assert_eq!(ok.identity(), Some(VerifiedIdentity { user_id: 3 }));
        assert!(ok.error().is_none());

        let bad = AuthCtx::new(IdentityOutcome::Invalid(VerifyError::InvalidSignature));
        assert!(bad.identity().is_none());
        assert_eq!(bad.error(), Some(&VerifyError::InvalidSignature));
    }

    #[test]
    fn anonymous_carries_nothing() {
        let ctx = AuthCtx::anonymous();
        assert!(ctx.outcome().is_none());
        assert!(ctx.identity().is_none());
        assert!(ctx.error().is_none());
    }
}
