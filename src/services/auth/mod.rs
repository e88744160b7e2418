pub mod context;
pub mod identity_jwt;

pub use context::{AuthCtx, IdentityOutcome, VerifiedIdentity};
pub use identity_jwt::{TokenVerifier, VerifyError};
