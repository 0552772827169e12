pub mod claims;
pub mod gate;
pub mod identity;
pub mod middleware;
pub mod policy;
pub mod session;

pub use claims::SessionClaims;
pub use gate::{resolve_session_state, SessionState};
pub use identity::{GitHubIdentityProvider, IdentityProvider, VerifiedIdentity};
pub use middleware::{AuthenticatedUser, SessionGate};
pub use session::{SessionService, SESSION_COOKIE};
