// ABOUTME: Session store holding the bearer token and current user identity
// ABOUTME: Persists both to disk and exposes the ANONYMOUS/AUTHENTICATED state machine

pub mod error;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use store::{SessionState, SessionStore};
