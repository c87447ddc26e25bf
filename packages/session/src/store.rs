// ABOUTME: Durable token/user persistence under ~/.taskdeck with atomic state transitions
// ABOUTME: The API gateway holds a clone of the store so a 401 can force ANONYMOUS

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use taskdeck_core::User;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

const TOKEN_FILE: &str = "session.toml";
const PROFILE_FILE: &str = "profile.json";

/// Authentication state; there are no intermediate states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Token payload persisted to disk
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

#[derive(Debug, Default)]
struct Inner {
    token: Option<String>,
    user: Option<User>,
    /// Bumped on every state transition; stale fetch results compare against it
    epoch: u64,
}

/// Read/write handle to the current session, shared across components.
///
/// Cloning is cheap; all clones observe the same state. Transitions are
/// atomic from the caller's perspective: the lock is held across the
/// in-memory update, and files are written before the state flips.
#[derive(Clone)]
pub struct SessionStore {
    dir: PathBuf,
    inner: Arc<RwLock<Inner>>,
}

impl SessionStore {
    /// Create a store persisting under `~/.taskdeck`
    pub fn new() -> SessionResult<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| SessionError::config("Could not determine home directory"))?;
        Ok(Self::with_dir(home_dir.join(".taskdeck")))
    }

    /// Create a store persisting under an explicit directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Restore a previous session from disk.
    ///
    /// A missing token leaves the store ANONYMOUS. A corrupt profile is
    /// discarded while the token is still honored until the next request
    /// fails authorization.
    pub async fn restore(&self) -> SessionResult<()> {
        let token = match fs::read_to_string(self.token_path()).await {
            Ok(content) => match toml::from_str::<StoredToken>(&content) {
                Ok(stored) => Some(stored.token),
                Err(err) => {
                    warn!("Discarding unreadable session token: {err}");
                    None
                }
            },
            Err(_) => None,
        };
        if token.is_none() {
            debug!("No stored session found");
            return Ok(());
        }

        let user = match fs::read_to_string(self.profile_path()).await {
            Ok(content) => match serde_json::from_str::<User>(&content) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!("Discarding corrupt stored profile: {err}");
                    let _ = fs::remove_file(self.profile_path()).await;
                    None
                }
            },
            Err(_) => None,
        };

        let mut inner = self.inner.write().await;
        inner.token = token;
        inner.user = user;
        inner.epoch += 1;
        Ok(())
    }

    /// Persist a new session and transition to AUTHENTICATED
    pub async fn set_session(&self, token: String, user: User) -> SessionResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let token_toml = toml::to_string_pretty(&StoredToken {
            token: token.clone(),
        })
        .map_err(|e| SessionError::storage(format!("Failed to serialize token: {e}")))?;
        fs::write(self.token_path(), token_toml).await?;

        let profile_json = serde_json::to_string_pretty(&user)
            .map_err(|e| SessionError::storage(format!("Failed to serialize profile: {e}")))?;
        fs::write(self.profile_path(), profile_json).await?;

        let mut inner = self.inner.write().await;
        inner.token = Some(token);
        inner.user = Some(user);
        inner.epoch += 1;
        debug!("Session persisted, now authenticated");
        Ok(())
    }

    /// Remove the persisted session and transition to ANONYMOUS.
    ///
    /// This is the logout path, and the only path besides it is the API
    /// gateway reacting to an authorization failure.
    pub async fn clear_session(&self) -> SessionResult<()> {
        for path in [self.token_path(), self.profile_path()] {
            if let Err(err) = fs::remove_file(&path).await {
                if err.kind() != std::io::ErrorKind::NotFound {
                    return Err(err.into());
                }
            }
        }

        let mut inner = self.inner.write().await;
        inner.token = None;
        inner.user = None;
        inner.epoch += 1;
        debug!("Session cleared, now anonymous");
        Ok(())
    }

    /// Current state of the ANONYMOUS/AUTHENTICATED machine
    pub async fn state(&self) -> SessionState {
        if self.inner.read().await.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await == SessionState::Authenticated
    }

    /// The bearer token, if authenticated
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    /// The current user identity. Can be absent while a token is still
    /// honored (corrupt stored profile).
    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    /// Monotonic transition counter. Fetches capture it before awaiting the
    /// network and discard their result if it changed underneath them.
    pub async fn epoch(&self) -> u64 {
        self.inner.read().await.epoch
    }
}
