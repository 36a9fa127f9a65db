use std::sync::Arc;
use tokio::sync::RwLock;

/// Session established by assuming a role
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub roles: Vec<String>,
}

/// Session context shared between the API client and the screens that
/// establish or end a session.
///
/// Cloning is cheap; all clones observe the same session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session id (e.g. passed on the command line)
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Session {
                session_id: session_id.into(),
                roles: Vec::new(),
            }))),
        }
    }

    /// Set the session after a successful role assumption
    pub async fn set_session(&self, session_id: impl Into<String>, roles: Vec<String>) {
        let session_id = session_id.into();
        tracing::debug!("Session set: {}", session_id);
        *self.inner.write().await = Some(Session { session_id, roles });
    }

    /// Replace the roles of the current session; no-op without a session
    pub async fn set_roles(&self, roles: Vec<String>) {
        if let Some(session) = self.inner.write().await.as_mut() {
            session.roles = roles;
        }
    }

    /// End the session (logout or expiry)
    pub async fn clear(&self) {
        if self.inner.write().await.take().is_some() {
            tracing::debug!("Session cleared");
        }
    }

    /// Current session id, if any
    pub async fn session_id(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.session_id.clone())
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }
}
