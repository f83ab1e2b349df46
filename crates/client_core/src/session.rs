use std::sync::Arc;

use shared::domain::SessionInfo;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::transport::CatalogBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated(SessionInfo),
    Anonymous,
}

impl SessionStatus {
    pub fn info(&self) -> Option<&SessionInfo> {
        match self {
            Self::Authenticated(info) => Some(info),
            Self::Anonymous => None,
        }
    }
}

/// One-shot check of whether the backend already holds a signed-in session.
///
/// The result is computed once and never refreshed; finishing the marketplace
/// sign-in only shows up after the client is started again.
pub struct SessionProbe {
    backend: Arc<dyn CatalogBackend>,
    marker: String,
    status: OnceCell<SessionStatus>,
}

impl SessionProbe {
    pub fn new(backend: Arc<dyn CatalogBackend>, marker: impl Into<String>) -> Self {
        Self {
            backend,
            marker: marker.into(),
            status: OnceCell::new(),
        }
    }

    /// Runs the probe on first call; later calls return the first result.
    /// Failures only mean "not signed in".
    pub async fn probe(&self) -> &SessionStatus {
        self.status
            .get_or_init(|| async move {
                match self.backend.home().await {
                    Ok(Some(body)) if body.starts_with(&self.marker) => {
                        info!("backend session is authenticated");
                        SessionStatus::Authenticated(SessionInfo(body))
                    }
                    Ok(_) => SessionStatus::Anonymous,
                    Err(err) => {
                        warn!(%err, "session probe failed; showing login link");
                        SessionStatus::Anonymous
                    }
                }
            })
            .await
    }

    /// `None` until the probe has resolved.
    pub fn status(&self) -> Option<&SessionStatus> {
        self.status.get()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
