//! Client-side orchestration for the marketplace catalog backend: session
//! detection, product search and category listing, each with its own
//! loading/result/error lifecycle.

use std::sync::Arc;

use anyhow::Result;
use url::Url;

pub mod categories;
pub mod classifier;
pub mod error;
mod flow;
pub mod search;
pub mod session;
pub mod settings;
pub mod transport;
pub mod types;

pub use categories::{CategoryController, CategoryState};
pub use classifier::{classify, Flow};
pub use error::{ErrorKind, ErrorMessage, RequestFailure};
pub use search::{secure_thumbnail, PendingRequest, SearchController, SearchState};
pub use session::{SessionProbe, SessionStatus};
pub use settings::{load_settings, ClientSettings};
pub use transport::{CatalogBackend, HttpBackend};
pub use types::{Dispatch, FlowState};

/// What the header shows: the signed-in identity or a link to sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAffordance {
    SignedIn(shared::domain::SessionInfo),
    LoginLink(Url),
}

/// Everything presentation needs for one frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub login: LoginAffordance,
    pub search: SearchState,
    pub categories: CategoryState,
}

pub struct CatalogClient {
    login_url: Url,
    session: SessionProbe,
    search: SearchController,
    categories: CategoryController,
}

impl CatalogClient {
    pub fn new(backend: Arc<dyn CatalogBackend>, settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            login_url: settings.login_url()?,
            session: SessionProbe::new(Arc::clone(&backend), settings.auth_marker.clone()),
            search: SearchController::new(Arc::clone(&backend)),
            categories: CategoryController::new(backend),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let backend = Arc::new(HttpBackend::from_settings(settings)?);
        Self::new(backend, settings)
    }

    /// Runs the startup session probe.
    pub async fn start(&self) -> &SessionStatus {
        self.session.probe().await
    }

    pub fn session(&self) -> &SessionProbe {
        &self.session
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn categories(&self) -> &CategoryController {
        &self.categories
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub fn login_affordance(&self) -> LoginAffordance {
        match self.session.status().and_then(SessionStatus::info) {
            Some(info) => LoginAffordance::SignedIn(info.clone()),
            None => LoginAffordance::LoginLink(self.login_url.clone()),
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            login: self.login_affordance(),
            search: self.search.state(),
            categories: self.categories.state(),
        }
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
