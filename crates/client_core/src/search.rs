use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};
use shared::{domain::ProductResult, protocol::SearchResponse};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    classifier::{classify, empty_result, Flow},
    error::RequestFailure,
    flow::FlowHandle,
    transport::CatalogBackend,
    types::{Dispatch, FlowState},
};

pub type SearchState = FlowState<Vec<ProductResult>>;

/// A dispatched request; awaiting it applies the response to the flow state.
pub type PendingRequest = BoxFuture<'static, Dispatch>;

pub struct SearchController {
    backend: Arc<dyn CatalogBackend>,
    flow: Arc<FlowHandle<Vec<ProductResult>>>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            flow: FlowHandle::new(Flow::Search),
        }
    }

    /// Switches to `Loading` right away and returns the request to drive.
    ///
    /// Blank queries return `None` and leave the state untouched. The query
    /// is sent as typed.
    pub fn begin(&self, query: &str) -> Option<PendingRequest> {
        if query.trim().is_empty() {
            debug!("ignoring blank search query");
            return None;
        }

        let ticket = self.flow.begin();
        let backend = Arc::clone(&self.backend);
        let query = query.to_string();
        Some(
            async move {
                debug!(endpoint = "/buscar", %query, "searching products");
                let outcome = backend.search(&query).await;
                ticket.settle(search_state(outcome))
            }
            .boxed(),
        )
    }

    pub async fn search(&self, query: &str) -> Dispatch {
        match self.begin(query) {
            Some(pending) => pending.await,
            None => Dispatch::Skipped,
        }
    }

    pub fn state(&self) -> SearchState {
        self.flow.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.flow.subscribe()
    }
}

fn search_state(outcome: Result<SearchResponse, RequestFailure>) -> SearchState {
    match outcome {
        Ok(response) => {
            let results: Vec<ProductResult> =
                response.results.into_iter().map(with_secure_thumbnail).collect();
            if results.is_empty() {
                FlowState::Failed(empty_result(Flow::Search))
            } else {
                FlowState::Loaded(results)
            }
        }
        Err(failure) => {
            warn!(%failure, "search request failed");
            FlowState::Failed(classify(Flow::Search, &failure))
        }
    }
}

fn with_secure_thumbnail(mut product: ProductResult) -> ProductResult {
    product.thumbnail = secure_thumbnail(&product.thumbnail);
    product
}

/// Upgrades a leading `http:` to `https:`; anything else is returned unchanged.
pub fn secure_thumbnail(url: &str) -> String {
    match url.strip_prefix("http:") {
        Some(rest) => format!("https:{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
