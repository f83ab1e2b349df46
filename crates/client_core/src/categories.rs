use std::sync::Arc;

use futures::FutureExt;
use shared::domain::Category;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    classifier::{classify, empty_result, Flow},
    error::RequestFailure,
    flow::FlowHandle,
    search::PendingRequest,
    transport::CatalogBackend,
    types::{Dispatch, FlowState},
};

pub type CategoryState = FlowState<Vec<Category>>;

pub struct CategoryController {
    backend: Arc<dyn CatalogBackend>,
    flow: Arc<FlowHandle<Vec<Category>>>,
}

impl CategoryController {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            flow: FlowHandle::new(Flow::Categories),
        }
    }

    pub fn begin(&self) -> PendingRequest {
        let ticket = self.flow.begin();
        let backend = Arc::clone(&self.backend);
        async move {
            debug!(endpoint = "/categorias", "loading categories");
            let outcome = backend.categories().await;
            ticket.settle(category_state(outcome))
        }
        .boxed()
    }

    pub async fn load_categories(&self) -> Dispatch {
        self.begin().await
    }

    pub fn state(&self) -> CategoryState {
        self.flow.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CategoryState> {
        self.flow.subscribe()
    }
}

fn category_state(outcome: Result<Vec<Category>, RequestFailure>) -> CategoryState {
    match outcome {
        Ok(categories) if categories.is_empty() => FlowState::Failed(empty_result(Flow::Categories)),
        Ok(categories) => FlowState::Loaded(categories),
        Err(failure) => {
            warn!(%failure, "category request failed");
            FlowState::Failed(classify(Flow::Categories, &failure))
        }
    }
}

#[cfg(test)]
#[path = "tests/categories_tests.rs"]
mod tests;
