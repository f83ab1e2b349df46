//! Hand-driven backend for lifecycle tests: every call waits until the test
//! releases a reply for it.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use serde_json::json;
use shared::{
    domain::{Category, CategoryId, ProductId, ProductResult},
    protocol::SearchResponse,
};
use tokio::sync::oneshot;

use crate::{error::RequestFailure, transport::CatalogBackend};

pub(crate) type Reply<T> = oneshot::Sender<Result<T, RequestFailure>>;

struct Script<T> {
    pending: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Result<T, RequestFailure>>>>>,
    calls: AtomicUsize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl<T> Script<T> {
    fn expect(&self, key: &str) -> Reply<T> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("script lock")
            .entry(key.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    async fn answer(&self, key: &str) -> Result<T, RequestFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .pending
            .lock()
            .expect("script lock")
            .get_mut(key)
            .and_then(VecDeque::pop_front);
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(RequestFailure::Transport("reply dropped".into()))),
            None => Err(RequestFailure::Transport(format!("unscripted call '{key}'"))),
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    home: Script<Option<String>>,
    search: Script<SearchResponse>,
    categories: Script<Vec<Category>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn expect_home(&self) -> Reply<Option<String>> {
        self.home.expect("")
    }

    pub(crate) fn expect_search(&self, query: &str) -> Reply<SearchResponse> {
        self.search.expect(query)
    }

    pub(crate) fn expect_categories(&self) -> Reply<Vec<Category>> {
        self.categories.expect("")
    }

    pub(crate) fn home_calls(&self) -> usize {
        self.home.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn category_calls(&self) -> usize {
        self.categories.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogBackend for ScriptedBackend {
    async fn home(&self) -> Result<Option<String>, RequestFailure> {
        self.home.answer("").await
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, RequestFailure> {
        self.search.answer(query).await
    }

    async fn categories(&self) -> Result<Vec<Category>, RequestFailure> {
        self.categories.answer("").await
    }
}

pub(crate) fn product(id: &str, title: &str, thumbnail: &str) -> ProductResult {
    ProductResult {
        id: ProductId::from(id),
        title: title.into(),
        thumbnail: thumbnail.into(),
        price: Some(500000.0),
        currency_id: "CLP".into(),
        category_id: CategoryId::from("MLC1055"),
        permalink: format!("https://articulo.mercadolibre.cl/{id}"),
    }
}

pub(crate) fn results(products: Vec<ProductResult>) -> SearchResponse {
    SearchResponse {
        results: products,
        ..SearchResponse::default()
    }
}

pub(crate) fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.into(),
    }
}

pub(crate) fn iphone_response() -> serde_json::Value {
    json!({
        "query": "iPhone 15",
        "results": [{
            "id": 1,
            "title": "iPhone 15",
            "thumbnail": "http://x/y.jpg",
            "price": 500000,
            "currency_id": "CLP",
            "category_id": "MLC1",
            "permalink": "http://articulo.mercadolibre.cl/MLC-1"
        }],
        "original_count": 1
    })
}
