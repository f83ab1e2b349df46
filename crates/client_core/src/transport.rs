use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{cookie::Jar, header::CONTENT_TYPE, Client, Response};
use shared::{
    domain::Category,
    error::ApiErrorBody,
    protocol::{
        CategoryListing, SearchParams, SearchResponse, CATEGORIES_PATH, HOME_PATH, SEARCH_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::{error::RequestFailure, settings::ClientSettings};

/// The catalog backend as seen by the controllers.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Body of `GET /` when it is text (or a JSON string), `None` for any other shape.
    async fn home(&self) -> Result<Option<String>, RequestFailure>;
    async fn search(&self, query: &str) -> Result<SearchResponse, RequestFailure>;
    async fn categories(&self) -> Result<Vec<Category>, RequestFailure>;
}

/// reqwest-backed client that keeps the backend session cookie between calls.
pub struct HttpBackend {
    http: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_cookie_jar(base_url, Arc::new(Jar::default()))
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let base_url = settings.base_url()?;
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = settings.session_cookie.as_deref() {
            jar.add_cookie_str(cookie, &base_url);
            debug!(base_url = %base_url, "seeded session cookie");
        }
        Self::with_cookie_jar(base_url, jar)
    }

    fn with_cookie_jar(base_url: Url, jar: Arc<Jar>) -> Result<Self> {
        let http = Client::builder()
            .cookie_provider(jar)
            .build()
            .context("failed to build backend HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestFailure> {
        self.base_url
            .join(path)
            .map_err(|err| RequestFailure::Transport(format!("invalid endpoint '{path}': {err}")))
    }

    async fn get(&self, path: &str, query: Option<&SearchParams>) -> Result<Response, RequestFailure> {
        let url = self.endpoint(path)?;
        debug!(endpoint = %url.path(), "GET");

        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ApiErrorBody>(&bytes).ok(),
            Err(_) => None,
        };
        debug!(endpoint = path, status = status.as_u16(), ?body, "backend rejected request");
        Err(RequestFailure::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn home(&self) -> Result<Option<String>, RequestFailure> {
        let response = self.get(HOME_PATH, None).await?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let body = response.text().await?;
        debug!(endpoint = "/", %body, "home response");
        Ok(home_text(is_json, body))
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, RequestFailure> {
        let params = SearchParams {
            q: query.to_string(),
        };
        let response: SearchResponse = self
            .get(SEARCH_PATH, Some(&params))
            .await?
            .json()
            .await?;
        debug!(
            endpoint = "/buscar",
            results = response.results.len(),
            original_count = response.original_count,
            "search response"
        );
        Ok(response)
    }

    async fn categories(&self) -> Result<Vec<Category>, RequestFailure> {
        let CategoryListing(categories) = self
            .get(CATEGORIES_PATH, None)
            .await?
            .json::<CategoryListing>()
            .await?;
        debug!(endpoint = "/categorias", categories = categories.len(), "categories response");
        Ok(categories)
    }
}

fn home_text(is_json: bool, body: String) -> Option<String> {
    if !is_json {
        return Some(body);
    }
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => Some(body),
    }
}
