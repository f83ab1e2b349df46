use serde::{Deserialize, Serialize};

use crate::domain::{null_as_default, Category, ProductResult};

pub const HOME_PATH: &str = "";
pub const SEARCH_PATH: &str = "buscar";
pub const CATEGORIES_PATH: &str = "categorias";
pub const LOGIN_PATH: &str = "login";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ProductResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_count: u64,
}

/// `/categorias` answers with a bare array; `null` reads as an empty listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryListing(#[serde(deserialize_with = "null_as_default")] pub Vec<Category>);
