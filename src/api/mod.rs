mod client;

pub use client::ForkifyClient;

use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One hit in a search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    pub source_url: String,
}

/// Raw recipe data as returned by the API, before ingredient parsing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipePayload {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    pub source_url: String,
    /// Free-text ingredient lines
    pub ingredients: Vec<String>,
    /// Servings as reported by the source, if it reports them at all
    pub servings: Option<u32>,
}

/// Anything that can answer recipe searches and recipe lookups
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "forkify")
    fn source_name(&self) -> &str;

    /// Every result the source has for `query`
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError>;

    /// The full recipe with the given id
    async fn recipe(&self, id: &str) -> Result<RecipePayload, FetchError>;
}
