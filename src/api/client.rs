use crate::api::{RecipePayload, RecipeSource, RecipeSummary};
use crate::config::ApiConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Client for the forkify recipe API
pub struct ForkifyClient {
    client: Client,
    base_url: String,
}

/// Recipe ids come back as strings from most endpoints and as numbers from some
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    String(String),
    Number(u64),
}

impl From<IdValue> for String {
    fn from(value: IdValue) -> Self {
        match value {
            IdValue::String(s) => s,
            IdValue::Number(n) => n.to_string(),
        }
    }
}

/// Either an `{"error": ...}` body or the expected payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiResponse<T> {
    Error { error: String },
    Ok(T),
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    recipes: Vec<WireSummary>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    recipe_id: IdValue,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
}

#[derive(Debug, Deserialize)]
struct RecipeBody {
    recipe: WireRecipe,
}

#[derive(Debug, Deserialize)]
struct WireRecipe {
    recipe_id: IdValue,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    servings: Option<u32>,
}

fn decode(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

impl From<WireSummary> for RecipeSummary {
    fn from(wire: WireSummary) -> Self {
        RecipeSummary {
            id: wire.recipe_id.into(),
            title: decode(&wire.title),
            publisher: decode(&wire.publisher),
            image_url: wire.image_url,
            source_url: wire.source_url,
        }
    }
}

impl From<WireRecipe> for RecipePayload {
    fn from(wire: WireRecipe) -> Self {
        RecipePayload {
            id: wire.recipe_id.into(),
            title: decode(&wire.title),
            publisher: decode(&wire.publisher),
            image_url: wire.image_url,
            source_url: wire.source_url,
            ingredients: wire.ingredients.iter().map(|line| decode(line)).collect(),
            servings: wire.servings,
        }
    }
}

impl ForkifyClient {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(ForkifyClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), params)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own message when the error body carries one
            if let Ok(ApiResponse::<serde_json::Value>::Error { error }) =
                serde_json::from_str(&body)
            {
                return Err(FetchError::Api(error));
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        match serde_json::from_str::<ApiResponse<T>>(&body) {
            Ok(ApiResponse::Ok(payload)) => Ok(payload),
            Ok(ApiResponse::Error { error }) => Err(FetchError::Api(error)),
            Err(e) => Err(FetchError::Malformed(format!("{}: {}", endpoint, e))),
        }
    }
}

#[async_trait]
impl RecipeSource for ForkifyClient {
    fn source_name(&self) -> &str {
        "forkify"
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        let body: SearchBody = self.get_json("search", &[("q", query)]).await?;
        debug!("Search '{}' returned {} recipes", query, body.recipes.len());
        Ok(body.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn recipe(&self, id: &str) -> Result<RecipePayload, FetchError> {
        let body: RecipeBody = self.get_json("get", &[("rId", id)]).await?;
        debug!(
            "Recipe '{}' has {} ingredient lines",
            id,
            body.recipe.ingredients.len()
        );
        Ok(body.recipe.into())
    }
}
