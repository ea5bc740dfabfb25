//! Spoonacular recipe API client.
//!
//! Keyword queries hit `/complexSearch` and read `results`; blank queries hit
//! `/random` and read `recipes`. Each raw entry is normalized into a `Recipe`;
//! entries without a numeric `id` are dropped.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RecipeError, RecipeQuery, RecipeSource};
use crate::config::RecipeApiConfig;
use crate::model::Recipe;

/// Fallback link when the API provides no source URL at all.
pub const PLACEHOLDER_SOURCE_URL: &str = "#";

pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    results: u32,
}

impl std::fmt::Debug for SpoonacularClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularClient")
            .field("base_url", &self.base_url)
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}

impl SpoonacularClient {
    /// # Errors
    ///
    /// Returns [`RecipeError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &RecipeApiConfig) -> Result<Self, RecipeError> {
        let builder = reqwest::Client::builder();
        // The browser fetch backend has no client-level timeouts.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        let http = builder.build().map_err(|e| RecipeError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            results: config.results,
        })
    }

    /// Fetch and normalize recipes, reporting failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`RecipeError`] on transport failure, a non-2xx status, or a
    /// body that is not a JSON object.
    pub async fn fetch(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RecipeError> {
        let request = self.build_request(query)?;
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| RecipeError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RecipeError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(RecipeError::ApiResponse { status: status.as_u16(), body: text });
        }
        parse_recipes(query, &text)
    }

    pub(crate) fn build_request(&self, query: &RecipeQuery) -> Result<reqwest::Request, RecipeError> {
        let number = self.results.to_string();
        let builder = match query {
            RecipeQuery::Keyword(term) => self.http.get(format!("{}/complexSearch", self.base_url)).query(&[
                ("apiKey", self.api_key.as_str()),
                ("query", term.as_str()),
                ("number", number.as_str()),
                ("addRecipeInformation", "true"),
                ("fillIngredients", "true"),
            ]),
            RecipeQuery::Random => self
                .http
                .get(format!("{}/random", self.base_url))
                .query(&[("apiKey", self.api_key.as_str()), ("number", number.as_str())]),
        };
        builder
            .build()
            .map_err(|e| RecipeError::ApiRequest(e.to_string()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RecipeSource for SpoonacularClient {
    async fn search(&self, query: &str) -> Vec<Recipe> {
        let query = RecipeQuery::from_text(query);
        match self.fetch(&query).await {
            Ok(recipes) => {
                debug!(?query, count = recipes.len(), "recipes fetched");
                recipes
            }
            Err(e) => {
                warn!(?query, error = %e, "recipe fetch failed, returning no results");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ready_in_minutes: Option<u32>,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    spoonacular_source_url: Option<String>,
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        let source_url = [raw.source_url, raw.spoonacular_source_url]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_SOURCE_URL.to_owned());
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            image: raw.image.unwrap_or_default(),
            ready_in_minutes: raw.ready_in_minutes.unwrap_or_default(),
            servings: raw.servings.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            source_url,
        }
    }
}

/// Pull the result array for `query` out of a response body and normalize it.
pub(crate) fn parse_recipes(query: &RecipeQuery, body: &str) -> Result<Vec<Recipe>, RecipeError> {
    let value: Value = serde_json::from_str(body).map_err(|e| RecipeError::ApiParse(e.to_string()))?;
    let Value::Object(mut root) = value else {
        return Err(RecipeError::ApiParse("expected a JSON object".to_owned()));
    };
    let field = match query {
        RecipeQuery::Keyword(_) => "results",
        RecipeQuery::Random => "recipes",
    };
    let Some(Value::Array(entries)) = root.remove(field) else {
        return Ok(Vec::new());
    };

    let total = entries.len();
    let recipes: Vec<Recipe> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawRecipe>(entry).ok())
        .map(Recipe::from)
        .collect();
    if recipes.len() != total {
        warn!(dropped = total - recipes.len(), "skipped malformed recipe entries");
    }
    Ok(recipes)
}

#[cfg(test)]
#[path = "spoonacular_test.rs"]
mod tests;
