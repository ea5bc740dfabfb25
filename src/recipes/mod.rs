//! External recipe collaborator.
//!
//! DESIGN
//! ======
//! `RecipeSource` is the boundary the rest of the crate consumes: a query in,
//! normalized `Recipe` values out. Implementations are total. Transport,
//! status and parse failures are logged and surface as an empty result, the
//! same as a search with no hits.
//!
//! Results are returned to the caller rather than stored, so a slow response
//! to a superseded search is the caller's to discard. No sequencing or
//! cancellation happens here.

pub mod spoonacular;


use crate::model::Recipe;
pub use spoonacular::SpoonacularClient;

/// Errors from a single recipe API request, before they are absorbed.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The API returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    ApiParse(String),
}

/// What a free-text query asks the API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeQuery {
    /// Keyword search on recipe titles.
    Keyword(String),
    /// A randomized default selection.
    Random,
}

impl RecipeQuery {
    /// Blank or whitespace-only text requests the random selection.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() { Self::Random } else { Self::Keyword(trimmed.to_owned()) }
    }
}

/// Source of normalized recipes.
///
/// Futures are `Send` except on `wasm32`, where the browser fetch is not.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RecipeSource: Send + Sync {
    /// Recipes matching `query`, or a default selection for an empty query.
    /// Never fails; errors yield an empty sequence.
    async fn search(&self, query: &str) -> Vec<Recipe>;
}

/// Plain-text rendering of an HTML recipe summary: tags removed, common
/// entities decoded, whitespace collapsed.
#[must_use]
pub fn summary_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
