//! Web search tool backed by the Exa search API
//!
//! Results carry the page text cut to `text_length_limit` characters so a
//! handful of hits fit comfortably in the model's context.

use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args, require};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_KEY_ENV: &str = "EXA_API_KEY";
const EXA_BASE_URL: &str = "https://api.exa.ai";
const DEFAULT_NUM_RESULTS: u32 = 5;
const MAX_NUM_RESULTS: u32 = 10;

fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchArgs {
    /// The search query
    query: String,
    /// Number of results to return (1-10, default 5)
    #[serde(default = "default_num_results")]
    num_results: u32,
}

/// Exa web search
pub struct ExaSearchTool {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    text_length_limit: usize,
}

impl ExaSearchTool {
    pub fn new(api_key: String, text_length_limit: usize) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: EXA_BASE_URL.to_string(),
            text_length_limit,
        }
    }

    /// Point the tool at another server (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn truncate(&self, text: &str) -> String {
        text.chars().take(self.text_length_limit).collect()
    }
}

#[async_trait]
impl Tool for ExaSearchTool {
    fn name(&self) -> &str {
        "search_exa"
    }

    fn description(&self) -> &str {
        "Search the web with Exa for up-to-date information, articles and learning resources"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<SearchArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: SearchArgs = parse_args(self.name(), args)?;
        require(self.name(), "query", &args.query)?;
        let num_results = args.num_results.clamp(1, MAX_NUM_RESULTS);

        let body = json!({
            "query": args.query,
            "numResults": num_results,
            "contents": {
                "text": { "maxCharacters": self.text_length_limit }
            }
        });

        debug!(query = %args.query, num_results, "Exa search");

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Exa search failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Exa API error ({}): {}",
                status, error_text
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse Exa response: {}", e)))?;

        let results: Vec<Value> = payload["results"]
            .as_array()
            .map(|results| {
                results
                    .iter()
                    .map(|r| {
                        json!({
                            "title": r["title"].as_str().unwrap_or_default(),
                            "url": r["url"].as_str().unwrap_or_default(),
                            "published_date": r["publishedDate"].as_str(),
                            "author": r["author"].as_str(),
                            "text": self.truncate(r["text"].as_str().unwrap_or_default()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({
            "query": args.query,
            "results": results,
            "count": results.len(),
        }))
    }
}
