//! Thin Google Gemini `generateContent` client.
//!
//! Authentication is a single API key resolved from config or environment
//! (see [`crate::config::Config::apply_env_overrides`]). The key travels in the
//! `x-goog-api-key` header so it never shows up in a request URL, and
//! therefore never in a `reqwest::Error` message or a log line.

use super::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use super::http_client::build_gemini_client_with_timeout;
use crate::config::GeminiConfig;
use crate::error::GeminiError;
use reqwest::{Client, StatusCode};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<&str>, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_gemini_client_with_timeout(timeout_secs),
        }
    }

    pub fn from_config(api_key: Option<&str>, config: &GeminiConfig) -> Self {
        Self::new(api_key, &config.base_url, config.timeout_secs)
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        )
    }

    /// POST one `generateContent` request and decode the response body.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingKey)?;
        let url = self.endpoint(model);
        tracing::debug!(%url, "gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %model, "gemini request rejected");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GeminiError::Auth {
                    model: model.to_string(),
                    status: status.as_u16(),
                },
                StatusCode::TOO_MANY_REQUESTS => GeminiError::RateLimited {
                    model: model.to_string(),
                },
                _ => GeminiError::Request {
                    model: model.to_string(),
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let bytes = response.bytes().await?;
        let result: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        if let Some(err) = result.error.as_ref() {
            return Err(GeminiError::Api(err.message.clone()));
        }

        if let Some(version) = result.model_version.as_deref() {
            tracing::debug!(model_version = version, "gemini response received");
        }

        Ok(result)
    }
}
