use super::ComparisonService;
use crate::catalog::{ComparisonResult, InfographicImage, ShoeRecord};
use crate::config::{Config, InfographicStyle, SearchOptions};
use crate::error::{GeminiError, Result};
use crate::prompt::{PromptBuilder, comparison_response_schema};
use crate::providers::GeminiClient;
use crate::providers::gemini_types::{
    Content, GeminiTool, GenerateContentRequest, GenerationConfig, ImageConfig,
};
use async_trait::async_trait;

/// [`ComparisonService`] backed by the Gemini `generateContent` API.
pub struct GeminiComparisonService {
    client: GeminiClient,
    prompts: PromptBuilder,
    comparison_model: String,
    image_model: String,
    search: SearchOptions,
    style: InfographicStyle,
}

impl GeminiComparisonService {
    pub fn new(
        client: GeminiClient,
        comparison_model: impl Into<String>,
        image_model: impl Into<String>,
        search: SearchOptions,
        style: InfographicStyle,
    ) -> Result<Self> {
        Ok(Self {
            client,
            prompts: PromptBuilder::new()?,
            comparison_model: comparison_model.into(),
            image_model: image_model.into(),
            search,
            style,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            GeminiClient::from_config(config.resolved_api_key(), &config.gemini),
            config.gemini.comparison_model.clone(),
            config.gemini.image_model.clone(),
            config.search.clone(),
            config.infographic.clone(),
        )
    }

    fn comparison_request(&self) -> Result<GenerateContentRequest> {
        let prompt = self.prompts.comparison_prompt(&self.search)?;
        Ok(GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            tools: Some(vec![GeminiTool::google_search()]),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(comparison_response_schema(&self.search)),
                ..GenerationConfig::default()
            },
        })
    }

    fn infographic_request(&self, shoes: &[ShoeRecord]) -> Result<GenerateContentRequest> {
        let prompt = self.prompts.infographic_prompt(shoes, &self.style)?;
        Ok(GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            tools: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["TEXT".into(), "IMAGE".into()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: self.style.aspect_ratio.clone(),
                }),
                ..GenerationConfig::default()
            },
        })
    }

    async fn try_infographic(&self, shoes: &[ShoeRecord]) -> Result<Option<InfographicImage>> {
        let request = self.infographic_request(shoes)?;
        let response = self
            .client
            .generate_content(&self.image_model, &request)
            .await?;

        Ok(response
            .first_inline_data()
            .map(|inline| InfographicImage::new(&inline.mime_type, &inline.data)))
    }
}

#[async_trait]
impl ComparisonService for GeminiComparisonService {
    async fn request_comparison(&self) -> Result<ComparisonResult> {
        let request = self.comparison_request()?;
        tracing::info!(model = %self.comparison_model, "requesting shoe comparison");

        let response = self
            .client
            .generate_content(&self.comparison_model, &request)
            .await?;

        let payload = response.text().unwrap_or_else(|| {
            tracing::warn!(
                finish_reason = response.finish_reason().unwrap_or("none"),
                "comparison reply carried no text"
            );
            "{}".to_string()
        });
        let mut result: ComparisonResult =
            serde_json::from_str(&payload).map_err(GeminiError::Payload)?;
        result.search_urls = response.grounding_uris();

        tracing::info!(
            shoes = result.shoes.len(),
            sources = result.search_urls.len(),
            "comparison received"
        );
        Ok(result)
    }

    async fn request_infographic(&self, shoes: &[ShoeRecord]) -> Option<InfographicImage> {
        tracing::info!(model = %self.image_model, shoes = shoes.len(), "requesting infographic");
        match self.try_infographic(shoes).await {
            Ok(Some(image)) => {
                tracing::info!(mime = %image.mime_type, "infographic received");
                Some(image)
            }
            Ok(None) => {
                tracing::warn!("image model returned no inline image");
                None
            }
            Err(e) => {
                tracing::warn!("Image generation failed: {e}");
                None
            }
        }
    }
}
