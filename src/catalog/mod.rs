//! Shared data contracts between the AI query service and the view.
//!
//! Every field here is a free-form display string produced by the model.
//! Nothing is parsed into numbers; the request schema is what keeps the
//! mandatory fields present.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use strum::Display;
use url::Url;

/// Maximum number of grounding sources shown in the sources panel.
pub const MAX_VISIBLE_SOURCES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeRecord {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub drop: String,
    #[serde(default)]
    pub link: String,
}

/// Badge colouring for a card, derived from the brand text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BrandTone {
    Nike,
    Adidas,
    Other,
}

impl ShoeRecord {
    pub fn brand_tone(&self) -> BrandTone {
        let brand = self.brand.to_lowercase();
        if brand.contains("nike") {
            BrandTone::Nike
        } else if brand.contains("adidas") {
            BrandTone::Adidas
        } else {
            BrandTone::Other
        }
    }

    /// `"{brand} {model} (Weight: {weight}, Drop: {drop})"`, as listed in the
    /// infographic prompt.
    pub fn infographic_line(&self) -> String {
        format!(
            "{} {} (Weight: {}, Drop: {})",
            self.brand, self.model, self.weight, self.drop
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    #[serde(default)]
    pub shoes: Vec<ShoeRecord>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub search_urls: Vec<String>,
}

/// A grounding source ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    /// Two-digit ordinal, `01`..`05`.
    pub ordinal: String,
    pub url: String,
    pub label: String,
    /// `url` when it is safe to link, see [`safe_link`].
    pub href: Option<String>,
}

impl ComparisonResult {
    /// The first [`MAX_VISIBLE_SOURCES`] source URLs, labelled by hostname.
    pub fn visible_sources(&self) -> Vec<SourceLink> {
        self.search_urls
            .iter()
            .take(MAX_VISIBLE_SOURCES)
            .enumerate()
            .map(|(idx, url)| SourceLink {
                ordinal: format!("{:02}", idx + 1),
                url: url.clone(),
                label: hostname_of(url),
                href: safe_link(url),
            })
            .collect()
    }
}

/// Hostname of `raw`, or `raw` itself when it does not parse as a URL.
pub fn hostname_of(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| raw.to_string())
}

/// `raw` as a link target, only when it is an absolute `http` or `https`
/// URL. Anything else (`javascript:`, `data:`, relative text) is `None`.
pub fn safe_link(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.into())
}

/// Inline image payload returned by the image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfographicImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) as delivered by the API.
    pub data: String,
}

impl InfographicImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.trim())
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "bin",
        }
    }
}
