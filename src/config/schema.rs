use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Locales bundled under `locales/`.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-TW"];

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    /// View locale ("en" or "zh-TW")
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub search: SearchOptions,

    #[serde(default)]
    pub infographic: InfographicStyle,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_locale() -> String {
    "zh-TW".into()
}

// ── Gemini endpoint ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API root (default: `https://generativelanguage.googleapis.com`)
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Text + search model used for the structured comparison
    #[serde(default = "default_comparison_model")]
    pub comparison_model: String,
    /// Image model used for the infographic
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Per-request timeout in seconds (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_comparison_model() -> String {
    "gemini-3-flash-preview".into()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".into()
}

fn default_timeout_secs() -> u64 {
    crate::providers::http_client::DEFAULT_TIMEOUT_SECS
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            comparison_model: default_comparison_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Comparison query ─────────────────────────────────────────────

/// One product the comparison prompt asks the model to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTarget {
    pub name: String,
    /// Extra instruction appended after the product name
    #[serde(default)]
    pub note: Option<String>,
}

impl ProductTarget {
    pub fn new(name: &str, note: Option<&str>) -> Self {
        Self {
            name: name.into(),
            note: note.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Model-year window named in the prompt
    #[serde(default = "default_release_window")]
    pub release_window: String,
    #[serde(default = "default_products")]
    pub products: Vec<ProductTarget>,
    /// Retailer the product links must point at
    #[serde(default = "default_retailer_name")]
    pub retailer_name: String,
    #[serde(default = "default_retailer_domain")]
    pub retailer_domain: String,
    /// Currency the prices should be quoted in
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Output language, written out for the model
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_release_window() -> String {
    "2024-2025".into()
}

fn default_products() -> Vec<ProductTarget> {
    vec![
        ProductTarget::new(
            "Adidas Adizero Adios Pro 4",
            Some("must be the latest fourth generation, which replaces the Pro 3"),
        ),
        ProductTarget::new("Nike Alphafly 3", None),
        ProductTarget::new("ASICS Metaspeed Sky Paris or Edge Paris", None),
    ]
}

fn default_retailer_name() -> String {
    "momo".into()
}

fn default_retailer_domain() -> String {
    "momo.com.tw".into()
}

fn default_currency() -> String {
    "TWD".into()
}

fn default_language() -> String {
    "Traditional Chinese (zh-TW)".into()
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            release_window: default_release_window(),
            products: default_products(),
            retailer_name: default_retailer_name(),
            retailer_domain: default_retailer_domain(),
            currency: default_currency(),
            language: default_language(),
        }
    }
}

// ── Infographic style ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColor {
    pub brand: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub title: String,
    pub directive: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfographicStyle {
    /// Image aspect ratio `W:H` (default: 16:9)
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Bar-chart metrics drawn for every shoe
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    #[serde(default = "default_brand_colors")]
    pub brand_colors: Vec<BrandColor>,
    /// Remaining numbered rules, rendered after structure/metrics/contrast
    #[serde(default = "default_style_rules")]
    pub rules: Vec<StyleRule>,
}

fn default_aspect_ratio() -> String {
    "16:9".into()
}

fn default_layout() -> String {
    "A side-by-side technical comparison layout.".into()
}

fn default_metrics() -> Vec<String> {
    vec![
        "Energy Return".into(),
        "Cushioning".into(),
        "Stability".into(),
    ]
}

fn default_brand_colors() -> Vec<BrandColor> {
    [
        ("Nike", "Neon Orange"),
        ("Adidas", "Cyan Blue"),
        ("ASICS", "Acid Green"),
    ]
    .into_iter()
    .map(|(brand, color)| BrandColor {
        brand: brand.into(),
        color: color.into(),
    })
    .collect()
}

fn default_style_rules() -> Vec<StyleRule> {
    [
        (
            "DATA LABELS",
            "Include specific performance percentages or scores (e.g., \"98% Speed\") next to the bars to highlight differences.",
        ),
        (
            "WEIGHT SCALE",
            "Create a visual \"Weight Balance\" graphic showing which shoe is the lightest.",
        ),
        (
            "STYLE",
            "Dark carbon-fiber texture background, futuristic tech UI elements, very clear white typography.",
        ),
        (
            "SHOE GRAPHICS",
            "Include stylized silhouettes or wireframe renders of the shoes to show their different stack heights and shapes.",
        ),
    ]
    .into_iter()
    .map(|(title, directive)| StyleRule {
        title: title.into(),
        directive: directive.into(),
    })
    .collect()
}

impl Default for InfographicStyle {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            layout: default_layout(),
            metrics: default_metrics(),
            brand_colors: default_brand_colors(),
            rules: default_style_rules(),
        }
    }
}

impl InfographicStyle {
    pub fn validate_aspect_ratio(&self) -> std::result::Result<(), ConfigError> {
        let valid = self
            .aspect_ratio
            .split_once(':')
            .and_then(|(w, h)| Some((w.trim().parse::<u32>().ok()?, h.trim().parse::<u32>().ok()?)))
            .is_some_and(|(w, h)| w > 0 && h > 0);
        if valid {
            Ok(())
        } else {
            Err(ConfigError::Validation(format!(
                "infographic.aspect_ratio must look like \"16:9\", got {:?}",
                self.aspect_ratio
            )))
        }
    }
}

// ── Gateway ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway port (default: 8080)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Gateway host (default: 127.0.0.1)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Allow binding to non-localhost (default: false)
    #[serde(default)]
    pub allow_public_bind: bool,
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            host: default_gateway_host(),
            allow_public_bind: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".runners-hub").join("config.toml"),
            api_key: None,
            locale: default_locale(),
            gemini: GeminiConfig::default(),
            search: SearchOptions::default(),
            infographic: InfographicStyle::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.search.products.is_empty() {
            return Err(ConfigError::Validation(
                "search.products must name at least one product".into(),
            ));
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "locale must be one of {SUPPORTED_LOCALES:?}, got {:?}",
                self.locale
            )));
        }
        self.infographic.validate_aspect_ratio()
    }

    /// Load `~/.runners-hub/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(".runners-hub"))
    }

    /// Load `config.toml` from `dir`, creating the directory and a default
    /// file when missing. Environment overrides are applied afterwards.
    pub fn load_or_init_in(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");

        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create .runners-hub directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set computed paths that are skipped during serialization
            config.config_path.clone_from(&config_path);
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        // API Key: RUNNERS_HUB_API_KEY, GEMINI_API_KEY or API_KEY
        if let Some(key) = ["RUNNERS_HUB_API_KEY", "GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.is_empty())
        {
            self.api_key = Some(key);
        }

        // Locale: RUNNERS_HUB_LOCALE
        if let Ok(locale) = std::env::var("RUNNERS_HUB_LOCALE") {
            if !locale.is_empty() {
                self.locale = locale;
            }
        }

        // Gateway port: RUNNERS_HUB_GATEWAY_PORT
        if let Ok(port_str) = std::env::var("RUNNERS_HUB_GATEWAY_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.gateway.port = port;
            }
        }
    }

    /// The configured key with surrounding whitespace removed, if any.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// A copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("***".into());
        }
        copy
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
