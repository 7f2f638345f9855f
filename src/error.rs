use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Runner's Hub.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to surface a failure; application edges (CLI dispatch,
/// config IO) continue to use `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum HubError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Gemini API ──────────────────────────────────────────────────────
    #[error("gemini: {0}")]
    Gemini(#[from] GeminiError),

    // ── View state machine ──────────────────────────────────────────────
    #[error("view: {0}")]
    View(#[from] ViewError),

    // ── Prompt / page templates ─────────────────────────────────────────
    #[error("render: {0}")]
    Render(#[from] RenderError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Gemini API errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error(
        "Gemini API key not found. Set RUNNERS_HUB_API_KEY, GEMINI_API_KEY or API_KEY, \
         or add api_key to ~/.runners-hub/config.toml"
    )]
    MissingKey,

    #[error("model {model} request failed ({status}): {body}")]
    Request {
        model: String,
        status: u16,
        body: String,
    },

    #[error("model {model} authentication failed ({status})")]
    Auth { model: String, status: u16 },

    #[error("model {model} rate-limited or out of quota")]
    RateLimited { model: String },

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response payload: {0}")]
    Payload(#[from] serde_json::Error),
}

// ─── View errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("a search is already in progress")]
    SearchInProgress,
}

// ─── Template errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template render failed: {0}")]
    Template(#[from] tera::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, HubError>;
