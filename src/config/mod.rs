pub mod schema;

pub use schema::{
    BrandColor, Config, GatewayConfig, GeminiConfig, InfographicStyle, ProductTarget,
    SUPPORTED_LOCALES, SearchOptions, StyleRule,
};
