//! The AI query service: two stateless calls that build a prompt, invoke the
//! model and shape the reply into [`crate::catalog`] types.

pub mod gemini;

pub use gemini::GeminiComparisonService;

use crate::catalog::{ComparisonResult, InfographicImage, ShoeRecord};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ComparisonService: Send + Sync {
    /// Web-grounded structured comparison of the configured products.
    ///
    /// Every failure (transport, auth, quota, malformed payload) is returned
    /// to the caller as-is. There is no retry and no fallback.
    async fn request_comparison(&self) -> Result<ComparisonResult>;

    /// Comparison infographic for `shoes`.
    ///
    /// Failures are logged and reported as `None`; an absent image is never
    /// an error for the caller.
    async fn request_infographic(&self, shoes: &[ShoeRecord]) -> Option<InfographicImage>;
}
