//! Provider seam for instrument sources.

use crate::instrument::{Category, Instrument};
use async_trait::async_trait;
use thiserror::Error;

/// Failures a provider can hit before normalization succeeds.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout, or non-success status.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    /// Response body did not match the expected shape.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A source-specific fetch+normalize unit producing instruments for one
/// category. Implementations consult the shared cache before hitting the
/// network and write back on success.
#[async_trait]
pub trait InstrumentProvider: Send + Sync {
    fn category(&self) -> Category;

    async fn fetch(&self) -> Result<Vec<Instrument>, FetchError>;

    /// Static table served in place of a failed fetch.
    fn fallback(&self) -> Vec<Instrument>;
}
