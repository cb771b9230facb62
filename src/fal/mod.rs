//! Fal AI queue client for virtual try-on generation
//!
//! Submits a try-on job to the Fal queue, polls it to a terminal state, and
//! fetches the generated image URL.

pub mod client;
pub mod mock;

pub use client::FalClient;
pub use mock::MockTryOnClient;

use crate::models::{GenerationResult, TryOnRequest};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TryOnService: Send + Sync {
    /// Run one generation job to a terminal state.
    ///
    /// The credential is injected per call; `None` or an empty key fails with
    /// [`crate::Error::MissingCredential`] before any network call is made.
    async fn generate(
        &self,
        request: &TryOnRequest,
        api_key: Option<&str>,
    ) -> Result<GenerationResult>;
}
