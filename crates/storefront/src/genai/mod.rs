//! Generative model integration.
//!
//! The design workshop and the chat assistant both go through the
//! [`GenerativeBackend`] trait. Production wires in [`GeminiClient`]; tests
//! substitute a fake held in the same `Arc<dyn GenerativeBackend>` slot.
//!
//! # Tiers
//!
//! [`Resolution::Standard`] renders with the standard image model under the
//! server key. Higher resolutions use the pro image model, which must be
//! called with a key the visitor supplies. A missing or refused visitor key
//! surfaces as [`GenAiError::AuthorizationRequired`] so the workshop can ask
//! for one instead of showing a generic failure.

mod client;
mod error;
mod prompt;
pub mod types;

use std::fmt;

use async_trait::async_trait;
use kicklabs_core::{DesignPrompt, Resolution};
use secrecy::{ExposeSecret, SecretString};

pub use client::GeminiClient;
pub use error::{AuthFailure, GenAiError, is_auth_rejection};
pub use prompt::{render_design_prompt, render_system_prompt};

/// Thinking budget, in tokens, for assistant replies.
pub const ADVISOR_THINKING_BUDGET: u32 = 32_768;

/// Shown in the chat transcript when the assistant call fails.
pub const FALLBACK_REPLY: &str = "I encountered a processing delay. Please try again.";

/// A visitor-supplied API key for the pro tier.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a key, trimming whitespace. Blank input yields `None`.
    #[must_use]
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        (!key.is_empty()).then(|| Self(SecretString::from(key.to_string())))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// What the workshop asks the model to render.
#[derive(Debug, Clone, Default)]
pub struct DesignRequest {
    pub prompt: DesignPrompt,
    pub resolution: Resolution,
}

/// A rendered design, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignImage {
    pub mime_type: String,
    pub data: String,
}

impl DesignImage {
    /// The image as a `data:` URL, suitable for an `<img src>`.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A hosted generative model.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Render a shoe design.
    ///
    /// `credential` is only consulted for pro-tier resolutions.
    async fn generate_design(
        &self,
        request: &DesignRequest,
        credential: Option<&Credential>,
    ) -> Result<DesignImage, GenAiError>;

    /// Answer a footwear question in the Head of Design persona.
    async fn advise(&self, query: &str) -> Result<String, GenAiError>;
}
