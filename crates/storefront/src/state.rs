//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use kicklabs_core::Catalog;

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::genai::{GeminiClient, GenAiError, GenerativeBackend};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("generative client error: {0}")]
    GenAi(#[from] GenAiError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything in here is read-only; per-visitor
/// state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    genai: Arc<dyn GenerativeBackend>,
}

impl AppState {
    /// Create application state backed by the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn new(config: StorefrontConfig, content_dir: &Path) -> Result<Self, StateError> {
        let content = ContentStore::load(content_dir)?;
        let client = GeminiClient::new(&config.genai)?;

        Ok(Self::with_backend(
            config,
            Catalog::fixtures(),
            content,
            Arc::new(client),
        ))
    }

    /// Assemble state from parts, e.g. with a fake generative backend.
    #[must_use]
    pub fn with_backend(
        config: StorefrontConfig,
        catalog: Catalog,
        content: ContentStore,
        genai: Arc<dyn GenerativeBackend>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                genai,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get the generative model backend.
    #[must_use]
    pub fn genai(&self) -> &dyn GenerativeBackend {
        self.inner.genai.as_ref()
    }
}
