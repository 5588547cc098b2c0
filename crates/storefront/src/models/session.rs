//! Session-related types.
//!
//! Everything a visitor accumulates (cart, assistant transcript, workshop
//! selections, their API key) is kept in the session under the keys below.
//! Missing or undecodable values read back as their defaults.

use kicklabs_core::{Cart, ChatMessage, CustomDesign, DesignPrompt, Resolution};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::genai::Credential;

/// Session keys for visitor data.
pub mod keys {
    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// Assistant transcript.
    pub const CHAT: &str = "chat";

    /// Visitor-supplied API key for pro-tier renders.
    pub const CREDENTIAL: &str = "genai_credential";

    /// Design workshop selections and last render.
    pub const WORKSHOP: &str = "workshop";
}

/// Outcome of the last workshop action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopStatus {
    #[default]
    Idle,
    /// Generate was pressed with nothing to render.
    MissingPrompt,
    /// The last render needs a (different) visitor API key.
    NeedsKey,
    /// The last render failed for any other reason.
    Failed,
    /// The last render was added to the cart.
    AddedToCart,
}

/// Design workshop state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopState {
    pub brief: DesignPrompt,
    pub resolution: Resolution,
    /// Most recent successful render.
    pub design: Option<CustomDesign>,
    pub status: WorkshopStatus,
}

async fn load<T>(session: &Session, key: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    match session.get::<T>(key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, "Discarding unreadable session value: {e}");
            T::default()
        }
    }
}

/// Get the cart from the session.
pub async fn load_cart(session: &Session) -> Cart {
    load(session, keys::CART).await
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Get the assistant transcript from the session.
pub async fn load_chat(session: &Session) -> Vec<ChatMessage> {
    load(session, keys::CHAT).await
}

/// Store the assistant transcript in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_chat(
    session: &Session,
    chat: &[ChatMessage],
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CHAT, chat).await
}

/// Get the workshop state from the session.
pub async fn load_workshop(session: &Session) -> WorkshopState {
    load(session, keys::WORKSHOP).await
}

/// Store the workshop state in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_workshop(
    session: &Session,
    workshop: &WorkshopState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::WORKSHOP, workshop).await
}

/// Get the visitor's API key, if they selected one.
pub async fn load_credential(session: &Session) -> Option<Credential> {
    let key: Option<String> = load(session, keys::CREDENTIAL).await;
    key.as_deref().and_then(Credential::new)
}

/// Store the visitor's API key.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_credential(
    session: &Session,
    key: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CREDENTIAL, key.trim()).await
}

/// Forget the visitor's API key.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_credential(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<String>(keys::CREDENTIAL).await.map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use kicklabs_core::Catalog;
    use crate::middleware::session::MokaSessionStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MokaSessionStore::default()), None)
    }

    #[tokio::test]
    async fn test_empty_session_reads_defaults() {
        let session = session();

        assert!(load_cart(&session).await.is_empty());
        assert!(load_chat(&session).await.is_empty());
        assert_eq!(load_workshop(&session).await, WorkshopState::default());
        assert!(load_credential(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_session() {
        let session = session();
        let catalog = Catalog::fixtures();
        let mut cart = Cart::new();
        cart.add(&catalog.products()[0]);
        cart.add(&catalog.products()[0]);

        save_cart(&session, &cart).await.unwrap();

        let loaded = load_cart(&session).await;
        assert_eq!(loaded, cart);
        assert_eq!(loaded.item_count(), 2);
    }

    #[tokio::test]
    async fn test_credential_is_trimmed_and_clearable() {
        let session = session();

        save_credential(&session, "  AIzaSyVisitorKey  ").await.unwrap();
        assert!(load_credential(&session).await.is_some());

        clear_credential(&session).await.unwrap();
        assert!(load_credential(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_value_falls_back_to_default() {
        let session = session();
        session.insert(keys::CART, "not a cart").await.unwrap();

        assert!(load_cart(&session).await.is_empty());
    }
}
