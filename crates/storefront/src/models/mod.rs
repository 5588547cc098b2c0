//! Session-held visitor state.

pub mod session;

pub use session::{WorkshopState, WorkshopStatus, keys as session_keys};
