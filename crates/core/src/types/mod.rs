//! Core types for Kids KickLabs.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod chat;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use chat::{ChatMessage, ChatRole};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Category, CustomDesign, Product};
