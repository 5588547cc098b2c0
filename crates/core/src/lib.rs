//! Kids KickLabs Core - domain library.
//!
//! This crate provides the storefront's domain logic, shared by:
//! - `storefront` - Public-facing web store
//! - `cli` - Command-line catalog and quote tool
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. Everything here is deterministic.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, products and chat messages
//! - [`catalog`] - Fixture catalog and the shop filter
//! - [`cart`] - Cart accumulator
//! - [`restoration`] - Restoration quote calculator
//! - [`design`] - Design workshop options and prompt building
//! - [`route`] - The closed set of storefront pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod design;
pub mod error;
pub mod restoration;
pub mod route;
pub mod types;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY};
pub use catalog::{Catalog, ProductFilter};
pub use design::{DesignPrompt, LaceColor, LaceStyle, Material, Resolution};
pub use error::ParseError;
pub use restoration::{Condition, RestorationEstimate, Service, ServiceSelection, ShoeType};
pub use route::Route;
pub use types::*;
