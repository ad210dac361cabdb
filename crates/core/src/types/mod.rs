//! Core types for Backroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identity;
pub mod price;
pub mod stock;

pub use id::*;
pub use identity::VariationIdentity;
pub use price::{normalize_price, normalize_price_or};
pub use stock::StockStatus;
