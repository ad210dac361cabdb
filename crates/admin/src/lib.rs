//! Backroom Admin library.
//!
//! The store administration workflow for a WooCommerce shop, exposed as a
//! library: the REST client for the store's backend proxy, the
//! attribute/term selection store, the variation staging state machine, and
//! the multi-step save orchestrator. A presentation layer (web, TUI, CLI)
//! links this crate and renders the state it exposes.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`error`] - Form-level error surface and backend error mapping
//! - [`woo`] - REST client for the store API (products, attributes,
//!   variations, media)
//! - [`catalog`] - Attribute selection, term cache, combination generation,
//!   and variation staging
//! - [`form`] - The product draft, its action reducer, and the editor that
//!   drives saves

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod woo;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{FormError, FormField};
pub use form::{EditorMode, ProductEditor, SaveOutcome};
pub use woo::{StoreApi, WooClient, WooError};
