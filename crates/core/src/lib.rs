//! Backroom Core - Shared types library.
//!
//! This crate provides common types used across all Backroom components:
//! - `admin` - Store administration workflow library
//! - `cli` - Command-line tools for store inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, variation identities,
//!   prices, and stock statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
