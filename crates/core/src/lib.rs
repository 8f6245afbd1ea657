//! Hydron Core - Shared types library.
//!
//! This crate provides common types used across the Hydron Marketing
//! components:
//! - `site` - Public marketing site with the authentication layer
//! - `order-mailer` - Order confirmation email service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, user ids, prices, and regions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
