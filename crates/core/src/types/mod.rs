//! Core types for Hydron Marketing.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod region;

pub use email::{Email, EmailError};
pub use id::UserId;
pub use price::{CurrencyCode, Price};
pub use region::{Region, RegionError};
