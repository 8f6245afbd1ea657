//! Hydron order-confirmation mailer library.
//!
//! An independent, stateless request handler: it accepts one order record,
//! renders the confirmation document, and sends it to the customer and the
//! business through the hosted email API. It shares nothing with the site
//! beyond `hydron-core` types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod email;
pub mod mailer;
pub mod routes;
