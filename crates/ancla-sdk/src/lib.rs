//! Typed async client for the Ancla PaaS REST API.
//!
//! The hierarchy is workspace → project → environment → service; builds,
//! deploys and configuration variables hang off those levels. Every
//! [`AnclaClient`] method maps to exactly one HTTP request.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod client;
pub mod error;
mod resources;
pub mod settings;
pub mod types;

pub use client::{AnclaClient, AnclaClientBuilder, API_KEY_HEADER};
pub use error::{AnclaError, ApiErrorKind};
pub use resources::ConfigScope;
pub use settings::ClientSettings;
pub use types::*;
