//! Presentation layer for chat-gateway
//!
//! This crate contains the CLI definition and the axum HTTP surface.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, router, serve};
