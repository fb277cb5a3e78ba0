//! HTTP surface: JSON in, use case call, JSON out.

pub mod dto;
pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{router, serve};
