//! Completion domain.
//!
//! - [`request::CompletionRequest`]: conversation plus generation parameters
//! - [`response::CompletionResult`]: the normalized assistant reply

pub mod request;
pub mod response;
