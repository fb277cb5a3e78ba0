//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: validation errors raised by domain types
//! - [`error_kind::ErrorKind`]: the closed failure taxonomy of a chat call

pub mod error;
pub mod error_kind;
