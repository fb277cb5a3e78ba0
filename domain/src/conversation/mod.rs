//! Conversation domain.
//!
//! - [`entities::Role`]: who authored a message
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::Conversation`]: the ordered chat history sent to a model

pub mod entities;
