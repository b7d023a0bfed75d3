//! Intérprete de lenguaje natural sobre la Messages API de Anthropic.

mod client;
mod config;
mod error;
pub mod extract;
mod prompt;

pub use client::ClaudeInterpreter;
pub use config::{API_KEY_ENV, AnthropicConfig};
pub use error::AnthropicError;
