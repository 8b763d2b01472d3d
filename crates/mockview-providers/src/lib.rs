//! mockview-providers: language-model provider integrations.
//!
//! Implements the `LlmProvider` trait for the Anthropic Messages API and
//! OpenAI-compatible chat completion endpoints, plus a scripted mock for
//! tests and offline demos.

pub mod anthropic;
pub mod config;
pub mod error;
mod http;
pub mod mock;
pub mod openai;

pub use config::{create_provider, load_config_from, MockviewConfig, ProviderConfig};
pub use error::ProviderError;
