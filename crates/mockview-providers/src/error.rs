//! Provider error types.
//!
//! The enum itself is defined in `mockview-core` so the coach can classify
//! failures; it is re-exported here for provider implementations.

pub use mockview_core::error::ProviderError;
