//! Market data retrieval.
//!
//! This crate provides:
//! - The `MarketDataProvider` trait every price source implements
//! - A Yahoo Finance chart API client
//! - An in-memory provider for tests and offline runs

mod error;
mod provider;

/// Concrete provider implementations.
pub mod providers;

pub use error::ProviderError;
pub use provider::MarketDataProvider;
