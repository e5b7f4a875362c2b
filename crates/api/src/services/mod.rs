//! Service layer between handlers and the market data provider.

pub mod quote_service;

pub use quote_service::QuoteService;
