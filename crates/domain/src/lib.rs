//! Core domain types for the stock quote service.
//!
//! - `value_objects`: validated symbols and indicator readings
//! - `entities`: price bars and series as returned by a provider
//! - `enums`: lookback periods and bar intervals
//! - `indicators`: RSI, EMA and MACD over closing prices

pub mod entities;
pub mod enums;
pub mod error;
pub mod indicators;
pub mod value_objects;

pub use error::DomainError;
