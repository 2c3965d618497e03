//! Welcome to stockgift!

#[cfg(feature = "data")]
/// Stock gift market data module
pub mod data;

#[cfg(feature = "data")]
/// Stock gift valuation module
pub mod valuation;
