//! Core error types for the Lotfolio engine.
//!
//! This module defines storage-agnostic error types. Storage-specific
//! errors are converted to these types by the store implementations.
//!
//! Missing price data is deliberately NOT an error: valuation falls back
//! through realtime -> close -> weighted cost and tags the result with
//! [`crate::portfolio::PriceSource::CostBasis`].

use chrono::ParseError as ChronoParseError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Trade rejected: {0}")]
    Trade(#[from] TradeError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Price feed operation failed: {0}")]
    PriceFeed(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by the sell path before any mutation occurs.
///
/// All of these are validation failures: when one is returned, no lot
/// has been touched and no trade has been appended.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Invalid sell quantity: requested {requested}, available {available}")]
    InvalidQuantity {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error(
        "Partial sell of {ticker} spans {lot_count} lots; select an explicit lot to sell from"
    )]
    CrossLotPartialSellUnsupported { ticker: String, lot_count: usize },
}

/// Storage-agnostic error type for lot store and ledger operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Optimistic-version conflict on a lot mutation. The whole
    /// transaction is rolled back; nothing was written.
    #[error("Concurrent modification of lot {lot_id}: expected version {expected_version}, found {actual_version}")]
    ConcurrentModification {
        lot_id: String,
        expected_version: i64,
        actual_version: i64,
    },

    /// Internal/unexpected store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
