//! Unified application error type.
//! Store, persistence, filter and CLI code all return AppError so callers
//! can match on one type. Persistence problems are not errors: see
//! `core::persistence::PersistenceWarning`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Record store
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No haircut found with id {0}")]
    NotFound(String),

    #[error("You are not logged in. Run `manetracker login` first.")]
    NotLoggedIn,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid rating: {0} (expected a number from 0 to 10 with at most one decimal)")]
    InvalidRating(String),

    #[error("Invalid cost: {0}")]
    InvalidCost(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Image error: {0}")]
    Image(String),

    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
