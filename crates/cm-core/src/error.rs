//! # AppError
//!
//! Centralized error handling for the commons ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all cm-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Community, Post, Session)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty title, password too short)
    #[error("validation error: {0}")]
    Validation(String),

    /// Security/Auth failure (e.g., bad credentials, missing session)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate username)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, template render failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for commons logic.
pub type Result<T> = std::result::Result<T, AppError>;
