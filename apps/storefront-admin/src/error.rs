//! # App Error Type
//!
//! Unified error type for admin commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in the Storefront Admin                     │
//! │                                                                         │
//! │  UI form submit                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function: AppResult<T>                                  │  │
//! │  │         │                                                        │  │
//! │  │  Non-numeric text? ── ValidationError ──────┐                    │  │
//! │  │         │                                   ▼                    │  │
//! │  │  Unknown id/code? ─── CoreError ────────► AppError ─────────────►│  │
//! │  │         │                                                        │  │
//! │  │  Out-of-range number? ── clamped, NOT an error (notice instead)  │  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI receives `{ "code": "NOT_FOUND", "message": "..." }`.

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};

/// Error returned from admin commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, coupon or tier not found
    NotFound,

    /// Input rejected at the boundary
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Nothing left to add
    OutOfStock,

    /// Config file unreadable or invalid
    ConfigError,
}

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::CouponNotFound(code) => AppError::not_found("Coupon", &code),
            e @ CoreError::DiscountTierNotFound { .. } => {
                AppError::new(ErrorCode::NotFound, e.to_string())
            }
            e @ CoreError::ProductNotInCart(_) => AppError::new(ErrorCode::CartError, e.to_string()),
            e @ CoreError::OutOfStock { .. } => AppError::new(ErrorCode::OutOfStock, e.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::config(format!("Failed to read config: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
