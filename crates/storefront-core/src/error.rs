//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog / coupon book / cart failures          │
//! │  └── ValidationError  - Structurally invalid input (rejected)          │
//! │                                                                         │
//! │  storefront-admin errors (host crate)                                  │
//! │  └── AppError         - What the admin UI sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range numbers are NOT errors: the validator clamps them and emits a
//! notice instead. The pricing functions themselves are total and never fail.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog, coupon book and cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No coupon with this code in the active coupon set.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Tier index outside the product's discount list.
    #[error("Product {product_id} has no discount tier at index {index}")]
    DiscountTierNotFound { product_id: String, index: usize },

    /// Cart operation on a product that is not in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(String),

    /// Remaining stock (stock minus quantity already in the cart) is zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "add to cart" (stock: 3, in cart: 3)
    ///      │
    ///      ▼
    /// OutOfStock { product_id, name: "Product 1" }
    ///      │
    ///      ▼
    /// UI shows: "Product 1 is out of stock"
    /// ```
    #[error("{name} is out of stock")]
    OutOfStock { product_id: String, name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input that cannot be clamped into shape and is rejected at the boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. non-numeric text in a numeric field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate coupon code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
