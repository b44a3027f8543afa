//! # Validation Module
//!
//! Admin-input checks for products, discount tiers and coupons.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary parsing (parse_numeric_input, parse_rate_input)     │
//! │  ├── Blank text → 0                                                    │
//! │  └── Non-numeric text → ValidationError (REJECTED)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Range checks (check_*)                                       │
//! │  ├── In range → accepted as-is                                         │
//! │  └── Out of range → CLAMPED to the nearest bound + error notice        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Identity checks (validate_*)                                 │
//! │  └── Empty/oversized names and codes → ValidationError                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Range checks never reject: an edit always goes through with a corrected
//! value and the notice tells the admin what changed.
//!
//! ## Usage
//! ```rust
//! use storefront_core::notify::NoticeLog;
//! use storefront_core::validation::{check_stock, parse_numeric_input};
//!
//! let log = NoticeLog::new();
//! let raw = parse_numeric_input("stock", "10000").unwrap();
//! let stock = check_stock(raw).emit(&log);
//!
//! assert_eq!(stock, 9999);
//! assert_eq!(log.len(), 1);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::notify::Checked;
use crate::types::{CouponDiscount, DiscountRate, DiscountType};
use crate::{MAX_AMOUNT_COUPON, MAX_NAME_LENGTH, MAX_PERCENTAGE_COUPON, MAX_PRICE, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Boundary Parsing
// =============================================================================

/// Parses an integer form field. Blank input is `0`.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_numeric_input;
///
/// assert_eq!(parse_numeric_input("price", " 1200 ").unwrap(), 1200);
/// assert_eq!(parse_numeric_input("price", "").unwrap(), 0);
/// assert!(parse_numeric_input("price", "12a").is_err());
/// ```
pub fn parse_numeric_input(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }

    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Parses a discount-rate form field given in percent (`"12.5"`). Blank
/// input is `0`.
pub fn parse_rate_input(field: &str, input: &str) -> ValidationResult<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match input.parse::<f64>() {
        Ok(percent) if percent.is_finite() => Ok(percent),
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

// =============================================================================
// Product Checks
// =============================================================================

/// Product price: clamps into `[0, MAX_PRICE]`.
///
/// The upper bound keeps `price × MAX_STOCK` and whole-cart sums well inside
/// `i64`.
pub fn check_price(price: i64) -> Checked<Money> {
    if price < 0 {
        return Checked::clamped(Money::zero(), "price must be non-negative");
    }
    if price > MAX_PRICE {
        return Checked::clamped(
            Money::from_units(MAX_PRICE),
            "price cannot exceed 100,000,000",
        );
    }
    Checked::accepted(Money::from_units(price))
}

/// Product stock: clamps into `[0, MAX_STOCK]`.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Admin: Edit Product                                                    │
/// │                                                                         │
/// │  Admin types stock: 10000                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  check_stock(10000) ← THIS FUNCTION                                    │
/// │       │                                                                 │
/// │       ├── < 0?    → 0    + "stock must be non-negative"                │
/// │       ├── > 9999? → 9999 + "stock cannot exceed 9999"                  │
/// │       └── OK      → stored as typed                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn check_stock(stock: i64) -> Checked<i64> {
    if stock < 0 {
        return Checked::clamped(0, "stock must be non-negative");
    }
    if stock > MAX_STOCK {
        return Checked::clamped(MAX_STOCK, format!("stock cannot exceed {MAX_STOCK}"));
    }
    Checked::accepted(stock)
}

// =============================================================================
// Discount Tier Checks
// =============================================================================

/// Tier threshold: at least 1 unit.
pub fn check_discount_quantity(quantity: i64) -> Checked<i64> {
    if quantity < 1 {
        return Checked::clamped(1, "discount quantity must be at least 1");
    }
    Checked::accepted(quantity)
}

/// Tier rate entered as a `[0, 100]` percent, stored as a `[0, 1]` fraction.
///
/// Rates are kept in whole basis points; finer input is rounded DOWN to the
/// basis point below and reported, so the stored discount never exceeds the
/// one entered.
pub fn check_discount_rate(percent: f64) -> Checked<DiscountRate> {
    if percent.is_nan() || percent < 0.0 {
        return Checked::clamped(
            DiscountRate::zero(),
            "discount rate must be between 0 and 100%",
        );
    }
    if percent > 100.0 {
        return Checked::clamped(DiscountRate::FULL, "discount rate must be between 0 and 100%");
    }
    if !DiscountRate::is_exact_percent(percent) {
        return Checked::clamped(
            DiscountRate::from_percent(percent),
            "discount rate is limited to 0.01% steps",
        );
    }
    Checked::accepted(DiscountRate::from_percent(percent))
}

// =============================================================================
// Coupon Checks
// =============================================================================

/// Coupon value, bounded by its type.
///
/// | type         | bound            | notice over the bound              |
/// |--------------|------------------|------------------------------------|
/// | `amount`     | `[0, 100000]`    | "amount cannot exceed 100,000"     |
/// | `percentage` | `[0, 100]`       | "percentage cannot exceed 100%"    |
pub fn check_coupon_value(kind: DiscountType, value: i64) -> Checked<CouponDiscount> {
    if value < 0 {
        return Checked::clamped(
            CouponDiscount::new(kind, 0),
            "discount value must be non-negative",
        );
    }

    match kind {
        DiscountType::Amount if value > MAX_AMOUNT_COUPON => Checked::clamped(
            CouponDiscount::Amount(MAX_AMOUNT_COUPON),
            "amount cannot exceed 100,000",
        ),
        DiscountType::Percentage if value > MAX_PERCENTAGE_COUPON => Checked::clamped(
            CouponDiscount::Percentage(MAX_PERCENTAGE_COUPON),
            "percentage cannot exceed 100%",
        ),
        _ => Checked::accepted(CouponDiscount::new(kind, value)),
    }
}

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Product 1 ").unwrap(), "Product 1");
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_name("name", name)
}

/// Validates a coupon display name and returns it trimmed.
pub fn validate_coupon_name(name: &str) -> ValidationResult<String> {
    validate_name("coupon name", name)
}

fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Validates a coupon code and returns it trimmed and uppercased.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, numbers, hyphens and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code.to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
