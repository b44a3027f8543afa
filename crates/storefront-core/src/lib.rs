//! # storefront-core: Pricing & Discount Engine
//!
//! This crate is the **heart** of the storefront. It contains every pricing
//! and discount rule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Admin / Storefront UI (out of scope)               │   │
//! │  │    Product form ──► Coupon form ──► Cart ──► Checkout panel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          storefront-admin (locks, config, logging)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  validation ──► catalog ──► discount ─┐                         │   │
//! │  │   (clamp +      (products,            ├──► pricing ──► cart     │   │
//! │  │    notify)       coupons)   coupon ───┘                         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, DiscountTier, Coupon, DiscountRate
//! - [`money`] - Integer money in whole currency units
//! - [`discount`] - Quantity discount resolver
//! - [`coupon`] - Coupon resolver
//! - [`pricing`] - Price composer (order of operations)
//! - [`validation`] - Clamp + notify input checks
//! - [`notify`] - Notification sink
//! - [`catalog`] - Product catalog and coupon book
//! - [`cart`] - Shopping cart and totals
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **Integer Money**: whole units in `i64`, rates in basis points
//! 3. **Clamp, Don't Reject**: out-of-range admin numbers are corrected and
//!    reported through a [`notify::Notifier`]
//! 4. **Quantity Tier First**: the coupon always sees the tier-discounted
//!    subtotal
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::pricing::compute_final_price;
//! use storefront_core::{Coupon, CouponDiscount, DiscountRate, DiscountTier, Money};
//!
//! let tiers = [DiscountTier::new(10, DiscountRate::from_fraction(0.1))];
//! let coupon = Coupon {
//!     code: "PERCENT10".to_string(),
//!     name: "10% off".to_string(),
//!     discount: CouponDiscount::Percentage(10),
//! };
//!
//! let price = compute_final_price(Money::from_units(1_000), 12, &tiers, Some(&coupon));
//! assert_eq!(price.final_price.units(), 9_720);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod money;
pub mod notify;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{Catalog, CouponBook, NewCoupon, NewProduct, ProductPatch};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notify::{Checked, Notice, NoticeLog, Notifier, Severity};
pub use pricing::PriceBreakdown;
pub use types::*;

// =============================================================================
// Business Limits
// =============================================================================

/// Highest unit price a product may carry.
pub const MAX_PRICE: i64 = 100_000_000;

/// Highest stock a product may hold.
pub const MAX_STOCK: i64 = 9_999;

/// Highest value of an `amount` coupon.
pub const MAX_AMOUNT_COUPON: i64 = 100_000;

/// Highest value of a `percentage` coupon.
pub const MAX_PERCENTAGE_COUPON: i64 = 100;

/// Longest product or coupon name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
