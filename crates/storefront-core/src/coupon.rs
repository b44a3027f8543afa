//! # Coupon Resolver
//!
//! Turns a coupon and a subtotal into the amount the coupon takes off.
//!
//! ```text
//!   Amount(v)      → min(v, subtotal)
//!   Percentage(p)  → floor(subtotal × p / 100)
//!   no coupon      → 0
//! ```
//! The reduction is always within `[0, subtotal]`.

use crate::money::Money;
use crate::types::{Coupon, CouponDiscount};

/// Returns the reduction `coupon` grants on `subtotal`.
///
/// ## Example
/// ```rust
/// use storefront_core::coupon::apply_coupon;
/// use storefront_core::money::Money;
/// use storefront_core::types::{Coupon, CouponDiscount};
///
/// let coupon = Coupon {
///     code: "AMOUNT5000".to_string(),
///     name: "5,000 off".to_string(),
///     discount: CouponDiscount::Amount(5_000),
/// };
/// let reduction = apply_coupon(Money::from_units(1_000), Some(&coupon));
/// assert_eq!(reduction.units(), 1_000);
/// ```
pub fn apply_coupon(subtotal: Money, coupon: Option<&Coupon>) -> Money {
    let Some(coupon) = coupon else {
        return Money::zero();
    };

    let reduction = match coupon.discount {
        CouponDiscount::Amount(value) => Money::from_units(value),
        CouponDiscount::Percentage(percent) => subtotal.percent_of(percent),
    };

    // Values are clamped when the coupon is created; the bound here keeps the
    // result inside [0, subtotal] for any input.
    reduction.min(subtotal).max(Money::zero())
}
