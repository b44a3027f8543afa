//! # Price Composer
//!
//! Combines unit price, quantity tiers and an optional coupon into a final
//! price.
//!
//! ## Order of Operations (fixed)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. raw_subtotal      = unit_price × quantity                          │
//! │  2. rate              = resolve_discount_rate(tiers, quantity)         │
//! │  3. quantity_discount = floor(raw_subtotal × rate)                     │
//! │     subtotal          = raw_subtotal - quantity_discount               │
//! │  4. coupon_reduction  = apply_coupon(subtotal, coupon)                 │
//! │  5. final_price       = subtotal - coupon_reduction                    │
//! │                                                                         │
//! │  The coupon always sees the DISCOUNTED subtotal, never the raw one.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `0 ≤ final_price ≤ raw_subtotal` holds for every validated input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::apply_coupon;
use crate::discount::resolve_discount_rate;
use crate::money::Money;
use crate::types::{Coupon, DiscountTier};

/// Every intermediate amount of one pricing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// `unit_price × quantity`.
    pub raw_subtotal: Money,
    /// Amount removed by the quantity tier.
    pub quantity_discount_amount: Money,
    /// Line total after the quantity discount, before the coupon.
    pub subtotal: Money,
    /// Amount removed by the coupon.
    pub coupon_reduction_amount: Money,
    /// What the customer pays.
    pub final_price: Money,
}

impl PriceBreakdown {
    /// Quantity discount plus coupon reduction.
    pub fn total_discount(&self) -> Money {
        self.quantity_discount_amount + self.coupon_reduction_amount
    }
}

/// Prices `quantity` units at `unit_price` with the given tiers and coupon.
///
/// Callers pass `quantity ≥ 1` and a validated (non-negative, capped) price;
/// under those inputs `0 ≤ final_price ≤ raw_subtotal`.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::compute_final_price;
/// use storefront_core::types::{Coupon, CouponDiscount, DiscountRate, DiscountTier};
///
/// let tiers = [DiscountTier::new(10, DiscountRate::from_percent(10.0))];
/// let coupon = Coupon {
///     code: "PERCENT10".to_string(),
///     name: "10% off".to_string(),
///     discount: CouponDiscount::Percentage(10),
/// };
///
/// let price = compute_final_price(Money::from_units(1_000), 12, &tiers, Some(&coupon));
/// assert_eq!(price.subtotal.units(), 10_800);
/// assert_eq!(price.final_price.units(), 9_720);
/// ```
pub fn compute_final_price(
    unit_price: Money,
    quantity: i64,
    tiers: &[DiscountTier],
    coupon: Option<&Coupon>,
) -> PriceBreakdown {
    let raw_subtotal = unit_price.multiply_quantity(quantity);
    let rate = resolve_discount_rate(tiers, quantity);
    let quantity_discount_amount = raw_subtotal.apply_rate(rate);
    let subtotal = raw_subtotal - quantity_discount_amount;
    let coupon_reduction_amount = apply_coupon(subtotal, coupon);

    PriceBreakdown {
        raw_subtotal,
        quantity_discount_amount,
        subtotal,
        coupon_reduction_amount,
        final_price: subtotal - coupon_reduction_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CouponDiscount, DiscountRate};

    fn coupon(discount: CouponDiscount) -> Coupon {
        Coupon {
            code: "TEST".to_string(),
            name: "Test".to_string(),
            discount,
        }
    }

    #[test]
    fn test_end_to_end_breakdown() {
        let tiers = [DiscountTier::new(10, DiscountRate::from_fraction(0.1))];
        let c = coupon(CouponDiscount::Percentage(10));

        let price = compute_final_price(Money::from_units(1_000), 12, &tiers, Some(&c));

        assert_eq!(price.raw_subtotal.units(), 12_000);
        assert_eq!(price.quantity_discount_amount.units(), 1_200);
        assert_eq!(price.subtotal.units(), 10_800);
        assert_eq!(price.coupon_reduction_amount.units(), 1_080);
        assert_eq!(price.final_price.units(), 9_720);
        assert_eq!(price.total_discount().units(), 2_280);
    }

    /// A coupon on the raw subtotal would take 1,200 instead of 1,080.
    #[test]
    fn test_coupon_sees_discounted_subtotal() {
        let tiers = [DiscountTier::new(10, DiscountRate::from_fraction(0.1))];
        let c = coupon(CouponDiscount::Percentage(10));
        let price = compute_final_price(Money::from_units(1_000), 12, &tiers, Some(&c));
        assert_ne!(price.coupon_reduction_amount.units(), 1_200);
    }

    #[test]
    fn test_no_discounts() {
        let price = compute_final_price(Money::from_units(2_500), 3, &[], None);
        assert_eq!(price.raw_subtotal.units(), 7_500);
        assert_eq!(price.final_price.units(), 7_500);
        assert!(price.total_discount().is_zero());
    }

    #[test]
    fn test_amount_coupon_larger_than_subtotal() {
        let c = coupon(CouponDiscount::Amount(100_000));
        let price = compute_final_price(Money::from_units(500), 2, &[], Some(&c));
        assert_eq!(price.coupon_reduction_amount.units(), 1_000);
        assert_eq!(price.final_price, Money::zero());
    }

    #[test]
    fn test_full_rate_tier() {
        let tiers = [DiscountTier::new(1, DiscountRate::FULL)];
        let c = coupon(CouponDiscount::Amount(10));
        let price = compute_final_price(Money::from_units(300), 2, &tiers, Some(&c));
        assert_eq!(price.subtotal, Money::zero());
        assert_eq!(price.final_price, Money::zero());
    }

    #[test]
    fn test_idempotent() {
        let tiers = [DiscountTier::new(5, DiscountRate::from_percent(7.5))];
        let c = coupon(CouponDiscount::Amount(333));
        let first = compute_final_price(Money::from_units(1_999), 7, &tiers, Some(&c));
        let second = compute_final_price(Money::from_units(1_999), 7, &tiers, Some(&c));
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_camel_case() {
        let price = compute_final_price(Money::from_units(100), 1, &[], None);
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json["finalPrice"], 100);
        assert_eq!(json["quantityDiscountAmount"], 0);
    }
}
