//! # Quantity Discount Resolver
//!
//! Picks the discount rate a purchased quantity earns from a product's tiers.
//!
//! ## Tie-Break Policy
//! ```text
//! tiers: [{qty: 10, rate: 5%}, {qty: 5, rate: 20%}]     purchased: 12
//!
//!   qty 10 ≤ 12 ✓  → 5%
//!   qty  5 ≤ 12 ✓  → 20%   ◄── highest qualifying RATE wins,
//!                              not the highest threshold
//! ```
//! Tiers are never assumed sorted.

use crate::types::{DiscountRate, DiscountTier};

/// Returns the highest rate among tiers whose threshold is at most
/// `purchased_quantity`, or zero when none qualifies.
///
/// ## Example
/// ```rust
/// use storefront_core::discount::resolve_discount_rate;
/// use storefront_core::types::{DiscountRate, DiscountTier};
///
/// let tiers = [
///     DiscountTier::new(10, DiscountRate::from_percent(5.0)),
///     DiscountTier::new(5, DiscountRate::from_percent(20.0)),
/// ];
/// assert_eq!(resolve_discount_rate(&tiers, 12).bps(), 2_000);
/// assert!(resolve_discount_rate(&tiers, 4).is_zero());
/// ```
pub fn resolve_discount_rate(tiers: &[DiscountTier], purchased_quantity: i64) -> DiscountRate {
    tiers
        .iter()
        .filter(|tier| tier.quantity <= purchased_quantity)
        .map(|tier| tier.rate)
        .max()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(quantity: i64, percent: f64) -> DiscountTier {
        DiscountTier::new(quantity, DiscountRate::from_percent(percent))
    }

    #[test]
    fn test_empty_tiers_give_zero() {
        assert!(resolve_discount_rate(&[], 0).is_zero());
        assert!(resolve_discount_rate(&[], 1_000).is_zero());
    }

    #[test]
    fn test_zero_quantity_gives_zero() {
        let tiers = [tier(1, 10.0)];
        assert!(resolve_discount_rate(&tiers, 0).is_zero());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let tiers = [tier(10, 10.0)];
        assert!(resolve_discount_rate(&tiers, 9).is_zero());
        assert_eq!(resolve_discount_rate(&tiers, 10).bps(), 1_000);
    }

    #[test]
    fn test_higher_rate_wins_over_higher_threshold() {
        let tiers = [tier(10, 5.0), tier(5, 20.0)];
        assert_eq!(resolve_discount_rate(&tiers, 12), DiscountRate::from_fraction(0.2));
    }

    #[test]
    fn test_unsorted_tiers() {
        let tiers = [tier(30, 25.0), tier(10, 10.0), tier(20, 20.0)];
        assert_eq!(resolve_discount_rate(&tiers, 25).bps(), 2_000);
        assert_eq!(resolve_discount_rate(&tiers, 30).bps(), 2_500);
        assert_eq!(resolve_discount_rate(&tiers, 15).bps(), 1_000);
    }

    #[test]
    fn test_duplicate_thresholds() {
        let tiers = [tier(10, 10.0), tier(10, 15.0)];
        assert_eq!(resolve_discount_rate(&tiers, 10).bps(), 1_500);
    }
}
