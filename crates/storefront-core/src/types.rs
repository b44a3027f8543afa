//! # Domain Types
//!
//! Core domain types shared by the pricing engine and the admin host.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DiscountTier   │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  quantity (≥1)  │   │  code (UPPER)   │       │
//! │  │  name           │   │  rate [0,1]     │   │  name           │       │
//! │  │  price, stock   │   └─────────────────┘   │  discount ──┐   │       │
//! │  │  discounts[]    │                         └─────────────┼───┘       │
//! │  └─────────────────┘                                       ▼           │
//! │                        ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │  DiscountRate   │   │ CouponDiscount  │       │
//! │                        │  bps (u32)      │   │  Amount(v)      │       │
//! │                        │  1000 = 10%     │   │  Percentage(v)  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Float noise tolerated when mapping a percent onto basis points.
const BPS_EPSILON: f64 = 1e-6;

/// A discount fraction in `[0, 1]`, held in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so `floor(amount × rate)` stays exact
/// in integer math. 1000 bps = 0.1 = 10%.
///
/// On the wire the rate is the `[0, 1]` fraction the admin UI works with.
/// Rates finer than one basis point are rounded DOWN, never up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100%.
    pub const FULL: DiscountRate = DiscountRate(10_000);

    /// Creates a rate from basis points, capped at 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > 10_000 {
            DiscountRate(10_000)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a `[0, 1]` fraction (floored to a whole bp).
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_percent(fraction * 100.0)
    }

    /// Creates a rate from a `[0, 100]` percent (floored to a whole bp).
    ///
    /// Out-of-range and NaN inputs saturate; the validator is what reports them.
    pub fn from_percent(percent: f64) -> Self {
        let bps = (percent * 100.0 + BPS_EPSILON).floor();
        if bps.is_nan() || bps <= 0.0 {
            DiscountRate(0)
        } else {
            DiscountRate::from_bps(bps.min(10_000.0) as u32)
        }
    }

    /// True when `percent` lands on a whole basis point (`12.34` yes,
    /// `12.345` no), up to float noise.
    pub fn is_exact_percent(percent: f64) -> bool {
        let bps = percent * 100.0;
        bps.is_finite() && (bps - bps.round()).abs() < BPS_EPSILON
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a `[0, 1]` fraction.
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a `[0, 100]` percent (for display only).
    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_fraction())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(D::Error::custom(format!(
                "discount rate {fraction} is outside [0, 1]"
            )));
        }
        if !DiscountRate::is_exact_percent(fraction * 100.0) {
            return Err(D::Error::custom(format!(
                "discount rate {fraction} is finer than 0.0001"
            )));
        }
        Ok(DiscountRate::from_fraction(fraction))
    }
}

// =============================================================================
// Discount Tier
// =============================================================================

/// A quantity break: buying at least `quantity` units earns `rate` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    /// Minimum purchased quantity for the tier to qualify (≥ 1).
    pub quantity: i64,

    /// Discount fraction in `[0, 1]`.
    #[ts(type = "number")]
    pub rate: DiscountRate,
}

impl DiscountTier {
    pub fn new(quantity: i64, rate: DiscountRate) -> Self {
        DiscountTier { quantity, rate }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product managed from the admin screen and sold in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4), stable for the product's lifetime.
    pub id: String,

    /// Display name, non-empty.
    pub name: String,

    /// Unit price in whole currency units, non-negative.
    pub price: Money,

    /// Units on hand, in `[0, MAX_STOCK]`.
    pub stock: i64,

    /// Optional description for product details.
    #[serde(default)]
    pub description: Option<String>,

    /// Quantity-break tiers, in the order the admin entered them.
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,
}

impl Product {
    /// Appends a tier.
    pub fn add_discount(&mut self, tier: DiscountTier) {
        self.discounts.push(tier);
    }

    /// Replaces the tier at `index`.
    pub fn update_discount(&mut self, index: usize, tier: DiscountTier) -> CoreResult<()> {
        let slot = self
            .discounts
            .get_mut(index)
            .ok_or_else(|| CoreError::DiscountTierNotFound {
                product_id: self.id.clone(),
                index,
            })?;
        *slot = tier;
        Ok(())
    }

    /// Removes and returns the tier at `index`, keeping the order of the rest.
    pub fn remove_discount(&mut self, index: usize) -> CoreResult<DiscountTier> {
        if index >= self.discounts.len() {
            return Err(CoreError::DiscountTierNotFound {
                product_id: self.id.clone(),
                index,
            });
        }
        Ok(self.discounts.remove(index))
    }

    /// Best rate any tier offers, regardless of quantity (shown as "up to N% off").
    pub fn max_discount_rate(&self) -> DiscountRate {
        self.discounts
            .iter()
            .map(|tier| tier.rate)
            .max()
            .unwrap_or_default()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// The kind of reduction a coupon grants, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed currency amount off.
    Amount,
    /// Integer percent off.
    Percentage,
}

/// A coupon's reduction: a tagged variant, serialized as
/// `{"discountType": "amount", "discountValue": 5000}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(
    tag = "discountType",
    content = "discountValue",
    rename_all = "lowercase"
)]
pub enum CouponDiscount {
    /// Currency amount in `[0, MAX_AMOUNT_COUPON]`.
    Amount(i64),
    /// Integer percent in `[0, 100]`.
    Percentage(i64),
}

impl CouponDiscount {
    pub fn new(kind: DiscountType, value: i64) -> Self {
        match kind {
            DiscountType::Amount => CouponDiscount::Amount(value),
            DiscountType::Percentage => CouponDiscount::Percentage(value),
        }
    }

    pub fn kind(&self) -> DiscountType {
        match self {
            CouponDiscount::Amount(_) => DiscountType::Amount,
            CouponDiscount::Percentage(_) => DiscountType::Percentage,
        }
    }

    pub fn value(&self) -> i64 {
        match *self {
            CouponDiscount::Amount(value) | CouponDiscount::Percentage(value) => value,
        }
    }
}

/// A coupon in the active coupon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique uppercase code, also the lookup key.
    pub code: String,

    /// Display name.
    pub name: String,

    #[serde(flatten)]
    #[ts(flatten)]
    pub discount: CouponDiscount,
}

impl Coupon {
    pub fn discount_type(&self) -> DiscountType {
        self.discount.kind()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
