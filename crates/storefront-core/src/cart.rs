//! # Cart
//!
//! The storefront shopping cart and its totals.
//!
//! ## Cart Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Totals                                      │
//! │                                                                         │
//! │  line 1: price × qty ── tier ──► line subtotal ─┐                      │
//! │  line 2: price × qty ── tier ──► line subtotal ─┼─► cart subtotal      │
//! │  line n: price × qty ── tier ──► line subtotal ─┘         │            │
//! │                                                            ▼            │
//! │                                          apply_coupon(subtotal, coupon) │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                                               total after discount      │
//! │                                                                         │
//! │  Quantity tiers are per line; the single coupon applies ONCE, to the   │
//! │  summed post-tier subtotal.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::apply_coupon;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compute_final_price, PriceBreakdown};
use crate::types::{Coupon, Product};

/// A product in the cart.
///
/// The product is a snapshot taken when the line was added; call
/// [`Cart::sync_product`] after an admin edit to refresh it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Prices this line on its own, with an optional line-level coupon.
    pub fn price(&self, coupon: Option<&Coupon>) -> PriceBreakdown {
        compute_final_price(
            self.product.price,
            self.quantity,
            &self.product.discounts,
            coupon,
        )
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding again increases quantity)
/// - `1 ≤ quantity ≤ product.stock` for every line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `product_id` currently in the cart.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Stock not yet claimed by the cart, never negative.
    pub fn remaining_stock(&self, product: &Product) -> i64 {
        (product.stock - self.quantity_of(&product.id)).max(0)
    }

    /// Adds one unit of `product`.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(OutOfStock)` if the cart already holds all the stock
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if self.remaining_stock(product) == 0 {
            return Err(CoreError::OutOfStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
            return Ok(());
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - `quantity > stock`: capped to stock
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product.id == product_id)
            .ok_or_else(|| CoreError::ProductNotInCart(product_id.to_string()))?;
        item.quantity = quantity.min(item.product.stock);
        if item.quantity == 0 {
            return self.remove_item(product_id);
        }
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Refreshes the snapshot of an edited product.
    ///
    /// Quantities above the new stock are capped; a line whose product has
    /// no stock left is dropped.
    pub fn sync_product(&mut self, product: &Product) {
        for item in self.items.iter_mut().filter(|i| i.product.id == product.id) {
            item.product = product.clone();
            item.quantity = item.quantity.min(product.stock);
        }
        self.items.retain(|i| i.quantity > 0);
    }

    /// Drops the line of a deleted product, if any.
    pub fn forget_product(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Computes cart totals with at most one coupon.
    pub fn totals(&self, coupon: Option<&Coupon>) -> CartTotals {
        let lines: Vec<PriceBreakdown> = self.items.iter().map(|i| i.price(None)).collect();

        let total_before_discount: Money = lines.iter().map(|l| l.raw_subtotal).sum();
        let quantity_discount: Money = lines.iter().map(|l| l.quantity_discount_amount).sum();
        let subtotal: Money = lines.iter().map(|l| l.subtotal).sum();
        let coupon_reduction = apply_coupon(subtotal, coupon);
        let total_after_discount = subtotal - coupon_reduction;

        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            total_before_discount,
            quantity_discount,
            subtotal,
            coupon_reduction,
            total_after_discount,
            total_discount: total_before_discount - total_after_discount,
        }
    }
}

/// Cart totals summary for the checkout panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    /// Sum of `price × quantity`.
    pub total_before_discount: Money,
    /// Sum of per-line tier discounts.
    pub quantity_discount: Money,
    /// After tiers, before the coupon.
    pub subtotal: Money,
    pub coupon_reduction: Money,
    pub total_after_discount: Money,
    /// `total_before_discount - total_after_discount`.
    pub total_discount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CouponDiscount, DiscountRate, DiscountTier};

    fn test_product(id: &str, price: i64, stock: i64, tiers: Vec<DiscountTier>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            stock,
            description: None,
            discounts: tiers,
        }
    }

    fn tier(quantity: i64, percent: f64) -> DiscountTier {
        DiscountTier::new(quantity, DiscountRate::from_percent(percent))
    }

    fn coupon(discount: CouponDiscount) -> Coupon {
        Coupon {
            code: "TEST".to_string(),
            name: "Test".to_string(),
            discount,
        }
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 10_000, 20, vec![]);

        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.remaining_stock(&product), 18);
    }

    /// Prices past the validator's cap can still be built directly; totals
    /// saturate instead of overflowing.
    #[test]
    fn test_totals_saturate_on_huge_prices() {
        let mut cart = Cart::new();
        let a = test_product("a", i64::MAX, 5, vec![]);
        let b = test_product("b", i64::MAX, 5, vec![]);
        cart.add_item(&a).unwrap();
        cart.add_item(&b).unwrap();

        let totals = cart.totals(None);

        assert_eq!(totals.total_before_discount.units(), i64::MAX);
        assert_eq!(totals.total_after_discount.units(), i64::MAX);
        assert!(totals.total_discount.is_zero());
    }

    #[test]
    fn test_add_beyond_stock_is_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 100, 1, vec![]);

        cart.add_item(&product).unwrap();
        let err = cart.add_item(&product).unwrap_err();

        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.remaining_stock(&product), 0);
    }

    #[test]
    fn test_update_quantity_caps_and_removes() {
        let mut cart = Cart::new();
        let product = test_product("1", 100, 5, vec![]);
        cart.add_item(&product).unwrap();

        cart.update_quantity("1", 50).unwrap();
        assert_eq!(cart.quantity_of("1"), 5);

        cart.update_quantity("1", 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.update_quantity("1", 3),
            Err(CoreError::ProductNotInCart(_))
        ));
    }

    #[test]
    fn test_sync_product_caps_to_new_stock() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 100, 10, vec![]);
        cart.add_item(&product).unwrap();
        cart.update_quantity("1", 8).unwrap();

        product.stock = 3;
        product.price = Money::from_units(200);
        cart.sync_product(&product);
        assert_eq!(cart.quantity_of("1"), 3);
        assert_eq!(cart.items[0].product.price.units(), 200);

        product.stock = 0;
        cart.sync_product(&product);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_forget_product() {
        let mut cart = Cart::new();
        let product = test_product("1", 100, 10, vec![]);
        cart.add_item(&product).unwrap();

        cart.forget_product("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_apply_coupon_once_after_tiers() {
        let mut cart = Cart::new();
        let p1 = test_product("1", 10_000, 20, vec![tier(10, 10.0)]);
        let p2 = test_product("2", 20_000, 20, vec![tier(10, 15.0)]);

        cart.add_item(&p1).unwrap();
        cart.update_quantity("1", 10).unwrap();
        cart.add_item(&p2).unwrap();

        // line 1: 100,000 - 10,000 = 90,000; line 2: 20,000 (below tier)
        let totals = cart.totals(Some(&coupon(CouponDiscount::Percentage(10))));
        assert_eq!(totals.total_before_discount.units(), 120_000);
        assert_eq!(totals.quantity_discount.units(), 10_000);
        assert_eq!(totals.subtotal.units(), 110_000);
        assert_eq!(totals.coupon_reduction.units(), 11_000);
        assert_eq!(totals.total_after_discount.units(), 99_000);
        assert_eq!(totals.total_discount.units(), 21_000);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 11);
    }

    #[test]
    fn test_totals_amount_coupon_capped() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 3_000, 5, vec![])).unwrap();

        let totals = cart.totals(Some(&coupon(CouponDiscount::Amount(5_000))));
        assert_eq!(totals.coupon_reduction.units(), 3_000);
        assert_eq!(totals.total_after_discount, Money::zero());
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = Cart::new().totals(None);
        assert_eq!(totals.total_after_discount, Money::zero());
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_line_price() {
        let item = CartItem {
            product: test_product("1", 1_000, 20, vec![tier(10, 10.0)]),
            quantity: 12,
        };
        let price = item.price(Some(&coupon(CouponDiscount::Percentage(10))));
        assert_eq!(price.final_price.units(), 9_720);
    }
}
