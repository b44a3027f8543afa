//! # Catalog & Coupon Book
//!
//! In-memory owners of the product list and the active coupon set. These are
//! the only places a [`Product`] or [`Coupon`] is created, edited or removed;
//! every numeric field goes through the clamp + notify checks on the way in.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │       Catalog        │        │      CouponBook      │
//! │  add_product         │        │  add_coupon          │
//! │  update_product      │        │  remove_coupon       │
//! │  remove_product      │        │  get (any case)      │
//! │  add/update/remove   │        └──────────────────────┘
//! │    _discount         │
//! └──────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::notify::Notifier;
use crate::types::{Coupon, DiscountTier, DiscountType, Product};
use crate::validation::{
    check_coupon_value, check_discount_quantity, check_discount_rate, check_price, check_stock,
    validate_coupon_code, validate_coupon_name, validate_product_name,
};

// =============================================================================
// Form Payloads
// =============================================================================

/// Payload of the admin "add product" form. Omitted numbers default to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub description: Option<String>,
}

/// Payload of the admin "edit product" form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    /// An empty string clears the description.
    pub description: Option<String>,
}

/// Payload of the admin "add coupon" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: i64,
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

// =============================================================================
// Catalog
// =============================================================================

/// The product list, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Creates a product and returns its new id.
    ///
    /// The name is required; price and stock are clamped with a notice.
    pub fn add_product(&mut self, new: NewProduct, sink: &dyn Notifier) -> CoreResult<String> {
        let name = validate_product_name(&new.name)?;
        let price = check_price(new.price).emit(sink);
        let stock = check_stock(new.stock).emit(sink);

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            stock,
            description: normalize_description(new.description),
            discounts: Vec::new(),
        };
        let id = product.id.clone();
        self.products.push(product);
        Ok(id)
    }

    /// Edits a product in place.
    pub fn update_product(
        &mut self,
        id: &str,
        patch: ProductPatch,
        sink: &dyn Notifier,
    ) -> CoreResult<&Product> {
        // Validate before touching the product so a bad name leaves it unchanged.
        let name = patch
            .name
            .as_deref()
            .map(validate_product_name)
            .transpose()?;

        let product = self.get_mut(id)?;
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = check_price(price).emit(sink);
        }
        if let Some(stock) = patch.stock {
            product.stock = check_stock(stock).emit(sink);
        }
        if patch.description.is_some() {
            product.description = normalize_description(patch.description);
        }
        Ok(product)
    }

    /// Deletes a product and returns it.
    pub fn remove_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    /// Appends a tier; the rate is given in percent.
    pub fn add_discount(
        &mut self,
        id: &str,
        quantity: i64,
        rate_percent: f64,
        sink: &dyn Notifier,
    ) -> CoreResult<&Product> {
        let product = self.get_mut(id)?;
        product.add_discount(checked_tier(quantity, rate_percent, sink));
        Ok(product)
    }

    /// Replaces the tier at `index`; the rate is given in percent.
    pub fn update_discount(
        &mut self,
        id: &str,
        index: usize,
        quantity: i64,
        rate_percent: f64,
        sink: &dyn Notifier,
    ) -> CoreResult<&Product> {
        let product = self.get_mut(id)?;
        if index >= product.discounts.len() {
            return Err(CoreError::DiscountTierNotFound {
                product_id: id.to_string(),
                index,
            });
        }
        product.update_discount(index, checked_tier(quantity, rate_percent, sink))?;
        Ok(product)
    }

    pub fn remove_discount(&mut self, id: &str, index: usize) -> CoreResult<DiscountTier> {
        self.get_mut(id)?.remove_discount(index)
    }
}

fn checked_tier(quantity: i64, rate_percent: f64, sink: &dyn Notifier) -> DiscountTier {
    DiscountTier::new(
        check_discount_quantity(quantity).emit(sink),
        check_discount_rate(rate_percent).emit(sink),
    )
}

// =============================================================================
// Coupon Book
// =============================================================================

/// The active coupon set. Codes are unique and stored uppercase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Looks a coupon up by code, ignoring case.
    pub fn get(&self, code: &str) -> CoreResult<&Coupon> {
        let code = code.trim().to_uppercase();
        self.coupons
            .iter()
            .find(|c| c.code == code)
            .ok_or(CoreError::CouponNotFound(code))
    }

    /// Validates and stores a coupon.
    ///
    /// ## Rules
    /// - Code and name are required; the code is uppercased
    /// - A code already in the book is rejected
    /// - The value is clamped to its type's bounds with a notice
    pub fn add_coupon(&mut self, new: NewCoupon, sink: &dyn Notifier) -> CoreResult<&Coupon> {
        let code = validate_coupon_code(&new.code)?;
        let name = validate_coupon_name(&new.name)?;

        if self.coupons.iter().any(|c| c.code == code) {
            return Err(ValidationError::Duplicate {
                field: "coupon code".to_string(),
                value: code,
            }
            .into());
        }

        let discount = check_coupon_value(new.discount_type, new.discount_value).emit(sink);
        self.coupons.push(Coupon {
            code,
            name,
            discount,
        });
        let index = self.coupons.len() - 1;
        Ok(&self.coupons[index])
    }

    /// Deletes a coupon by code and returns it.
    pub fn remove_coupon(&mut self, code: &str) -> CoreResult<Coupon> {
        let code = code.trim().to_uppercase();
        let index = self
            .coupons
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| CoreError::CouponNotFound(code.clone()))?;
        Ok(self.coupons.remove(index))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::notify::NoticeLog;
    use crate::types::CouponDiscount;

    fn new_product(name: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            stock,
            description: None,
        }
    }

    #[test]
    fn test_add_product_defaults() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();

        let id = catalog
            .add_product(
                NewProduct {
                    name: "New".to_string(),
                    ..Default::default()
                },
                &log,
            )
            .unwrap();

        let product = catalog.get(&id).unwrap();
        assert_eq!(product.price, Money::zero());
        assert_eq!(product.stock, 0);
        assert!(product.discounts.is_empty());
        assert!(log.is_empty());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_add_product_clamps_and_notifies() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();

        let id = catalog
            .add_product(new_product("Product 1", -100, 12_000), &log)
            .unwrap();

        let product = catalog.get(&id).unwrap();
        assert_eq!(product.price, Money::zero());
        assert_eq!(product.stock, 9_999);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_add_product_requires_name() {
        let mut catalog = Catalog::new();
        let err = catalog
            .add_product(new_product("  ", 100, 1), &NoticeLog::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn test_update_product() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();
        let id = catalog
            .add_product(new_product("Product 1", 10_000, 20), &log)
            .unwrap();

        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            stock: Some(-4),
            description: Some("A fine product".to_string()),
            ..Default::default()
        };
        let product = catalog.update_product(&id, patch, &log).unwrap();

        assert_eq!(product.name, "Renamed");
        assert_eq!(product.price.units(), 10_000);
        assert_eq!(product.stock, 0);
        assert_eq!(product.description.as_deref(), Some("A fine product"));
        assert_eq!(log.drain()[0].message, "stock must be non-negative");

        let cleared = ProductPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        let product = catalog.update_product(&id, cleared, &log).unwrap();
        assert!(product.description.is_none());
    }

    #[test]
    fn test_update_product_bad_name_leaves_product_unchanged() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();
        let id = catalog
            .add_product(new_product("Product 1", 10_000, 20), &log)
            .unwrap();

        let patch = ProductPatch {
            name: Some(String::new()),
            price: Some(1),
            ..Default::default()
        };
        assert!(catalog.update_product(&id, patch, &log).is_err());
        assert_eq!(catalog.get(&id).unwrap().price.units(), 10_000);
    }

    #[test]
    fn test_remove_product() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();
        let id = catalog.add_product(new_product("P", 1, 1), &log).unwrap();

        assert_eq!(catalog.remove_product(&id).unwrap().name, "P");
        assert!(matches!(
            catalog.remove_product(&id),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_discount_tier_operations() {
        let mut catalog = Catalog::new();
        let log = NoticeLog::new();
        let id = catalog.add_product(new_product("P", 1_000, 50), &log).unwrap();

        catalog.add_discount(&id, 10, 10.0, &log).unwrap();
        catalog.add_discount(&id, 0, 150.0, &log).unwrap();
        assert_eq!(log.drain().len(), 2);

        let product = catalog.get(&id).unwrap();
        assert_eq!(product.discounts[1].quantity, 1);
        assert_eq!(product.discounts[1].rate.bps(), 10_000);

        catalog.update_discount(&id, 1, 20, 25.0, &log).unwrap();
        assert_eq!(catalog.get(&id).unwrap().discounts[1].rate.bps(), 2_500);

        let removed = catalog.remove_discount(&id, 0).unwrap();
        assert_eq!(removed.quantity, 10);
        assert_eq!(catalog.get(&id).unwrap().discounts.len(), 1);

        assert!(matches!(
            catalog.update_discount(&id, 5, 1, 1.0, &log),
            Err(CoreError::DiscountTierNotFound { index: 5, .. })
        ));
        assert!(log.is_empty());
    }

    fn new_coupon(code: &str, kind: DiscountType, value: i64) -> NewCoupon {
        NewCoupon {
            code: code.to_string(),
            name: format!("{code} coupon"),
            discount_type: kind,
            discount_value: value,
        }
    }

    #[test]
    fn test_add_coupon_normalizes_code() {
        let mut book = CouponBook::new();
        let log = NoticeLog::new();

        let coupon = book
            .add_coupon(new_coupon("percent10", DiscountType::Percentage, 10), &log)
            .unwrap();
        assert_eq!(coupon.code, "PERCENT10");
        assert!(book.get("Percent10").is_ok());
    }

    #[test]
    fn test_add_coupon_clamps_value() {
        let mut book = CouponBook::new();
        let log = NoticeLog::new();

        let coupon = book
            .add_coupon(new_coupon("BIG", DiscountType::Amount, 150_000), &log)
            .unwrap();
        assert_eq!(coupon.discount, CouponDiscount::Amount(100_000));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_duplicate_coupon_code_rejected() {
        let mut book = CouponBook::new();
        let log = NoticeLog::new();
        book.add_coupon(new_coupon("SAVE", DiscountType::Amount, 1_000), &log)
            .unwrap();

        let err = book
            .add_coupon(new_coupon("save", DiscountType::Percentage, 5), &log)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(book.coupons().len(), 1);
    }

    #[test]
    fn test_remove_coupon() {
        let mut book = CouponBook::new();
        let log = NoticeLog::new();
        book.add_coupon(new_coupon("SAVE", DiscountType::Amount, 1_000), &log)
            .unwrap();

        assert_eq!(book.remove_coupon("save").unwrap().code, "SAVE");
        assert!(matches!(
            book.remove_coupon("SAVE"),
            Err(CoreError::CouponNotFound(_))
        ));
    }

    #[test]
    fn test_new_coupon_payload() {
        let payload: NewCoupon = serde_json::from_value(serde_json::json!({
            "code": "AMOUNT5000",
            "name": "5,000 off",
            "discountType": "amount",
            "discountValue": 5000
        }))
        .unwrap();
        assert_eq!(payload.discount_type, DiscountType::Amount);
        assert_eq!(payload.discount_value, 5_000);
    }
}
