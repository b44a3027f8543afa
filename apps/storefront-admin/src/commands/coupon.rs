//! # Coupon Commands
//!
//! Admin coupon management. Coupons are created once and removed by code;
//! there is no edit.

use serde::Deserialize;
use storefront_core::validation::parse_numeric_input;
use storefront_core::{Coupon, CoreResult, DiscountType, NewCoupon};
use tracing::info;

use crate::commands::Outcome;
use crate::error::AppResult;
use crate::notify::TracingNotifier;
use crate::state::{CartState, CatalogState};

/// "Add coupon" form as submitted by the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponForm {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: String,
}

/// Lists the active coupons.
pub fn list_coupons(catalog: &CatalogState) -> Vec<Coupon> {
    catalog.with_coupons(|c| c.coupons().to_vec())
}

/// Adds a coupon; the value is clamped to its type's bounds.
pub fn add_coupon(catalog: &CatalogState, form: CouponForm) -> AppResult<Outcome<Coupon>> {
    let new = NewCoupon {
        discount_value: parse_numeric_input("discount value", &form.discount_value)?,
        code: form.code,
        name: form.name,
        discount_type: form.discount_type,
    };

    let notifier = TracingNotifier::new();
    let coupon = catalog
        .with_coupons_mut(|c| -> CoreResult<Coupon> { c.add_coupon(new, &notifier).cloned() })?;

    info!(code = %coupon.code, kind = ?coupon.discount_type(), "Coupon added");
    Ok(Outcome::new(coupon, notifier.into_notices()))
}

/// Removes a coupon; a cart that had it selected falls back to no coupon.
pub fn delete_coupon(catalog: &CatalogState, cart: &CartState, code: &str) -> AppResult<()> {
    let removed = catalog.with_coupons_mut(|c| c.remove_coupon(code))?;

    cart.with_session_mut(|s| {
        if s.coupon_code.as_deref() == Some(removed.code.as_str()) {
            s.coupon_code = None;
        }
    });

    info!(code = %removed.code, "Coupon deleted");
    Ok(())
}
