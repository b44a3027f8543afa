//! # Cart Commands
//!
//! Storefront cart manipulation and checkout totals.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart   ┌──────────┐  select_coupon  ┌──────────┐
//! │  Empty   │───────────────►│ In Cart  │────────────────►│ Checkout │
//! │  Cart    │                │          │                 │  totals  │
//! └──────────┘                └──────────┘                 └──────────┘
//!      ▲                 update_cart_item                        │
//!      │                 remove_from_cart                        │
//!      └────────────────────── clear_cart ◄──────────────────────┘
//! ```
//!
//! Every command reads catalog data first (copy out, lock released) and only
//! then locks the cart, so pricing never runs against a half-edited product.

use serde::Serialize;
use storefront_core::pricing::{compute_final_price, PriceBreakdown};
use storefront_core::{CartTotals, Coupon, Money};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::state::{CartSession, CartState, CatalogState};

/// One cart line as the checkout panel shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Line pricing with its quantity tier, before the cart coupon.
    pub price: PriceBreakdown,
}

/// Cart response including lines, selected coupon and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    pub coupon: Option<Coupon>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn build(session: &CartSession, coupon: Option<Coupon>) -> Self {
        let items = session
            .cart
            .items
            .iter()
            .map(|item| CartLineView {
                product_id: item.product.id.clone(),
                name: item.product.name.clone(),
                unit_price: item.product.price,
                quantity: item.quantity,
                price: item.price(None),
            })
            .collect();

        CartResponse {
            items,
            totals: session.cart.totals(coupon.as_ref()),
            coupon,
        }
    }
}

/// Copy of the selected coupon, if it still exists.
fn selected_coupon(catalog: &CatalogState, cart: &CartState) -> Option<Coupon> {
    let code = cart.with_session(|s| s.coupon_code.clone())?;
    catalog.coupon(&code).ok()
}

fn respond(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    let coupon = selected_coupon(catalog, cart);
    cart.with_session(|s| CartResponse::build(s, coupon))
}

/// Gets the current cart with totals.
pub fn get_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    respond(catalog, cart)
}

/// Adds one unit of a product.
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> AppResult<CartResponse> {
    let product = catalog.product(product_id)?;
    cart.with_session_mut(|s| s.cart.add_item(&product))?;

    debug!(product_id = %product_id, "Added to cart");
    Ok(respond(catalog, cart))
}

/// Sets a line's quantity; 0 removes it, more than stock is capped.
pub fn update_cart_item(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> AppResult<CartResponse> {
    cart.with_session_mut(|s| s.cart.update_quantity(product_id, quantity))?;

    debug!(product_id = %product_id, quantity, "Cart quantity updated");
    Ok(respond(catalog, cart))
}

/// Removes a line.
pub fn remove_from_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> AppResult<CartResponse> {
    cart.with_session_mut(|s| s.cart.remove_item(product_id))?;
    Ok(respond(catalog, cart))
}

/// Empties the cart and drops the coupon.
pub fn clear_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    cart.with_session_mut(CartSession::reset);
    info!("Cart cleared");
    respond(catalog, cart)
}

/// Selects the cart coupon; `None` removes the selection.
pub fn select_coupon(
    catalog: &CatalogState,
    cart: &CartState,
    code: Option<&str>,
) -> AppResult<CartResponse> {
    let code = code.map(|c| catalog.coupon(c)).transpose()?.map(|c| c.code);

    info!(code = ?code, "Coupon selected");
    cart.with_session_mut(|s| s.coupon_code = code);
    Ok(respond(catalog, cart))
}

/// Prices `quantity` units of one product without touching the cart.
///
/// `quantity` must be at least 1.
pub fn quote(
    catalog: &CatalogState,
    product_id: &str,
    quantity: i64,
    coupon_code: Option<&str>,
) -> AppResult<PriceBreakdown> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }

    let product = catalog.product(product_id)?;
    let coupon = coupon_code.map(|c| catalog.coupon(c)).transpose()?;

    Ok(compute_final_price(
        product.price,
        quantity,
        &product.discounts,
        coupon.as_ref(),
    ))
}
