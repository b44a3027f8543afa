//! # Product Commands
//!
//! Admin product management: add, edit, delete, and discount tier editing.
//!
//! ## Admin Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product form (text fields)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_numeric_input ── "12a" ──► AppError VALIDATION_ERROR            │
//! │       │   ("" → 0)                                                      │
//! │       ▼                                                                 │
//! │  Catalog (clamp + notify) ── stock 10000 → 9999 + notice               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart snapshot refreshed ──► Outcome { data: product, notices }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::validation::{parse_numeric_input, parse_rate_input};
use storefront_core::{CoreResult, NewProduct, Product, ProductPatch};
use tracing::{debug, info};

use crate::commands::Outcome;
use crate::error::AppResult;
use crate::notify::TracingNotifier;
use crate::state::{CartState, CatalogState};

// =============================================================================
// Forms
// =============================================================================

/// "Add product" form as submitted by the UI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub description: Option<String>,
}

/// "Edit product" form; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductEditForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub description: Option<String>,
}

/// Discount tier row: quantity and a rate in percent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountForm {
    pub quantity: String,
    pub rate: String,
}

impl DiscountForm {
    fn parse(&self) -> AppResult<(i64, f64)> {
        Ok((
            parse_numeric_input("discount quantity", &self.quantity)?,
            parse_rate_input("discount rate", &self.rate)?,
        ))
    }
}

/// Product row for the storefront list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Stock not already in the cart.
    pub remaining_stock: i64,
    /// Best tier rate as a `[0, 1]` fraction ("up to N% off").
    pub max_discount_rate: f64,
}

fn parse_optional(field: &str, input: Option<&str>) -> AppResult<Option<i64>> {
    Ok(input.map(|s| parse_numeric_input(field, s)).transpose()?)
}

fn sync_cart(cart: &CartState, product: &Product) {
    cart.with_session_mut(|s| s.cart.sync_product(product));
}

// =============================================================================
// Commands
// =============================================================================

/// Lists products with the stock the shopper can still add.
pub fn list_products(catalog: &CatalogState, cart: &CartState) -> Vec<ProductView> {
    let products = catalog.with_catalog(|c| c.products().to_vec());

    cart.with_session(|s| {
        products
            .into_iter()
            .map(|product| ProductView {
                remaining_stock: s.cart.remaining_stock(&product),
                max_discount_rate: product.max_discount_rate().as_fraction(),
                product,
            })
            .collect()
    })
}

/// Adds a product with defaults for blank fields.
pub fn add_product(catalog: &CatalogState, form: ProductForm) -> AppResult<Outcome<Product>> {
    let new = NewProduct {
        price: parse_numeric_input("price", &form.price)?,
        stock: parse_numeric_input("stock", &form.stock)?,
        name: form.name,
        description: form.description,
    };

    let notifier = TracingNotifier::new();
    let product = catalog.with_catalog_mut(|c| -> CoreResult<Product> {
        let id = c.add_product(new, &notifier)?;
        c.get(&id).cloned()
    })?;

    info!(product_id = %product.id, name = %product.name, "Product added");
    Ok(Outcome::new(product, notifier.into_notices()))
}

/// Edits a product and refreshes its cart snapshot.
pub fn update_product(
    catalog: &CatalogState,
    cart: &CartState,
    id: &str,
    form: ProductEditForm,
) -> AppResult<Outcome<Product>> {
    let patch = ProductPatch {
        price: parse_optional("price", form.price.as_deref())?,
        stock: parse_optional("stock", form.stock.as_deref())?,
        name: form.name,
        description: form.description,
    };

    let notifier = TracingNotifier::new();
    let product = catalog.with_catalog_mut(|c| c.update_product(id, patch, &notifier).cloned())?;
    sync_cart(cart, &product);

    info!(product_id = %id, "Product updated");
    Ok(Outcome::new(product, notifier.into_notices()))
}

/// Deletes a product and drops it from the cart.
pub fn delete_product(catalog: &CatalogState, cart: &CartState, id: &str) -> AppResult<()> {
    let removed = catalog.with_catalog_mut(|c| c.remove_product(id))?;
    cart.with_session_mut(|s| s.cart.forget_product(id));

    info!(product_id = %id, name = %removed.name, "Product deleted");
    Ok(())
}

/// Appends a discount tier.
pub fn add_discount(
    catalog: &CatalogState,
    cart: &CartState,
    id: &str,
    form: DiscountForm,
) -> AppResult<Outcome<Product>> {
    let (quantity, rate) = form.parse()?;

    let notifier = TracingNotifier::new();
    let product = catalog
        .with_catalog_mut(|c| c.add_discount(id, quantity, rate, &notifier).cloned())?;
    sync_cart(cart, &product);

    debug!(product_id = %id, quantity, rate, "Discount tier added");
    Ok(Outcome::new(product, notifier.into_notices()))
}

/// Replaces the discount tier at `index`.
pub fn update_discount(
    catalog: &CatalogState,
    cart: &CartState,
    id: &str,
    index: usize,
    form: DiscountForm,
) -> AppResult<Outcome<Product>> {
    let (quantity, rate) = form.parse()?;

    let notifier = TracingNotifier::new();
    let product = catalog.with_catalog_mut(|c| {
        c.update_discount(id, index, quantity, rate, &notifier)
            .cloned()
    })?;
    sync_cart(cart, &product);

    debug!(product_id = %id, index, quantity, rate, "Discount tier updated");
    Ok(Outcome::new(product, notifier.into_notices()))
}

/// Removes the discount tier at `index`.
pub fn remove_discount(
    catalog: &CatalogState,
    cart: &CartState,
    id: &str,
    index: usize,
) -> AppResult<Product> {
    let product = catalog.with_catalog_mut(|c| -> CoreResult<Product> {
        c.remove_discount(id, index)?;
        c.get(id).cloned()
    })?;
    sync_cart(cart, &product);

    debug!(product_id = %id, index, "Discount tier removed");
    Ok(product)
}
