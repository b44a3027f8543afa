//! # Commands Module
//!
//! Entry points the admin and storefront UI call into.
//!
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_coupons(catalog: &CatalogState)
//!
//! // Needs both: product edits refresh cart snapshots
//! fn update_product(catalog: &CatalogState, cart: &CartState, ...)
//! ```
//!
//! Mutating admin commands return an [`Outcome`] so the UI can show the clamp
//! notices next to the saved value.

use serde::Serialize;
use storefront_core::Notice;

pub mod cart;
pub mod coupon;
pub mod product;

/// A command result plus the advisory notices raised while producing it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    pub data: T,
    pub notices: Vec<Notice>,
}

impl<T> Outcome<T> {
    pub fn new(data: T, notices: Vec<Notice>) -> Self {
        Outcome { data, notices }
    }
}
