//! # Catalog State
//!
//! Shared product catalog and coupon book.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin edits (writers)            Pricing (readers)                     │
//! │  ─────────────────────            ─────────────────                     │
//! │  with_catalog_mut ──► write lock  product() ──► read lock, clone out    │
//! │  with_coupons_mut ──► write lock  coupon()  ──► read lock, clone out    │
//! │                                                                         │
//! │  Pricing runs on the cloned copies, so no edit can interleave with a    │
//! │  price computation and no lock is held while computing.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! `RwLock` because pricing reads far outnumber admin edits.

use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::{Catalog, Coupon, CouponBook, CoreResult, Product};

/// Shared catalog and coupon book.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<RwLock<Catalog>>,
    coupons: Arc<RwLock<CouponBook>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog, coupons: CouponBook) -> Self {
        CatalogState {
            catalog: Arc::new(RwLock::new(catalog)),
            coupons: Arc::new(RwLock::new(coupons)),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }

    /// Executes a function with read access to the coupon book.
    pub fn with_coupons<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CouponBook) -> R,
    {
        let coupons = self.coupons.read().unwrap_or_else(PoisonError::into_inner);
        f(&coupons)
    }

    /// Executes a function with write access to the coupon book.
    pub fn with_coupons_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CouponBook) -> R,
    {
        let mut coupons = self.coupons.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut coupons)
    }

    /// Copy of a product, taken under the read lock.
    pub fn product(&self, id: &str) -> CoreResult<Product> {
        self.with_catalog(|c| c.get(id).cloned())
    }

    /// Copy of a coupon, taken under the read lock.
    pub fn coupon(&self, code: &str) -> CoreResult<Coupon> {
        self.with_coupons(|c| c.get(code).cloned())
    }
}
