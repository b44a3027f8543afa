//! # State Module
//!
//! Shared state for the admin host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  CatalogState    │ │    CartState     │ │    StoreConfig       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  Arc<RwLock<     │ │  Arc<Mutex<      │ │  store name          │   │
//! │  │    Catalog>>     │ │    CartSession   │ │  currency format     │   │
//! │  │  Arc<RwLock<     │ │  >>              │ │                      │   │
//! │  │    CouponBook>>  │ │                  │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Lock order when a command needs both: catalog/coupons FIRST (copy     │
//! │  out and release), THEN the cart session.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartSession, CartState};
pub use catalog::CatalogState;
pub use config::{StoreConfig, CONFIG_PATH_ENV};

#[cfg(test)]
pub(crate) use config::lock_env;
