//! # Storefront Admin Library
//!
//! Host layer around `storefront-core`: shared state, commands, config and
//! logging. The binary in `main.rs` only parses arguments and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! storefront_admin/
//! ├── lib.rs          ◄─── You are here (logging setup & demo run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog + coupon book behind RwLock
//! │   ├── cart.rs     ◄─── Cart session behind Mutex
//! │   └── config.rs   ◄─── Store config (TOML + env overrides)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Outcome type
//! │   ├── product.rs  ◄─── Product and discount tier commands
//! │   ├── coupon.rs   ◄─── Coupon commands
//! │   └── cart.rs     ◄─── Cart and checkout commands
//! ├── notify.rs       ◄─── Clamp notices into tracing
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod state;

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::cart::{self as cart_cmd, CartResponse};
use commands::coupon::{self as coupon_cmd, CouponForm};
use commands::product::{self as product_cmd, DiscountForm, ProductForm};
use error::AppResult;
use state::{CartState, CatalogState, StoreConfig};
use storefront_core::DiscountType;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Initializes the tracing subscriber.
///
/// Default filter is `info,storefront=debug`; `RUST_LOG` overrides it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Formatting subscriber gated only by `filter`.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

/// Runs the demo storefront.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load StoreConfig ── file (arg or STOREFRONT_CONFIG) + env overrides │
/// │  2. Seed catalog ────── three products with tiers, two coupons          │
/// │  3. Fill cart ───────── quantities that cross tier thresholds           │
/// │  4. Checkout ────────── each coupon in turn, totals logged              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = StoreConfig::load(config_path)?;
    info!(store = %config.store_name, "Starting storefront");

    let catalog = CatalogState::default();
    let cart = CartState::new();

    let ids = seed_catalog(&catalog, &cart)?;
    for (id, quantity) in ids.iter().zip([10, 20, 30]) {
        cart_cmd::add_to_cart(&catalog, &cart, id)?;
        cart_cmd::update_cart_item(&catalog, &cart, id, quantity)?;
    }

    log_totals(&config, &cart_cmd::get_cart(&catalog, &cart));
    for code in ["AMOUNT5000", "PERCENT10"] {
        let response = cart_cmd::select_coupon(&catalog, &cart, Some(code))?;
        log_totals(&config, &response);
    }

    cart_cmd::clear_cart(&catalog, &cart);
    Ok(())
}

fn text(value: impl ToString) -> String {
    value.to_string()
}

/// Seeds the demo catalog through the admin commands and returns product ids.
fn seed_catalog(catalog: &CatalogState, cart: &CartState) -> AppResult<Vec<String>> {
    // (price, stock, [(tier quantity, rate %)])
    let products: [(i64, i64, &[(i64, i64)]); 3] = [
        (10_000, 20, &[(10, 10), (20, 20)]),
        (20_000, 20, &[(10, 15)]),
        (30_000, 20, &[(10, 20), (30, 25)]),
    ];

    let mut ids = Vec::with_capacity(products.len());
    for (n, (price, stock, tiers)) in products.into_iter().enumerate() {
        let form = ProductForm {
            name: format!("Product {}", n + 1),
            price: text(price),
            stock: text(stock),
            description: None,
        };
        let id = product_cmd::add_product(catalog, form)?.data.id;

        for &(quantity, rate) in tiers {
            let form = DiscountForm {
                quantity: text(quantity),
                rate: text(rate),
            };
            let outcome = product_cmd::add_discount(catalog, cart, &id, form)?;
            if !outcome.notices.is_empty() {
                warn!(product_id = %id, "Seed tier was clamped");
            }
        }
        ids.push(id);
    }

    for (code, name, kind, value) in [
        ("AMOUNT5000", "5,000 off", DiscountType::Amount, 5_000),
        ("PERCENT10", "10% off", DiscountType::Percentage, 10),
    ] {
        coupon_cmd::add_coupon(
            catalog,
            CouponForm {
                code: code.to_string(),
                name: name.to_string(),
                discount_type: kind,
                discount_value: text(value),
            },
        )?;
    }

    Ok(ids)
}

fn log_totals(config: &StoreConfig, response: &CartResponse) {
    let totals = &response.totals;
    info!(
        coupon = response.coupon.as_ref().map(|c| c.code.as_str()).unwrap_or("-"),
        items = totals.item_count,
        quantity = totals.total_quantity,
        before = %config.format_price(totals.total_before_discount),
        discount = %config.format_price(totals.total_discount),
        total = %config.format_price(totals.total_after_discount),
        "Cart totals"
    );
}
