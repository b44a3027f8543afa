//! # Storefront Admin Entry Point
//!
//! ```text
//! storefront-admin [CONFIG.toml]
//! ```
//! Without an argument the config path comes from `STOREFRONT_CONFIG`, and
//! without that the built-in defaults are used.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    storefront_admin::init_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    match storefront_admin::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront failed");
            ExitCode::FAILURE
        }
    }
}
