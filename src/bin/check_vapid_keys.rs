//! Run: cargo run --bin check-vapid-keys
use anyhow::{bail, Result};
use tracing::info;

use vapid_keygen::{check, config::Config};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    vapid_keygen::init_tracing();

    let config = Config::from_env();
    let report = check::check(&config);
    println!("{report}");

    if !report.is_ready() {
        bail!("VAPID keys are not properly configured");
    }
    info!("VAPID configuration is ready");
    Ok(())
}
