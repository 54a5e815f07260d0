//! Run: cargo run --bin generate-vapid-keys
use anyhow::{Context, Result};
use tracing::info;

fn main() -> Result<()> {
    vapid_keygen::init_tracing();

    let keys = vapid_keygen::keys::generate().context("VAPID key generation failed")?;
    info!("Generated VAPID key pair");

    let stdout = std::io::stdout();
    vapid_keygen::output::write(&mut stdout.lock(), &keys).context("failed to write keys")?;

    Ok(())
}
