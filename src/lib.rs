pub mod check;
pub mod config;
pub mod error;
pub mod keys;
pub mod output;

pub use error::KeyError;
pub use keys::VapidKeys;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr log subscriber shared by both binaries.
///
/// Standard output is reserved for the program's actual output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
