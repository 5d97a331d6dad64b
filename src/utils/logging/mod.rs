//! Logging setup and log-safe helpers
//!
//! Both binaries install the same `tracing` subscriber. Filtering follows
//! `RUST_LOG` when it is set and falls back to the given default directive.

use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `json` switches the formatter to one JSON object per line.
pub fn init_tracing(default_directive: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    // A subscriber may already be installed (tests, embedding), which is fine.
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Short, stable fingerprint of a secret for log lines
///
/// Never log raw API keys; log this instead so repeated failures can still be
/// correlated.
pub fn fingerprint(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}
