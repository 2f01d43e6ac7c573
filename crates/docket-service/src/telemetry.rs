//! # Logging Setup
//!
//! One-call tracing initialization for binaries embedding the service.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// ## Environment Variables
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=docket=trace` - Show trace for docket crates only
/// - Default: INFO level, docket crates at DEBUG, sqlx quieted
///
/// Call once at startup; a second call panics (the global subscriber can
/// only be set once), so embedders with their own subscriber skip this.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,docket=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
