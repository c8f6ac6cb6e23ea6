//! Tracing configuration for test output.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Safe to call from every test; only the first call installs the subscriber.
/// Uses `RUST_LOG` if set, otherwise defaults to `info` with harness debug
/// output.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,dnaf_testkit=debug"));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .init();
    });
}

/// Initialize silent tracing.
///
/// For tests that intentionally trigger failures and don't want log noise.
pub fn init_test_tracing_silent() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(EnvFilter::new("off"))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
