//! logging
//!
//! Developer diagnostics via `tracing`.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: diagnostics on stderr, filtered by `RUST_LOG`
//!   or `--debug`. Not part of the product output.
//! - **Operator output ([`crate::ui::output`])**: prompts, status lines,
//!   errors and hints. Unaffected by `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "tfguard=debug"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug output for
/// this crate and everything else stays at `warn`.
///
/// # Example
/// ```bash
/// RUST_LOG=tfguard=trace tfguard validate
/// ```
pub fn init(debug: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    // A second init (as in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
