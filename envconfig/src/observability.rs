//! Observability: tracing init.
//!
//! Logs go to stderr so `vars` / `describe` output on stdout stays machine-readable.

use envconfig_core::config::{BoolSetting, DEBUG};
use tracing_subscriber::{prelude::*, EnvFilter};

const LOG_JSON: BoolSetting = BoolSetting::new("ENVCONFIG_LOG_JSON");

/// Initialize tracing. Call once at process startup.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when OLLAMA_DEBUG is on.
/// JSON output when `json` is requested or ENVCONFIG_LOG_JSON is on.
pub fn init_tracing(json: bool) {
    let json = json || LOG_JSON.get();
    let level = if DEBUG.get() {
        "envconfig=debug,envconfig_core=debug"
    } else {
        "envconfig=info,envconfig_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}
