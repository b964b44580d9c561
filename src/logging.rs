//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize logging with `RUST_LOG` support.
///
/// Defaults to `linkpath=info` when `RUST_LOG` is not set. `verbose`
/// raises the default to `debug`. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "linkpath=debug" } else { "linkpath=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
