//! Log output for the binary.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber; `log` records from the libraries are
/// bridged into it.
///
/// With no `-v` flags the filter comes from `RUST_LOG`, falling back to
/// warnings only. Each `-v` raises the level.
pub(crate) fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // A subscriber may already be installed when embedded; keep it.
    let _installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
