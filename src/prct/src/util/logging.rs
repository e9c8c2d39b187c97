//! Logging utilities

use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// Priority: RUST_LOG > `--verbose` (DEBUG) > default (INFO). Logs go to
/// stderr so stdout only carries results.
pub fn init_logging(verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false);

    if std::env::var("RUST_LOG").is_ok() {
        builder.with_env_filter(EnvFilter::from_default_env()).init();
    } else if verbose {
        builder.with_max_level(tracing::Level::DEBUG).init();
    } else {
        builder.with_max_level(tracing::Level::INFO).init();
    }
}
