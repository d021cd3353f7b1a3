//! Tracing initialisation shared by both functions.

use tracing_subscriber::EnvFilter;

/// Install a JSON subscriber for the binary crate `bin_crate`.
///
/// `RUST_LOG` wins when set; otherwise the binary and this library log at `debug`
/// or `info` depending on `verbose`.
pub fn init(bin_crate: &str, verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},{}={},lambda_runtime=info,aws_config=warn",
            env!("CARGO_CRATE_NAME"),
            log_level,
            bin_crate,
            log_level
        ))
    });

    // CloudWatch timestamps every line already
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .without_time()
        .with_target(false)
        .init();
}
