//! checkrun CLI entry point

fn main() {
    // Structured logging goes to stderr so it never interleaves with the status table on stdout.
    // CHECKRUN_LOG wins over RUST_LOG; default is warn.
    let filter = tracing_subscriber::EnvFilter::try_from_env("CHECKRUN_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    checkrun::cli::run();
}
