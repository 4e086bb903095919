use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. An explicit `filter` wins over `RUST_LOG`,
/// which wins over `default_filter`. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(filter: Option<&str>, default_filter: &str) {
    let env_filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
