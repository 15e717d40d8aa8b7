use tracing_subscriber::EnvFilter;

/// 診断ログをstderrに出す。RUST_LOGがあればそちらを優先
pub fn configure_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,tg_overlap=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
