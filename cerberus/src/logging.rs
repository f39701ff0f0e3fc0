use env_logger::Env;

/// `RUST_LOG` wins over the default level picked from `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
