use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub(crate) const LOG_ENV: &str = "CODESCAPE_LOG";

/// Install the stderr subscriber. `CODESCAPE_LOG` wins over `verbose`.
pub(crate) fn init(verbose: bool) -> Result<(), String> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| err.to_string())
}
