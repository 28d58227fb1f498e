use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Directives used when neither `RUST_LOG` nor `[logging] filter` is set.
pub fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "secid=info",
        1 => "secid=debug",
        _ => "secid=trace",
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout carries
/// only command output.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let fallback = match (&config.filter, verbose) {
        (Some(filter), 0) => filter.clone(),
        _ => default_directives(verbose).to_owned(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
