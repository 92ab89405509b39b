use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "kisagold_storefront";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Filter used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{}=debug,info", CRATE_TARGET)
    } else {
        format!("{}=info,warn", CRATE_TARGET)
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for price board and catalog JSON.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json().flatten_event(true)).init(),
    }
}
