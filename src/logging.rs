//! Tracing subscriber setup for the `titer` binary.
//!
//! Logs go to stderr so stdout stays clean for results (and `--json`).

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, Settings};

const DEFAULT_FILTER: &str = "titer_calc=info";
const VERBOSE_FILTER: &str = "titer_calc=debug,info";

/// Pick the filter: `TITER_LOG`, then `RUST_LOG`, then the built-in default.
///
/// `TITER_LOG` was already validated by [`Settings::from_lookup`].
pub fn resolve_filter(settings: &Settings, verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    if let Some(directives) = &settings.log_filter {
        return EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(fallback));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn init(settings: &Settings, verbose: bool) {
    let filter = resolve_filter(settings, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // `try_init` so repeated calls (tests, embedding) don't panic.
    let _ = match settings.log_format {
        LogFormat::Compact => registry.with(fmt.compact()).try_init(),
        LogFormat::Json => registry.with(fmt.json()).try_init(),
    };
}
