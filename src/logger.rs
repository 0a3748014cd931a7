use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Logs carry the thread name so frames
/// handled on the `frame-processor` worker are easy to tell apart.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let span_events = span_events_for(&env_filter.to_string());

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Span close events carry per-stage busy/idle times; only worth the noise
/// at debug verbosity or finer.
fn span_events_for(filter: &str) -> FmtSpan {
    if filter.contains("debug") || filter.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}
