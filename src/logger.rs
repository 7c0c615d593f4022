
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Library and binary at info, dependencies at warn.
pub const DEFAULT_DIRECTIVES: &str = "warn,rawbind_rs=info,rawbind=info";

/// Filter from `RUST_LOG` when it is set and valid, otherwise `DEFAULT_DIRECTIVES`.
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Whether per-stage spans should report their duration when they close.
pub fn reports_stage_spans(filter: &EnvFilter) -> bool {
    let directives = filter.to_string();
    directives.contains("debug") || directives.contains("trace")
}

/// Installs the global subscriber for the `rawbind` binary.
pub fn init() {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(rust_log.as_deref());

    let span_events = if reports_stage_spans(&filter) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
