use {
    std::{panic::PanicHookInfo, sync::Once},
    tracing_subscriber::{EnvFilter, fmt, prelude::*},
};

/// Initializes the global tracing subscriber.
///
/// `env_filter` has the same syntax as `RUST_LOG`. Lines are emitted as JSON
/// objects when `use_json` is set. Calling this more than once is a no-op.
pub fn initialize(env_filter: &str, use_json: bool) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(env_filter, use_json);
        std::panic::set_hook(Box::new(tracing_panic_hook));
    });
}

fn set_tracing_subscriber(env_filter: &str, use_json: bool) {
    let filter = EnvFilter::try_new(env_filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {env_filter:?} ({err}), falling back to \"info\"");
        EnvFilter::new("info")
    });

    let registry = tracing_subscriber::registry().with(filter);
    if use_json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(fmt::layer().with_ansi(std::io::IsTerminal::is_terminal(&std::io::stdout())))
            .init();
    }
}

fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!(thread = name, "{panic}\n{backtrace}");
}
