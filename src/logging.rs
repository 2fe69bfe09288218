use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr subscriber used by every demo binary.
///
/// `RUST_LOG` wins over the default filter, e.g.
/// `RUST_LOG=pattern_playground=debug cargo run --bin proxy`.
pub fn init_demo_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pattern_playground=warn"));

    // A second call (tests, repeated init) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
