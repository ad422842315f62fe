//! The logging seam: the search emits diagnostic strings through a `Logger`
//! so callers choose where they go. The default sink forwards to `tracing`;
//! tests use the null sink.

pub trait Logger {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Discards everything. For tests and silent hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}

/// Forwards to `tracing` events under the `search` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "search", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "search", "{message}");
    }
}

#[cfg(feature = "cli")]
pub use subscriber::init_logging;

#[cfg(feature = "cli")]
mod subscriber {
    use std::{path::Path, sync::OnceLock};
    use tracing_subscriber::{EnvFilter, fmt};

    static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
    static INIT: OnceLock<()> = OnceLock::new();

    /// Initialize logging once for the whole process.
    /// - `path`: e.g., "logs/acumen.log"
    /// - `filter`: e.g., "search=debug"
    pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) {
        INIT.get_or_init(|| {
            let path = path.as_ref();

            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .expect("open log file");

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            // Keep the guard alive for the program lifetime
            let _ = GUARD.set(guard);

            // Allow runtime filtering like: RUST_LOG="search=debug"
            let env_filter = if std::env::var_os("RUST_LOG").is_some() {
                EnvFilter::from_default_env()
            } else {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
            };

            let subscriber = fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_target(true)
                .with_writer(non_blocking)
                .finish();

            // Ignore error if someone already set a global subscriber
            let _ = tracing::subscriber::set_global_default(subscriber);
        });
    }
}
