use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn rotating_file_writer(app_name: &'static str) -> Option<BoxMakeWriter> {
    let dir = std::env::var_os("RR_LOG_DIR")?;
    let dir = std::path::PathBuf::from(dir);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        tracing::warn!(error = %err, "failed to create RR_LOG_DIR; falling back to stderr");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Initialize a tracing subscriber with optional daily log rotation
/// controlled by `RR_LOG_DIR`.
///
/// When `RR_LOG_DIR` is set, logs go to `<RR_LOG_DIR>/<app>.log` with
/// daily rotation; otherwise they go to stderr so stdout stays clean for
/// the ranking output. `RUST_LOG` controls filtering, default `info`.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = rotating_file_writer(app_name)
        .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .try_init();
}
