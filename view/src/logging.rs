use tracing_appender::non_blocking::WorkerGuard;

use crate::prelude::*;

/// File-backed logging for the embedding application. The returned guard
/// must stay alive for buffered log lines to flush.
pub fn setup_logging(dir: &str) -> Result<WorkerGuard> {
    use tracing_appender::{non_blocking, rolling};
    use tracing_subscriber::{EnvFilter, fmt};

    let file_appender = rolling::daily(dir, "ircmux.log");
    let (non_blocking, guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt().with_writer(non_blocking).with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}
