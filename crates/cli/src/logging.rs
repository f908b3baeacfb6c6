use anyhow::{anyhow, Result};
use markor_config::LogConfig;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const MAX_LOG_SIZE: u64 = 8 * 1024 * 1024;

/// `--log`, then `MARKOR_LOG_PATH`, then `[log] log-file`.
fn log_path(specified: Option<PathBuf>, config: &LogConfig) -> Option<PathBuf> {
    if let Some(log_path) = specified {
        Some(log_path)
    } else if let Ok(log_path) = std::env::var("MARKOR_LOG_PATH").map(PathBuf::from) {
        Some(log_path)
    } else {
        config.log_file.as_ref().map(PathBuf::from)
    }
}

fn remove_oversized(log_path: &Path) -> std::io::Result<()> {
    if let Ok(metadata) = std::fs::metadata(log_path) {
        if log_path.is_file() && metadata.len() > MAX_LOG_SIZE {
            std::fs::remove_file(log_path)?;
        }
    }
    Ok(())
}

/// Installs the global subscriber.
///
/// The returned guard flushes the log file when dropped.
pub(crate) fn init(specified: Option<PathBuf>, config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let Some(log_path) = log_path(specified, config) else {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(None);
    };

    remove_oversized(&log_path)?;

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {log_path:?}"))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("{log_path:?} has no parent"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let max_level = config.max_level.parse().unwrap_or(tracing::Level::DEBUG);

    let builder = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false);

    if config.log_target.is_empty() {
        tracing::subscriber::set_global_default(builder.finish())?;
    } else {
        let directives = format!(
            "{},{}",
            max_level.as_str().to_ascii_lowercase(),
            config.log_target
        );
        let subscriber = builder.with_env_filter(EnvFilter::try_new(directives)?).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    tracing::debug!(log = %log_path.display(), "Logging initialized");

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specified_log_path_wins() {
        let config = LogConfig {
            log_file: Some("/tmp/from-config.log".into()),
            ..Default::default()
        };
        assert_eq!(
            log_path(Some(PathBuf::from("/tmp/cli.log")), &config),
            Some(PathBuf::from("/tmp/cli.log"))
        );
    }

    #[test]
    fn test_oversized_log_is_removed() {
        let dir = tempfile::tempdir().unwrap();

        let small = dir.path().join("small.log");
        std::fs::write(&small, "line\n").unwrap();
        remove_oversized(&small).unwrap();
        assert!(small.exists());

        let large = dir.path().join("large.log");
        let file = std::fs::File::create(&large).unwrap();
        file.set_len(MAX_LOG_SIZE + 1).unwrap();
        remove_oversized(&large).unwrap();
        assert!(!large.exists());

        remove_oversized(&dir.path().join("missing.log")).unwrap();
    }
}
