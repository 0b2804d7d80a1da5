use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "sage-lens-debug.log";

/// Keeps the non-blocking log writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _guard: WorkerGuard,
    pub path: PathBuf,
}

/// Initialize debug logging.
///
/// The terminal belongs to the TUI, so logs only go to a file and only when
/// `debug = true`. Otherwise this is a no-op.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::Session);
    let base = resolve_base_log_path(config.debug_log_path.as_deref())?;
    let (dir, base_name) = split_dir_and_name(&base)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, path, guard) = open_writer(rotation, &dir, &base_name, config.debug_log_keep)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("sage_lens=debug,warn"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized (e.g. in tests).

    tracing::info!(log_file = %path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard {
        _guard: guard,
        path,
    }))
}

fn open_writer(
    rotation: DebugLogRotation,
    dir: &Path,
    base_name: &str,
    keep: Option<usize>,
) -> Result<(NonBlocking, PathBuf, WorkerGuard)> {
    match rotation {
        DebugLogRotation::None => {
            let path = dir.join(base_name);
            let (writer, guard) = tracing_appender::non_blocking(append_file(&path)?);
            Ok((writer, path, guard))
        }
        DebugLogRotation::Daily => {
            // tracing_appender names daily files `{base_name}.{YYYY-MM-DD}`.
            cleanup_rotated_logs(dir, &format!("{base_name}."), keep.unwrap_or(7))?;
            let appender = tracing_appender::rolling::daily(dir, base_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Ok((writer, dir.join(base_name), guard))
        }
        DebugLogRotation::Session => {
            cleanup_rotated_logs(dir, &format!("{base_name}.session-"), keep.unwrap_or(20))?;
            let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let path = dir.join(format!("{base_name}.session-{ts}"));
            let (writer, guard) = tracing_appender::non_blocking(append_file(&path)?);
            Ok((writer, path, guard))
        }
    }
}

fn append_file(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn resolve_base_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &raw[1..]);
        }
    }
    raw.to_string()
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Remove all but the newest `keep` files in `dir` starting with `prefix`.
fn cleanup_rotated_logs(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let mut candidates: Vec<String> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(prefix))
        .collect();

    // Both suffix formats sort lexicographically by time; newest first.
    candidates.sort_unstable_by(|a, b| b.cmp(a));

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Best-effort redaction of API keys (`sk-...`, `tvly-...`) in provider error bodies.
pub fn redact_secrets(input: &str) -> String {
    const PREFIXES: [&str; 2] = ["sk-", "tvly-"];

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    'outer: while !rest.is_empty() {
        for prefix in PREFIXES {
            if let Some(tail) = rest.strip_prefix(prefix) {
                let key_len = tail
                    .bytes()
                    .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
                    .count();
                // Short runs are more likely ordinary words than keys.
                if key_len >= 8 {
                    out.push_str(prefix);
                    out.push_str("***REDACTED***");
                    rest = &tail[key_len..];
                    continue 'outer;
                }
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_openai_and_tavily_keys() {
        let input = r#"{"error":"bad key sk-abcdef1234567890 and tvly-XYZ12345678"}"#;
        let out = redact_secrets(input);
        assert!(!out.contains("abcdef1234567890"));
        assert!(!out.contains("XYZ12345678"));
        assert!(out.contains("sk-***REDACTED***"));
        assert!(out.contains("tvly-***REDACTED***"));
    }

    #[test]
    fn redacts_keys_echoed_in_search_error_bodies() {
        let body = r#"{"message":"Unauthorized.","statusCode":403,"detail":"key tvly-dev-0123456789ab rejected"}"#;
        let out = redact_secrets(body);
        assert!(!out.contains("0123456789ab"));
        assert!(out.contains("\"statusCode\":403"));
    }

    #[test]
    fn leaves_short_matches_and_unicode_alone() {
        let input = "task-list: sk-short ✓ ünïcode";
        assert_eq!(redact_secrets(input), input);
    }

    #[test]
    fn cleanup_keeps_newest_files() {
        let dir = tempfile::TempDir::new().unwrap();
        for ts in ["20240101-000000", "20240102-000000", "20240103-000000"] {
            std::fs::write(dir.path().join(format!("app.log.session-{ts}")), "x").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.txt"), "x").unwrap();

        cleanup_rotated_logs(dir.path(), "app.log.session-", 2).unwrap();

        assert!(!dir.path().join("app.log.session-20240101-000000").exists());
        assert!(dir.path().join("app.log.session-20240102-000000").exists());
        assert!(dir.path().join("app.log.session-20240103-000000").exists());
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn explicit_directory_gets_default_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let raw = dir.path().to_str().unwrap();
        let path = resolve_base_log_path(Some(raw)).unwrap();
        assert_eq!(path, dir.path().join(LOG_FILE_NAME));
    }
}
