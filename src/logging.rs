use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::settings::DebugLogRotation;
use crate::config::Config;

const DEFAULT_FILTER: &str = "insights=info,warn";
const DEBUG_FILTER: &str = "insights=debug,warn";
const LOG_FILE_NAME: &str = "insights-debug.log";
const SESSION_TAG: &str = "session-";

/// Keeps the non-blocking file writer alive; drop it to flush.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize logging.
///
/// Without `debug`, events go to stderr filtered by `RUST_LOG` (default
/// `insights=info,warn`). With `debug`, they go to a log file next to the
/// config file, rotated according to `debug_log_rotation`.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
        return Ok(None);
    }

    let rotation = config
        .debug_log_rotation
        .unwrap_or(DebugLogRotation::Session);
    let base = resolve_base_log_path(config.debug_log_path.as_deref())?;

    let (writer, log_path, guard) = open_writer(&base, rotation, config.debug_log_keep)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized in tests.

    tracing::info!(log_file = %log_path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn open_writer(
    base: &Path,
    rotation: DebugLogRotation,
    keep: Option<usize>,
) -> Result<(NonBlocking, PathBuf, WorkerGuard)> {
    let (dir, base_name) = split_dir_and_name(base)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    match rotation {
        DebugLogRotation::None => {
            let file = open_append(base)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Daily => {
            prune_rotated_logs(&dir, &base_name, keep.unwrap_or(7), is_daily_suffix)?;
            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Session => {
            prune_rotated_logs(&dir, &base_name, keep.unwrap_or(20), is_session_suffix)?;
            let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let session_path = dir.join(format!("{base_name}.{SESSION_TAG}{ts}"));
            let file = open_append(&session_path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            Ok((writer, session_path, guard))
        }
    }
}

fn open_append(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn resolve_base_log_path(configured: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = configured else {
        return Ok(crate::config::config_path()?.with_file_name(LOG_FILE_NAME));
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
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Delete all but the newest `keep` files named `{base_name}.{suffix}` where
/// `is_rotated(suffix)` holds.
fn prune_rotated_logs(
    dir: &Path,
    base_name: &str,
    keep: usize,
    is_rotated: fn(&str) -> bool,
) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let prefix = format!("{base_name}.");
    let mut candidates: Vec<String> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.strip_prefix(&prefix).is_some_and(is_rotated))
        .collect();

    // Suffixes are timestamps, so lexicographic order is chronological.
    candidates.sort_unstable_by(|a, b| b.cmp(a));

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// `YYYY-MM-DD`, as written by `rolling::daily`
fn is_daily_suffix(suffix: &str) -> bool {
    let bytes = suffix.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn is_session_suffix(suffix: &str) -> bool {
    suffix.starts_with(SESSION_TAG)
}

/// Best-effort redaction of Google API keys (`AIza...`) and bearer tokens
/// before response bodies are logged or surfaced in errors.
pub fn redact_secrets(input: &str) -> String {
    let masked = mask_tokens(input, "AIza", false, 20, |b| {
        b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
    });
    mask_tokens(&masked, "Bearer ", true, 8, |b| {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'+' | b'/' | b'=')
    })
}

/// Replace every run of at least `min_len` token bytes following `marker`
/// with `***REDACTED***`, keeping the marker itself.
fn mask_tokens(
    input: &str,
    marker: &str,
    ignore_case: bool,
    min_len: usize,
    is_token: fn(u8) -> bool,
) -> String {
    // ASCII case folding keeps byte offsets identical to `input`.
    let (haystack, needle) = if ignore_case {
        (input.to_ascii_lowercase(), marker.to_ascii_lowercase())
    } else {
        (input.to_string(), marker.to_string())
    };

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(found) = haystack[cursor..].find(&needle) {
        let token_start = cursor + found + needle.len();
        let token_len = bytes[token_start..]
            .iter()
            .take_while(|b| is_token(**b))
            .count();
        let token_end = token_start + token_len;

        out.push_str(&input[cursor..token_start]);
        if token_len >= min_len {
            out.push_str("***REDACTED***");
        } else {
            out.push_str(&input[token_start..token_end]);
        }
        cursor = token_end;
    }

    out.push_str(&input[cursor..]);
    out
}
