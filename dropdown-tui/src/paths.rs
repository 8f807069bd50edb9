//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "dropdown";
const APPLICATION: &str = "dropdown-tui";

/// Name of the optional widget config file inside the config directory.
const CONFIG_FILE: &str = "dropdown.json";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/dropdown-tui` or `~/.cache/dropdown-tui`
/// - macOS: `~/Library/Caches/dev.dropdown.dropdown-tui`
/// - Windows: `C:\Users\<User>\AppData\Local\dropdown\dropdown-tui\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/dropdown-tui` or `~/.config/dropdown-tui`
/// - macOS: `~/Library/Application Support/dev.dropdown.dropdown-tui`
/// - Windows: `C:\Users\<User>\AppData\Roaming\dropdown\dropdown-tui\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the widget config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Rotate logs: rename latest.log to timestamped name, clean up old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join("latest.log");

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{}.log", timestamp));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(&cache, MAX_OLD_LOGS);
}

/// Remove archived log files, keeping only the `keep` most recent.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_latest_and_newest() {
        let dir = std::env::temp_dir().join(format!("dropdown-tui-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["a.log", "b.log", "c.log", "latest.log", "notes.txt"] {
            fs::write(dir.join(name), name).unwrap();
        }

        cleanup_old_logs(&dir, 1);

        let mut left: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left.len(), 3);
        assert!(left.contains(&"latest.log".to_string()));
        assert!(left.contains(&"notes.txt".to_string()));

        fs::remove_dir_all(&dir).unwrap();
    }
}
