//! Tracing subscriber setup.
//!
//! The interactive reader owns the terminal, so its logs go to a file.
//! The other subcommands log to stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

use crate::error::ChapterError;

/// Where logs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Map `-v` occurrences to a level: warn, info, debug, trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `<cache dir>/data-chapter/reader.log`.
pub fn default_log_path() -> Result<PathBuf, ChapterError> {
    dirs::cache_dir()
        .map(|dir| dir.join("data-chapter").join("reader.log"))
        .ok_or(ChapterError::NoLogDir)
}

/// Open `path` for appending, creating parent directories.
pub fn open_log_file(path: &Path) -> Result<File, ChapterError> {
    let to_err = |source| ChapterError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)
}

/// Install the global subscriber. Call once, before any logging.
pub fn init(target: &LogTarget, verbosity: u8) -> Result<(), ChapterError> {
    let builder = tracing_subscriber::fmt().with_max_level(level_for(verbosity));
    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(9), Level::TRACE);
    }

    #[test]
    fn open_log_file_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("deeper").join("reader.log");
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "hello").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn open_log_file_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reader.log");
        writeln!(open_log_file(&path).unwrap(), "one").unwrap();
        writeln!(open_log_file(&path).unwrap(), "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn open_log_file_reports_the_path_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file
        let err = open_log_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(&tmp.path().display().to_string()));
    }
}
