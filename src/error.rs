//! Errors from the host side of the reader: terminal, files, encoding.
//!
//! Widget transitions cannot fail, and clipboard failures are swallowed
//! by the copy affordance, so neither appears here.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no cache directory available for the default log file; pass --log-file")]
    NoLogDir,
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no prompt #{index}; the chapter has prompts 1-{count}")]
    UnknownPrompt { index: usize, count: usize },
    #[error("clipboard write failed: {0}")]
    Clipboard(io::Error),
}
