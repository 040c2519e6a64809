use std::io;

use thiserror::Error;

/// Whole-stage failures when materializing a dataset from the
/// canonical corpus. A missing or unreadable corpus file surfaces as
/// `Io`; a line that does not parse as a canonical sample surfaces as
/// `Json` — the corpus is produced by the extract stage, so corruption
/// there is fatal rather than skippable.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("malformed corpus line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
