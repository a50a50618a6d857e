//! Error types for slog filtering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while filtering a slog file.
///
/// Every variant is fatal for the run: this is a single-shot batch tool and
/// none of these conditions is retried or recovered from.
#[derive(Debug, Error)]
pub enum SlogError {
    /// A header line that is not `%% (<n>) <name>`.
    #[error("this doesn't look like a column description line: {0}")]
    MalformedHeaderLine(String),

    /// Column markers out of sequence in the header.
    #[error("malformed header: expected column marker '{expected}' but found '{found}'")]
    HeaderOutOfSequence { expected: String, found: String },

    /// Caller-specified names that match no column, aggregated.
    #[error("these variables aren't in the supplied slog file: {}", .0.join(", "))]
    UnresolvableColumnNames(Vec<String>),

    /// The query template has an odd number of '@' separators.
    #[error("the query string looks wrong: it has an odd number of '@' symbols")]
    UnbalancedQuerySeparators,

    /// Query references that match no column, aggregated.
    #[error("the query string has some column names that don't appear in the slog file: {}", .0.join(", "))]
    UnknownQueryColumns(Vec<String>),

    /// A data line whose field count disagrees with the header.
    #[error("line {line_number} has {found} fields, but the slog header declared {expected} columns")]
    RowShapeMismatch {
        line_number: usize,
        expected: usize,
        found: usize,
    },

    /// The substituted query expression failed to evaluate.
    #[error("problem evaluating query string:\n    {expression}\n{source}")]
    QueryEvaluationFailure {
        expression: String,
        source: slogfilt_expr::ExprError,
    },

    /// The resolved output column list is empty.
    #[error("no output columns selected, so nothing to do")]
    EmptySelection,

    /// The requested output file already exists.
    #[error("the file {} already exists (this tool does not overwrite files)", .0.display())]
    OutputExists(PathBuf),

    /// Input ended while waiting for an interactive answer.
    #[error("input closed while waiting for a column choice")]
    PromptClosed,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for slog operations.
pub type Result<T> = std::result::Result<T, SlogError>;
