//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::{FilterOptions, RunOptions};
use crate::select::ColumnSpec;

/// Select columns from a slog file and optionally filter its rows.
///
/// With `--vars` or `--hidevars` the output columns are fixed up front;
/// without either, the tool asks a yes/no question per column.
#[derive(Debug, Parser)]
#[command(name = "slog-filt", version, about)]
pub struct Cli {
    /// The slog file to read.
    #[arg(value_name = "IN-FILE")]
    pub input: PathBuf,

    /// Columns to include, in output order (TIME is prepended if missing).
    #[arg(long, value_name = "VAR", num_args = 1.., conflicts_with = "hidevars")]
    pub vars: Option<Vec<String>>,

    /// Columns to omit; every other column is kept in header order.
    #[arg(long, value_name = "VAR", num_args = 1..)]
    pub hidevars: Option<Vec<String>>,

    /// Row-filter query template, e.g. '@NAV_X@ > 10'.
    #[arg(long, value_name = "QUERY")]
    pub select: Option<String>,

    /// Output file. Defaults to stdout; an existing file is never
    /// overwritten.
    #[arg(long, value_name = "OUT-FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Maps parsed arguments onto pipeline options.
    pub fn into_options(self) -> RunOptions {
        let spec = match (self.vars, self.hidevars) {
            (Some(vars), _) => ColumnSpec::Include(vars),
            (None, Some(hidevars)) => ColumnSpec::Exclude(hidevars),
            (None, None) => ColumnSpec::Interactive,
        };
        RunOptions {
            input: self.input,
            output: self.output,
            filter: FilterOptions {
                spec,
                query: self.select,
            },
        }
    }
}
