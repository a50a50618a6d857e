//! slogfilt - column selection and row filtering for slog files.
//!
//! A slog file is a self-describing columnar text log: a short free-form
//! preamble, a header declaring one column per line, and whitespace-separated
//! data rows. This crate reads one, lets the caller choose a subset of
//! columns (explicitly or interactively), optionally filters rows with a
//! query template like `@NAV_X@ > 10`, and writes a re-formatted file with a
//! reconstructed header and fixed-width columns.
//!
//! # Pipeline
//!
//! ```text
//! header lines -> HeaderModel -> {Selection, QueryTemplate}
//!                                      |
//!            per row: parse -> query evaluate -> fixed-width format
//! ```
//!
//! Duplicate column names are disambiguated with an occurrence counter
//! (`FOO` twice becomes `FOO__1`/`FOO__2`); callers refer to the unique
//! names, while output shows the original ones. See [`header::HeaderModel`].
//!
//! The expression language used for queries lives in the `slogfilt-expr`
//! crate.

pub mod cli;
pub mod error;
pub mod format;
pub mod header;
pub mod matcher;
pub mod pipeline;
pub mod prompt;
pub mod query;
pub mod row;
pub mod select;

pub use error::{Result, SlogError};
pub use header::{Column, HeaderModel};
pub use pipeline::{filter_slog, run, FilterOptions, RunOptions};
pub use query::QueryTemplate;
pub use select::{ColumnSpec, Selection};
