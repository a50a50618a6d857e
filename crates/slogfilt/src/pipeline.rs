//! The single-pass filtering pipeline.
//!
//! One input is read top to bottom exactly once and one output is written
//! top to bottom exactly once. The header model, selection, query, and
//! column layout are all finalized before the row loop starts and never
//! change during it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{Result, SlogError};
use crate::format::Formatter;
use crate::header::HeaderModel;
use crate::prompt::{RealTerminal, TerminalIo};
use crate::query::QueryTemplate;
use crate::row::Row;
use crate::select::{resolve_selection, ColumnSpec};

/// Number of free-form preamble lines copied verbatim.
const PREAMBLE_LINES: usize = 5;

/// What to filter and how.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// How output columns are chosen.
    pub spec: ColumnSpec,
    /// Optional row-filter query template.
    pub query: Option<String>,
}

/// A full run: input/output locations plus the filter options.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path of the slog file to read.
    pub input: PathBuf,
    /// Output path; `None` writes to stdout. An existing file is refused.
    pub output: Option<PathBuf>,
    /// Column selection and query.
    pub filter: FilterOptions,
}

/// Runs the pipeline against the filesystem.
pub fn run(options: &RunOptions) -> Result<()> {
    let mut reader = BufReader::new(File::open(&options.input)?);

    match &options.output {
        Some(path) => {
            if path.exists() {
                return Err(SlogError::OutputExists(path.clone()));
            }
            let mut writer = BufWriter::new(File::create(path)?);
            filter_slog(&mut reader, &mut writer, &options.filter, &mut RealTerminal)?;
            writer.flush()?;
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            filter_slog(&mut reader, &mut writer, &options.filter, &mut RealTerminal)
        }
    }
}

/// Filters one slog stream into another.
///
/// Generic over the I/O endpoints and the terminal so the whole pipeline is
/// testable in memory.
pub fn filter_slog<R, W, T>(
    reader: &mut R,
    writer: &mut W,
    options: &FilterOptions,
    terminal: &mut T,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    T: TerminalIo,
{
    // The preamble is copied verbatim (trailing whitespace trimmed), but
    // written only after the selection and query have validated; a header
    // fragment followed by an error message reads badly.
    let mut preamble = Vec::with_capacity(PREAMBLE_LINES);
    for _ in 0..PREAMBLE_LINES {
        preamble.push(read_line(reader)?.unwrap_or_default());
    }

    let model = HeaderModel::from_reader(reader)?;

    if let Some(report) = model.rename_report() {
        eprintln!("{}", report);
    }

    let selection = resolve_selection(&options.spec, &model, terminal)?;

    let query = match &options.query {
        Some(template) => Some(QueryTemplate::parse(template, &model)?),
        None => None,
    };

    let formatter = Formatter::new(&selection, &model);
    write_header(writer, &preamble, &formatter)?;

    // Data lines start after the preamble, the header block with its blank
    // terminator, and the echo line.
    let mut line_number = PREAMBLE_LINES + model.len() + 2;

    while let Some(line) = read_line(reader)? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let row = Row::parse(line, model.len(), line_number)?;

        if let Some(query) = &query {
            if !query.matches_row(&row)? {
                continue;
            }
        }

        writeln!(writer, "{}", formatter.data_line(&row))?;
    }

    Ok(())
}

/// Writes the reconstructed output header.
fn write_header<W: Write>(
    writer: &mut W,
    preamble: &[String],
    formatter: &Formatter,
) -> Result<()> {
    for line in preamble {
        writeln!(writer, "{}", line)?;
    }
    writeln!(writer)?;

    for line in formatter.header_block() {
        writeln!(writer, "{}", line)?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}", formatter.delimiter_line())?;
    writeln!(writer, "{}", formatter.name_line())?;

    Ok(())
}

/// Reads one line with the trailing newline and surrounding whitespace
/// trimmed, returning `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim_end().to_string()))
    }
}
