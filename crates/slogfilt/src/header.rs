//! Slog header parsing and the column model.
//!
//! A slog header declares one column per line as `%% (<n>) <name>`, with
//! 1-based contiguous positions, terminated by a blank line and followed by
//! one column-name echo line that is consumed without validation.
//!
//! Raw column names may repeat. Duplicates are disambiguated by appending an
//! occurrence counter (`FOO` twice becomes `FOO__1` and `FOO__2`), and the
//! model keeps the reverse mapping so output can show the original names.

use std::io::BufRead;

use crate::error::{Result, SlogError};

/// One declared column.
///
/// Created during header parsing, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Unique name: the raw name, or `raw__<k>` when the raw name repeats.
    pub name: String,
    /// The name as declared in the header, possibly shared with others.
    pub raw: String,
    /// 1-based column position.
    pub position: usize,
}

impl Column {
    /// Whether disambiguation changed this column's name.
    pub fn was_renamed(&self) -> bool {
        self.name != self.raw
    }
}

/// The parsed header: every column in position order, plus the raw-name
/// occurrence counts needed for a deterministic rename report.
#[derive(Debug, Clone, Default)]
pub struct HeaderModel {
    columns: Vec<Column>,
    /// Raw-name occurrence counts in first-appearance order.
    occurrences: Vec<(String, usize)>,
}

impl HeaderModel {
    /// Parses the header block from `reader`.
    ///
    /// Consumes header lines up to and including the terminating blank line,
    /// then one further line (the column-name echo), whose contents are not
    /// cross-checked against the declared names.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<HeaderModel> {
        let mut model = HeaderModel::default();
        let mut position = 1;

        loop {
            let line = match read_line(reader)? {
                Some(line) => line,
                None => break,
            };
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 || fields[0] != "%%" {
                return Err(SlogError::MalformedHeaderLine(line.to_string()));
            }

            let expected = format!("({})", position);
            if fields[1] != expected {
                return Err(SlogError::HeaderOutOfSequence {
                    expected,
                    found: fields[1].to_string(),
                });
            }

            model.add_column(fields[2], position);
            position += 1;
        }

        // The column-name echo line. Its presence is assumed; its contents
        // are not validated against the declared names.
        let _ = read_line(reader)?;

        Ok(model)
    }

    fn add_column(&mut self, raw: &str, position: usize) {
        match self.occurrences.iter_mut().find(|(name, _)| name == raw) {
            Some((_, count)) => {
                if *count == 1 {
                    // The first occurrence was recorded under its raw name
                    // before we knew it would repeat; rename it now.
                    let first = self
                        .columns
                        .iter_mut()
                        .find(|c| c.name == raw)
                        .expect("first occurrence must have been recorded");
                    first.name = format!("{}__1", raw);
                }
                *count += 1;
                self.columns.push(Column {
                    name: format!("{}__{}", raw, count),
                    raw: raw.to_string(),
                    position,
                });
            }
            None => {
                self.occurrences.push((raw.to_string(), 1));
                self.columns.push(Column {
                    name: raw.to_string(),
                    raw: raw.to_string(),
                    position,
                });
            }
        }
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the header declared no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in position order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Disambiguated names in position order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// 1-based position of a disambiguated name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.position)
    }

    /// Whether the disambiguated name exists in this header.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// The name to show in output for a disambiguated name: the original raw
    /// name for renamed columns, the name itself otherwise.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        match self.columns.iter().find(|c| c.name == name) {
            Some(col) if col.was_renamed() => col.raw.as_str(),
            _ => name,
        }
    }

    /// Whether any column needed disambiguation.
    pub fn any_renamed(&self) -> bool {
        self.occurrences.iter().any(|(_, count)| *count > 1)
    }

    /// Human-readable report of every rename performed, or `None` when no
    /// raw name repeated. Iterates duplicated names in first-appearance
    /// order, so the report is stable across runs.
    pub fn rename_report(&self) -> Option<String> {
        if !self.any_renamed() {
            return None;
        }

        let mut report = String::from(
            "*** PLEASE NOTE ***\n\
             Some columns in the supplied slog file share a variable name. To refer\n\
             to them individually, this tool renames such columns by appending an\n\
             occurrence counter. The renames performed on this input are:\n\n",
        );
        for (raw, count) in &self.occurrences {
            if *count > 1 {
                report.push_str(raw);
                report.push_str(" ==>\n");
                for n in 1..=*count {
                    report.push_str(&format!("     {}__{}\n", raw, n));
                }
                report.push('\n');
            }
        }
        report.push_str(
            "These columns will appear in the output file under their original,\n\
             potentially ambiguous names.\n",
        );
        Some(report)
    }
}

/// Reads one line, returning `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
