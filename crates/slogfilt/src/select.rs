//! Column selection resolution.
//!
//! Three mutually exclusive modes decide the output columns: an explicit
//! include list (caller order), an explicit exclude list (header order minus
//! the excluded set), or interactive prompting (header order).

use crate::error::{Result, SlogError};
use crate::header::HeaderModel;
use crate::matcher::match_name;
use crate::prompt::{choose_columns, TerminalIo};

/// The primary time column, force-prepended for explicit include lists.
pub const TIME_COLUMN: &str = "TIME";

/// How the caller chose the output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Emit exactly these columns, in this order.
    Include(Vec<String>),
    /// Emit every column except these, in header order.
    Exclude(Vec<String>),
    /// Ask per column.
    Interactive,
}

/// The resolved, ordered list of output column names (disambiguated).
///
/// Order is significant: it determines output column order and offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    /// The selected names in output order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of selected columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolves a [`ColumnSpec`] against the header into a [`Selection`].
///
/// Explicit names are matched case-insensitively and replaced with their
/// canonical spelling; names that match nothing are collected and reported
/// together. An include list missing the `TIME` column (case-sensitive
/// token, present in the header) gets it prepended. An empty result is an
/// error, not a no-op.
pub fn resolve_selection<T: TerminalIo>(
    spec: &ColumnSpec,
    model: &HeaderModel,
    terminal: &mut T,
) -> Result<Selection> {
    let names = match spec {
        ColumnSpec::Include(list) => {
            let mut names = resolve_names(list, model)?;
            if model.contains(TIME_COLUMN) && !names.iter().any(|n| n == TIME_COLUMN) {
                names.insert(0, TIME_COLUMN.to_string());
            }
            names
        }
        ColumnSpec::Exclude(list) => {
            let excluded = resolve_names(list, model)?;
            model
                .names()
                .filter(|name| !excluded.iter().any(|e| e == name))
                .map(str::to_string)
                .collect()
        }
        ColumnSpec::Interactive => choose_columns(model, terminal)?,
    };

    if names.is_empty() {
        return Err(SlogError::EmptySelection);
    }
    Ok(Selection { names })
}

/// Resolves each caller-supplied name to its canonical spelling,
/// aggregating every unresolvable name into one error.
fn resolve_names(list: &[String], model: &HeaderModel) -> Result<Vec<String>> {
    let mut resolved = Vec::with_capacity(list.len());
    let mut unmatched = Vec::new();

    for given in list {
        match match_name(given, model.names()) {
            Some(canonical) => resolved.push(canonical.to_string()),
            None => unmatched.push(given.clone()),
        }
    }

    if unmatched.is_empty() {
        Ok(resolved)
    } else {
        Err(SlogError::UnresolvableColumnNames(unmatched))
    }
}
