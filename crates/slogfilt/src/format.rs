//! Fixed-width output formatting.
//!
//! Column start offsets are fixed by selection index alone: the first column
//! starts at offset 0, every later column at `1 + 19 * index`. The layout is
//! computed once from the finalized selection and never changes during the
//! row loop. Values longer than the field pitch are not truncated; they
//! simply run into the next column.

use crate::header::HeaderModel;
use crate::row::Row;
use crate::select::Selection;

/// Field pitch between column start offsets.
const COLUMN_PITCH: usize = 19;

/// Width of the `%` delimiter line emitted above the column-name line.
const DELIMITER_WIDTH: usize = 56;

/// One output column with its precomputed layout.
#[derive(Debug, Clone)]
struct OutputColumn {
    /// Start offset within the output line.
    offset: usize,
    /// 1-based position in the input row.
    position: usize,
    /// Name shown in output: the raw name for disambiguated columns.
    display: String,
}

/// Renders selected columns into fixed-width lines.
#[derive(Debug, Clone)]
pub struct Formatter {
    columns: Vec<OutputColumn>,
}

impl Formatter {
    /// Precomputes the layout for a selection.
    ///
    /// Every selected name comes from resolution against the same header, so
    /// the position lookups cannot fail.
    pub fn new(selection: &Selection, model: &HeaderModel) -> Formatter {
        let columns = selection
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| OutputColumn {
                offset: if index == 0 { 0 } else { 1 + COLUMN_PITCH * index },
                position: model
                    .position_of(name)
                    .expect("selected name must be in the header"),
                display: model.display_name(name).to_string(),
            })
            .collect();
        Formatter { columns }
    }

    /// The renumbered header declaration lines for the selected columns.
    pub fn header_block(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("%%   ({}) {}", i + 1, col.display))
            .collect()
    }

    /// The `%` delimiter line above the column-name line.
    pub fn delimiter_line(&self) -> String {
        "%".repeat(DELIMITER_WIDTH)
    }

    /// The fixed-width column-name line, showing original (possibly
    /// ambiguous) names.
    pub fn name_line(&self) -> String {
        let mut line = String::from("%% ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                pad_to(&mut line, col.offset);
            }
            line.push_str(&col.display);
        }
        line
    }

    /// One fixed-width data line for a row.
    pub fn data_line(&self, row: &Row) -> String {
        let mut line = String::new();
        for col in &self.columns {
            pad_to(&mut line, col.offset);
            line.push_str(row.value_at(col.position));
        }
        line
    }
}

/// Pads with single spaces up to `offset`. A line already at or past the
/// offset gets no padding, and columns visually collide; that is accepted
/// behavior, not an error.
fn pad_to(line: &mut String, offset: usize) {
    let needed = offset.saturating_sub(line.len());
    for _ in 0..needed {
        line.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MockTerminal;
    use crate::select::{resolve_selection, ColumnSpec};
    use std::io::Cursor;

    fn setup(header: &str, include: &[&str]) -> (HeaderModel, Formatter) {
        let model = HeaderModel::from_reader(&mut Cursor::new(header)).unwrap();
        let spec = ColumnSpec::Include(include.iter().map(|s| s.to_string()).collect());
        let selection = resolve_selection(&spec, &model, &mut MockTerminal::eof()).unwrap();
        let formatter = Formatter::new(&selection, &model);
        (model, formatter)
    }

    #[test]
    fn offsets_follow_fixed_pitch() {
        let (_, formatter) = setup("%% (1) TIME\n%% (2) A\n%% (3) B\n\necho\n", &["A", "B"]);
        // Selection is TIME, A, B.
        let row = Row::parse("1 2 3", 3, 1).unwrap();
        let line = formatter.data_line(&row);
        assert_eq!(&line[0..1], "1");
        assert_eq!(line.find('2'), Some(20));
        assert_eq!(line.find('3'), Some(39));
    }

    #[test]
    fn data_line_first_column_unpadded() {
        let (_, formatter) = setup("%% (1) TIME\n\necho\n", &["TIME"]);
        let row = Row::parse("12.5", 1, 1).unwrap();
        assert_eq!(formatter.data_line(&row), "12.5");
    }

    #[test]
    fn long_values_collide_silently() {
        let (_, formatter) = setup("%% (1) TIME\n%% (2) A\n\necho\n", &["TIME", "A"]);
        let long = "x".repeat(30);
        let row = Row::parse(&format!("{} 7", long), 2, 1).unwrap();
        let line = formatter.data_line(&row);
        // No truncation, no padding when the offset is already passed.
        assert_eq!(line, format!("{}7", long));
    }

    #[test]
    fn name_line_has_marker_prefix_and_pitch() {
        let (_, formatter) = setup("%% (1) TIME\n%% (2) A\n\necho\n", &["TIME", "A"]);
        let line = formatter.name_line();
        assert!(line.starts_with("%% TIME"));
        assert_eq!(line.find('A'), Some(20));
    }

    #[test]
    fn name_line_shows_raw_names_for_duplicates() {
        let (_, formatter) = setup(
            "%% (1) TIME\n%% (2) FOO\n%% (3) FOO\n\necho\n",
            &["FOO__2"],
        );
        let line = formatter.name_line();
        assert!(line.contains("FOO"));
        assert!(!line.contains("FOO__2"));
    }

    #[test]
    fn header_block_renumbers_from_one() {
        let (_, formatter) = setup(
            "%% (1) TIME\n%% (2) A\n%% (3) B\n\necho\n",
            &["B", "A"],
        );
        assert_eq!(
            formatter.header_block(),
            vec!["%%   (1) TIME", "%%   (2) B", "%%   (3) A"]
        );
    }

    #[test]
    fn header_block_uses_raw_names() {
        let (_, formatter) = setup(
            "%% (1) TIME\n%% (2) FOO\n%% (3) FOO\n\necho\n",
            &["FOO__1"],
        );
        assert_eq!(
            formatter.header_block(),
            vec!["%%   (1) TIME", "%%   (2) FOO"]
        );
    }

    #[test]
    fn delimiter_line_is_fixed_width() {
        let (_, formatter) = setup("%% (1) TIME\n\necho\n", &["TIME"]);
        let line = formatter.delimiter_line();
        assert_eq!(line.len(), 56);
        assert!(line.chars().all(|c| c == '%'));
    }
}
