//! Per-line row values.

use crate::error::{Result, SlogError};

/// One data line's values, indexed by 1-based column position.
///
/// Rows are ephemeral: parsed, filtered, formatted, and dropped. No state
/// survives from one row to the next.
#[derive(Debug, Clone)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Splits a data line into fields, enforcing the declared column count.
    pub fn parse(line: &str, expected_columns: usize, line_number: usize) -> Result<Row> {
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.len() != expected_columns {
            return Err(SlogError::RowShapeMismatch {
                line_number,
                expected: expected_columns,
                found: fields.len(),
            });
        }
        Ok(Row { fields })
    }

    /// The value at a 1-based column position.
    ///
    /// Positions come from the header model, which was validated against the
    /// same column count this row was parsed with.
    pub fn value_at(&self, position: usize) -> &str {
        &self.fields[position - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let row = Row::parse("1.0   5  NaN", 3, 10).unwrap();
        assert_eq!(row.value_at(1), "1.0");
        assert_eq!(row.value_at(2), "5");
        assert_eq!(row.value_at(3), "NaN");
    }

    #[test]
    fn too_few_fields_is_shape_mismatch() {
        let err = Row::parse("1.0 5", 3, 42).unwrap_err();
        match err {
            SlogError::RowShapeMismatch {
                line_number,
                expected,
                found,
            } => {
                assert_eq!(line_number, 42);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn too_many_fields_is_shape_mismatch() {
        let err = Row::parse("1 2 3 4", 3, 1).unwrap_err();
        assert!(matches!(err, SlogError::RowShapeMismatch { found: 4, .. }));
    }
}
