//! Row-filter query templates.
//!
//! A query template mixes literal expression text with column references
//! delimited by `@`, e.g. `@NAV_X@ > 10 and @NAV_SPEED@ <= 2`. The template
//! is split and validated once, before any row is read; per row, column
//! values are substituted as bare tokens and the resulting expression is
//! evaluated with `slogfilt-expr`.

use crate::error::{Result, SlogError};
use crate::header::HeaderModel;
use crate::matcher::match_name;
use crate::row::Row;

/// The column-reference delimiter.
pub const SEPARATOR: char = '@';

/// The row token meaning "missing value".
pub const NAN_TOKEN: &str = "NaN";

/// The expression literal substituted for a missing value.
pub const MISSING_LITERAL: &str = "None";

/// One segment of a split template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal expression text, copied through as-is.
    Literal(String),
    /// A validated column reference: canonical name and 1-based position.
    Column { name: String, position: usize },
}

/// A validated query template, ready for per-row evaluation.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    segments: Vec<Segment>,
}

impl QueryTemplate {
    /// Splits and validates a template against the header.
    ///
    /// Fails on an odd separator count, and aggregates every reference that
    /// resolves to no column (case-insensitively) into one error.
    pub fn parse(template: &str, model: &HeaderModel) -> Result<QueryTemplate> {
        if template.matches(SEPARATOR).count() % 2 == 1 {
            return Err(SlogError::UnbalancedQuerySeparators);
        }

        let pieces = split_template(template);

        // With a leading separator the first retained piece is a reference;
        // otherwise references sit at the odd indices.
        let reference_parity = if template.starts_with(SEPARATOR) { 0 } else { 1 };

        let mut segments = Vec::with_capacity(pieces.len());
        let mut unmatched = Vec::new();

        for (i, piece) in pieces.into_iter().enumerate() {
            if i % 2 == reference_parity {
                match match_name(&piece, model.names()) {
                    Some(canonical) => {
                        let position = model
                            .position_of(canonical)
                            .expect("matched name must be in the header");
                        segments.push(Segment::Column {
                            name: canonical.to_string(),
                            position,
                        });
                    }
                    None => unmatched.push(piece),
                }
            } else {
                segments.push(Segment::Literal(piece));
            }
        }

        if !unmatched.is_empty() {
            return Err(SlogError::UnknownQueryColumns(unmatched));
        }

        Ok(QueryTemplate { segments })
    }

    /// The canonical names of the referenced columns, in template order.
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|seg| match seg {
            Segment::Column { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Builds the substituted expression for one row.
    ///
    /// Column values are inserted as raw tokens so numeric comparisons work
    /// without a type system; the `NaN` sentinel becomes the missing-value
    /// literal instead, which would otherwise read as a bare name. Segments
    /// are joined with single spaces.
    pub fn bind(&self, row: &Row) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|seg| match seg {
                Segment::Literal(text) => text.as_str(),
                Segment::Column { position, .. } => {
                    let value = row.value_at(*position);
                    if value == NAN_TOKEN {
                        MISSING_LITERAL
                    } else {
                        value
                    }
                }
            })
            .collect();
        parts.join(" ")
    }

    /// Evaluates the query for one row.
    ///
    /// Any evaluation failure is fatal and carries the fully substituted
    /// expression for diagnosis.
    pub fn matches_row(&self, row: &Row) -> Result<bool> {
        let expression = self.bind(row);
        slogfilt_expr::eval_truthy(&expression).map_err(|source| {
            SlogError::QueryEvaluationFailure { expression, source }
        })
    }
}

/// Splits a template on the separator, dropping the empty piece produced by
/// a separator at the very start or end of the string.
fn split_template(template: &str) -> Vec<String> {
    let mut pieces: Vec<String> = template.split(SEPARATOR).map(str::to_string).collect();

    if template.starts_with(SEPARATOR) {
        pieces.remove(0);
    }
    if template.len() > 1 && template.ends_with(SEPARATOR) {
        pieces.pop();
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn model() -> HeaderModel {
        HeaderModel::from_reader(&mut Cursor::new(
            "%% (1) TIME\n%% (2) X\n%% (3) Y\n\necho\n",
        ))
        .unwrap()
    }

    fn row(line: &str) -> Row {
        Row::parse(line, 3, 1).unwrap()
    }

    #[test]
    fn split_drops_leading_and_trailing_empties() {
        assert_eq!(split_template("@X@ > 3"), vec!["X", " > 3"]);
        assert_eq!(split_template("3 < @X@"), vec!["3 < ", "X"]);
        assert_eq!(split_template("@X@ > @Y@"), vec!["X", " > ", "Y"]);
    }

    #[test]
    fn odd_separator_count_rejected() {
        let err = QueryTemplate::parse("@X > 3", &model()).unwrap_err();
        assert!(matches!(err, SlogError::UnbalancedQuerySeparators));
        let err = QueryTemplate::parse("@X@ > @3", &model()).unwrap_err();
        assert!(matches!(err, SlogError::UnbalancedQuerySeparators));
    }

    #[test]
    fn references_resolve_case_insensitively() {
        let query = QueryTemplate::parse("@x@ > 3", &model()).unwrap();
        assert_eq!(query.referenced_columns().collect::<Vec<_>>(), vec!["X"]);
    }

    #[test]
    fn unknown_references_aggregated() {
        let err = QueryTemplate::parse("@BAD@ > 3 and @WORSE@ < 1", &model()).unwrap_err();
        match err {
            SlogError::UnknownQueryColumns(names) => {
                assert_eq!(names, vec!["BAD".to_string(), "WORSE".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn bind_substitutes_values_as_bare_tokens() {
        let query = QueryTemplate::parse("@X@ > 3", &model()).unwrap();
        assert_eq!(query.bind(&row("1.0 5 NaN")), "5  > 3");
    }

    #[test]
    fn bind_replaces_nan_with_missing_literal() {
        let query = QueryTemplate::parse("@Y@ != None", &model()).unwrap();
        assert_eq!(query.bind(&row("1.0 5 NaN")), "None  != None");
    }

    #[test]
    fn numeric_comparison_matches() {
        let query = QueryTemplate::parse("@X@ > 3", &model()).unwrap();
        assert!(query.matches_row(&row("1.0 5 NaN")).unwrap());
        assert!(!query.matches_row(&row("1.0 2 NaN")).unwrap());
    }

    #[test]
    fn nan_value_compares_as_missing() {
        let query = QueryTemplate::parse("@Y@ != None", &model()).unwrap();
        assert!(!query.matches_row(&row("1.0 5 NaN")).unwrap());
        assert!(query.matches_row(&row("1.0 5 7.5")).unwrap());
    }

    #[test]
    fn boolean_connectives_over_two_columns() {
        let query = QueryTemplate::parse("@X@ > 3 and @Y@ < 10", &model()).unwrap();
        assert!(query.matches_row(&row("0 5 7")).unwrap());
        assert!(!query.matches_row(&row("0 5 12")).unwrap());
    }

    #[test]
    fn reference_at_both_ends() {
        let query = QueryTemplate::parse("@X@ == @Y@", &model()).unwrap();
        assert!(query.matches_row(&row("0 4 4")).unwrap());
        assert!(!query.matches_row(&row("0 4 5")).unwrap());
    }

    #[test]
    fn evaluation_failure_is_fatal_and_echoes_expression() {
        // A non-numeric value substitutes as a bare name and cannot evaluate.
        let query = QueryTemplate::parse("@X@ > 3", &model()).unwrap();
        let err = query.matches_row(&row("1.0 bogus NaN")).unwrap_err();
        match err {
            SlogError::QueryEvaluationFailure { expression, .. } => {
                assert_eq!(expression, "bogus  > 3");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
