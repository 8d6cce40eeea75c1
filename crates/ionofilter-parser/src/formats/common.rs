use crate::errors::{ParserError, TimestampField};
use crate::timestamp::TimestampFormat;

use super::schema::channel_column;

/// Whitespace-separated tokens of one line, counted before any field is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }
}

pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        tokens: line.split_whitespace().collect(),
    }
}

pub(crate) fn parse_required_i64(
    parser: &'static str,
    value: &str,
    line_number: usize,
    column: &str,
) -> Result<i64, ParserError> {
    value
        .parse::<i64>()
        .map_err(|err| ParserError::SchemaViolation {
            parser,
            line_number,
            message: format!("failed to parse column '{column}' value '{value}' as integer: {err}"),
        })
}

pub(crate) fn parse_channel_value(
    parser: &'static str,
    value: &str,
    line_number: usize,
    index: usize,
) -> Result<f64, ParserError> {
    let parsed = value
        .parse::<f64>()
        .map_err(|err| ParserError::SchemaViolation {
            parser,
            line_number,
            message: format!(
                "failed to parse column '{}' value '{value}' as float: {err}",
                channel_column(index)
            ),
        })?;

    // Medians are only defined over finite samples.
    if !parsed.is_finite() {
        return Err(ParserError::SchemaViolation {
            parser,
            line_number,
            message: format!(
                "column '{}' value '{value}' is not a finite number",
                channel_column(index)
            ),
        });
    }

    Ok(parsed)
}

pub(crate) fn validate_timestamp(
    parser: &'static str,
    format: &TimestampFormat,
    field: TimestampField,
    value: &str,
    line_number: usize,
) -> Result<(), ParserError> {
    let outcome = match field {
        TimestampField::Date => format.validate_date(value).map(|_| ()),
        TimestampField::Time => format.validate_time(value).map(|_| ()),
    };
    outcome.map_err(|_| ParserError::InvalidTimestamp {
        parser,
        line_number,
        field,
        value: value.to_string(),
        format: format.pattern(field).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_counts_runs_of_whitespace_once() {
        let tokens = tokenize("  2019.01.01 \t(001)   00:00:00 ");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.get(1), Some("(001)"));
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn tokenize_blank_line_is_empty() {
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn channel_value_rejects_non_finite() {
        let err = parse_channel_value("TEST", "nan", 7, 2).expect_err("nan accepted");
        assert_eq!(err.line_number(), Some(7));
        assert!(err.to_string().contains("channel_2"));
    }
}
