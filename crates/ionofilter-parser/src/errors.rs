use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampField {
    Date,
    Time,
}

impl TimestampField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampField::Date => "date",
            TimestampField::Time => "time",
        }
    }
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{parser} line {line_number} violates the record schema: {message}")]
    SchemaViolation {
        parser: &'static str,
        line_number: usize,
        message: String,
    },

    #[error("{parser} line {line_number} has invalid {field} '{value}' (expected '{format}')")]
    InvalidTimestamp {
        parser: &'static str,
        line_number: usize,
        field: TimestampField,
        value: String,
        format: String,
    },

    #[error("{parser} file did not contain any data rows")]
    EmptyData { parser: &'static str },

    #[error("invalid {field} format '{format}': {reason}")]
    InvalidFormat {
        field: TimestampField,
        format: String,
        reason: String,
    },
}

impl ParserError {
    /// Line the error was raised on, when it belongs to a single data row.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ParserError::SchemaViolation { line_number, .. }
            | ParserError::InvalidTimestamp { line_number, .. } => Some(*line_number),
            ParserError::EmptyData { .. } | ParserError::InvalidFormat { .. } => None,
        }
    }

    pub fn is_row_error(&self) -> bool {
        self.line_number().is_some()
    }
}
