use crate::errors::{ParserError, TimestampField};
use crate::model::{
    MalformedLinePolicy, Record, SkippedLine, StationBatch, CHANNEL_COUNT, FIELD_COUNT,
};
use crate::registry::StationParser;
use crate::timestamp::TimestampFormat;

use super::schema::{DEFAULT_PREAMBLE_LINES, LEADING_FIELDS};
use super::{parse_channel_value, parse_required_i64, tokenize, validate_timestamp};

/// Whitespace-delimited station table: a fixed preamble followed by one
/// 15-token record per line.
#[derive(Debug, Clone)]
pub struct StationTableParser {
    format: TimestampFormat,
    policy: MalformedLinePolicy,
    preamble_lines: usize,
}

impl Default for StationTableParser {
    fn default() -> Self {
        Self {
            format: TimestampFormat::default(),
            policy: MalformedLinePolicy::default(),
            preamble_lines: DEFAULT_PREAMBLE_LINES,
        }
    }
}

impl StationTableParser {
    pub const NAME: &'static str = "STATION_TABLE";

    pub fn new(format: TimestampFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Lines dropped by position before data rows begin. Their content is
    /// never inspected, so a file without a header loses its first rows.
    pub fn with_preamble_lines(mut self, preamble_lines: usize) -> Self {
        self.preamble_lines = preamble_lines;
        self
    }

    pub fn format(&self) -> &TimestampFormat {
        &self.format
    }

    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    pub fn preamble_lines(&self) -> usize {
        self.preamble_lines
    }

    pub fn parse_record(&self, line: &str, line_number: usize) -> Result<Record, ParserError> {
        parse_record_as(Self::NAME, line, line_number, &self.format)
    }
}

impl StationParser for StationTableParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<StationBatch, ParserError> {
        let mut batch = StationBatch::default();

        for (idx, line) in content.lines().enumerate().skip(self.preamble_lines) {
            let line_number = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_record(line, line_number) {
                Ok(record) => batch.records.push(record),
                Err(err) => match self.policy {
                    MalformedLinePolicy::Abort => return Err(err),
                    MalformedLinePolicy::Skip => batch.skipped.push(SkippedLine {
                        line_number,
                        reason: err.to_string(),
                    }),
                },
            }
        }

        if batch.records.is_empty() {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        Ok(batch)
    }
}

/// Parses one data line into a [`Record`]. `line_number` is only used for
/// error reporting.
pub fn parse_record(
    line: &str,
    line_number: usize,
    format: &TimestampFormat,
) -> Result<Record, ParserError> {
    parse_record_as(StationTableParser::NAME, line, line_number, format)
}

fn parse_record_as(
    parser: &'static str,
    line: &str,
    line_number: usize,
    format: &TimestampFormat,
) -> Result<Record, ParserError> {
    let tokens = tokenize(line);
    let [date, symbol, time, sequence, values @ ..] = tokens.as_slice() else {
        return Err(token_count_error(parser, line_number, tokens.len()));
    };
    if values.len() != CHANNEL_COUNT {
        return Err(token_count_error(parser, line_number, tokens.len()));
    }

    validate_timestamp(parser, format, TimestampField::Date, date, line_number)?;
    validate_timestamp(parser, format, TimestampField::Time, time, line_number)?;
    let sequence = parse_required_i64(parser, sequence, line_number, LEADING_FIELDS[3])?;

    let mut channels = [0.0_f64; CHANNEL_COUNT];
    for (index, (slot, value)) in channels.iter_mut().zip(values.iter()).enumerate() {
        *slot = parse_channel_value(parser, value, line_number, index)?;
    }

    Ok(Record {
        date: (*date).to_string(),
        symbol: (*symbol).to_string(),
        time: (*time).to_string(),
        sequence,
        channels,
    })
}

fn token_count_error(parser: &'static str, line_number: usize, found: usize) -> ParserError {
    ParserError::SchemaViolation {
        parser,
        line_number,
        message: format!("expected {FIELD_COUNT} tokens, found {found}"),
    }
}
