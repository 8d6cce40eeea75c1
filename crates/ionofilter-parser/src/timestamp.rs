use std::fmt::{Display, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{ParserError, TimestampField};

pub const DEFAULT_DATE_FORMAT: &str = "%Y.%m.%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Ascending instants used to check that a format pair keeps text order and
/// time order in agreement. Each step crosses a digit-count boundary so that
/// unpadded fields (`9` vs `10`) are caught. The leading pairs straddle the
/// 1969/1970 pivot and the 1999/2000 rollover of two-digit years.
const ORDER_PROBES: &[(i32, u32, u32, u32, u32, u32)] = &[
    (1969, 12, 31, 23, 59, 59),
    (1970, 1, 1, 0, 0, 0),
    (1999, 12, 31, 23, 59, 59),
    (2000, 1, 1, 0, 0, 0),
    (2001, 1, 1, 0, 0, 0),
    (2001, 1, 1, 0, 0, 9),
    (2001, 1, 1, 0, 0, 10),
    (2001, 1, 1, 0, 9, 59),
    (2001, 1, 1, 0, 10, 0),
    (2001, 1, 1, 9, 59, 59),
    (2001, 1, 1, 10, 0, 0),
    (2001, 1, 1, 23, 0, 0),
    (2001, 1, 9, 0, 0, 0),
    (2001, 1, 10, 0, 0, 0),
    (2001, 2, 1, 0, 0, 0),
    (2001, 9, 30, 0, 0, 0),
    (2001, 10, 1, 0, 0, 0),
    (2001, 12, 31, 23, 59, 59),
    (2002, 1, 1, 0, 0, 0),
    (2010, 1, 1, 0, 0, 0),
];

/// chrono format strings for the date and time tokens of a data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFormat {
    pub date: String,
    pub time: String,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl TimestampFormat {
    /// Builds a format pair, rejecting any pair whose text order could
    /// disagree with time order.
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Result<Self, ParserError> {
        let format = Self {
            date: date.into(),
            time: time.into(),
        };
        format.check_order_preserving()?;
        Ok(format)
    }

    pub fn check_order_preserving(&self) -> Result<(), ParserError> {
        check_items(TimestampField::Date, &self.date)?;
        check_items(TimestampField::Time, &self.time)?;

        let mut previous: Option<(String, String, NaiveDateTime)> = None;
        for &(year, month, day, hour, minute, second) in ORDER_PROBES {
            let Some(instant) = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, second))
            else {
                continue;
            };

            let date_text = render(instant.date().format(&self.date)).ok_or_else(|| {
                ParserError::InvalidFormat {
                    field: TimestampField::Date,
                    format: self.date.clone(),
                    reason: "cannot render a calendar date".to_string(),
                }
            })?;
            let time_text = render(instant.time().format(&self.time)).ok_or_else(|| {
                ParserError::InvalidFormat {
                    field: TimestampField::Time,
                    format: self.time.clone(),
                    reason: "cannot render a time of day".to_string(),
                }
            })?;

            if NaiveDate::parse_from_str(&date_text, &self.date).ok() != Some(instant.date()) {
                return Err(ParserError::InvalidFormat {
                    field: TimestampField::Date,
                    format: self.date.clone(),
                    reason: format!("'{date_text}' does not identify a unique calendar date"),
                });
            }
            if NaiveTime::parse_from_str(&time_text, &self.time).is_err() {
                return Err(ParserError::InvalidFormat {
                    field: TimestampField::Time,
                    format: self.time.clone(),
                    reason: format!("'{time_text}' does not parse back as a time of day"),
                });
            }

            if let Some((prev_date, prev_time, prev_instant)) = &previous {
                if (prev_date.as_str(), prev_time.as_str()) > (date_text.as_str(), time_text.as_str())
                {
                    return Err(ParserError::InvalidFormat {
                        field: TimestampField::Date,
                        format: format!("{} {}", self.date, self.time),
                        reason: format!(
                            "'{date_text} {time_text}' ({instant}) sorts before \
                             '{prev_date} {prev_time}' ({prev_instant})"
                        ),
                    });
                }
            }
            previous = Some((date_text, time_text, instant));
        }

        Ok(())
    }

    /// Accepts `value` only when it parses as a date and renders back to the
    /// exact same text, which rules out unpadded or reordered components.
    pub fn validate_date(&self, value: &str) -> Result<NaiveDate, String> {
        let parsed = NaiveDate::parse_from_str(value, &self.date).map_err(|err| err.to_string())?;
        round_trip(value, render(parsed.format(&self.date)))?;
        Ok(parsed)
    }

    pub fn validate_time(&self, value: &str) -> Result<NaiveTime, String> {
        let parsed = NaiveTime::parse_from_str(value, &self.time).map_err(|err| err.to_string())?;
        round_trip(value, render(parsed.format(&self.time)))?;
        Ok(parsed)
    }

    pub fn pattern(&self, field: TimestampField) -> &str {
        match field {
            TimestampField::Date => &self.date,
            TimestampField::Time => &self.time,
        }
    }
}

fn check_items(field: TimestampField, format: &str) -> Result<(), ParserError> {
    if format.trim().is_empty() {
        return Err(ParserError::InvalidFormat {
            field,
            format: format.to_string(),
            reason: "format is empty".to_string(),
        });
    }
    if format.chars().any(char::is_whitespace) {
        return Err(ParserError::InvalidFormat {
            field,
            format: format.to_string(),
            reason: "format must render a single whitespace-free token".to_string(),
        });
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ParserError::InvalidFormat {
            field,
            format: format.to_string(),
            reason: "unrecognized format specifier".to_string(),
        });
    }
    Ok(())
}

fn round_trip(value: &str, rendered: Option<String>) -> Result<(), String> {
    match rendered {
        Some(text) if text == value => Ok(()),
        Some(text) => Err(format!("expected canonical form '{text}'")),
        None => Err("value cannot be rendered with the configured format".to_string()),
    }
}

// `ToString` panics when a chrono format item cannot be rendered, so write
// through `fmt::Write` and surface the failure instead.
fn render(value: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{value}").ok()?;
    Some(out)
}
