use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar channels carried by every data row.
pub const CHANNEL_COUNT: usize = 11;

/// date, symbol, time, sequence, then the channels.
pub const FIELD_COUNT: usize = 4 + CHANNEL_COUNT;

/// One parsed data row.
///
/// `date` and `time` are kept as the original text. The parser only accepts
/// them once they round-trip through the configured [`crate::TimestampFormat`],
/// so comparing them as plain strings matches comparing them as instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub symbol: String,
    pub time: String,
    pub sequence: i64,
    pub channels: [f64; CHANNEL_COUNT],
}

impl Record {
    pub fn chrono_key(&self) -> ChronoKey<'_> {
        ChronoKey {
            date: &self.date,
            time: &self.time,
        }
    }

    pub fn channel(&self, index: usize) -> Option<f64> {
        self.channels.get(index).copied()
    }
}

/// Ordering key derived from a record's date and time text.
///
/// Field order matters: the derived `Ord` compares `date` first, then `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChronoKey<'a> {
    pub date: &'a str,
    pub time: &'a str,
}

impl fmt::Display for ChronoKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// What the parser does with a data line that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop at the first malformed line and return its error.
    #[default]
    Abort,
    /// Drop the line, remember why, and keep going.
    Skip,
}

impl MalformedLinePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedLinePolicy::Abort => "abort",
            MalformedLinePolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for MalformedLinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct StationBatch {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedLine>,
}

impl StationBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
