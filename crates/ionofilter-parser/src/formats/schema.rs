use crate::model::CHANNEL_COUNT;

pub const LEADING_FIELDS: [&str; 4] = ["date", "symbol", "time", "sequence"];

/// Lines ahead of the first data row: a header and a blank separator.
pub const DEFAULT_PREAMBLE_LINES: usize = 2;

pub fn channel_column(index: usize) -> String {
    debug_assert!(index < CHANNEL_COUNT);
    format!("channel_{index}")
}
