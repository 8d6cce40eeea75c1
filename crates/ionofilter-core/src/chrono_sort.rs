use ionofilter_parser::Record;
use thiserror::Error;

/// Adjacent pair found out of order by [`verify_chronological`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index} ({current}) sorts before its predecessor ({previous})")]
pub struct OrderViolation {
    pub index: usize,
    pub previous: String,
    pub current: String,
}

/// Sorts records ascending by `(date, time)` compared as raw text.
///
/// The sort is unstable: records that share a key may come out in any
/// relative order.
pub fn sort_chronologically(records: &mut [Record]) {
    records.sort_unstable_by(|a, b| a.chrono_key().cmp(&b.chrono_key()));
}

pub fn verify_chronological(records: &[Record]) -> Result<(), OrderViolation> {
    for (offset, pair) in records.windows(2).enumerate() {
        let (previous, current) = (pair[0].chrono_key(), pair[1].chrono_key());
        if previous > current {
            return Err(OrderViolation {
                index: offset + 1,
                previous: previous.to_string(),
                current: current.to_string(),
            });
        }
    }
    Ok(())
}

/// Number of adjacent records sharing a key. Only meaningful on sorted input.
pub fn count_duplicate_keys(records: &[Record]) -> usize {
    records
        .windows(2)
        .filter(|pair| pair[0].chrono_key() == pair[1].chrono_key())
        .count()
}

/// Keys of the first and last record, rendered as `date time`.
pub fn key_span(records: &[Record]) -> Option<(String, String)> {
    let first = records.first()?;
    let last = records.last()?;
    Some((first.chrono_key().to_string(), last.chrono_key().to_string()))
}
