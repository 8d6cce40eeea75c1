mod common;
pub(crate) mod schema;
mod station_table;

pub use common::{tokenize, Tokens};
pub use schema::DEFAULT_PREAMBLE_LINES;
pub use station_table::{parse_record, StationTableParser};

pub(crate) use common::{parse_channel_value, parse_required_i64, validate_timestamp};
