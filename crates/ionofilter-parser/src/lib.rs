pub mod errors;
pub mod formats;
pub mod model;
mod registry;
pub mod timestamp;

pub use errors::{ParserError, TimestampField};
pub use formats::{
    parse_record, tokenize, StationTableParser, Tokens, DEFAULT_PREAMBLE_LINES,
};
pub use model::{
    ChronoKey, MalformedLinePolicy, Record, SkippedLine, StationBatch, CHANNEL_COUNT, FIELD_COUNT,
};
pub use registry::{parse_station_file, StationParser};
pub use timestamp::TimestampFormat;
