use crate::errors::ParserError;
use crate::formats::StationTableParser;
use crate::model::StationBatch;

pub trait StationParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<StationBatch, ParserError>;
}

/// Parses `content` with the default station table layout: two preamble
/// lines, `%Y.%m.%d` dates, `%H:%M:%S` times, aborting on the first bad row.
pub fn parse_station_file(content: &str) -> Result<StationBatch, ParserError> {
    StationTableParser::default().parse(content)
}
