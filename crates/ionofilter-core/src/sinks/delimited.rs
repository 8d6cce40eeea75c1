use std::io::Write;

use serde::Serialize;

use super::{ChannelComparison, PlotSink, SinkError};

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    channel: &'a str,
    index: usize,
    raw: f64,
    filtered: f64,
}

/// Long-format CSV: one `channel,index,raw,filtered` row per sample.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|err| SinkError::Io(err.into_error()))
    }
}

impl<W: Write> PlotSink for CsvSink<W> {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError> {
        for (index, raw, filtered) in comparison.points() {
            self.writer.serialize(CsvRow {
                channel: &comparison.label,
                index,
                raw,
                filtered,
            })?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
