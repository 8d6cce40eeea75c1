use std::io::Write;

use polars::prelude::*;

use super::{ChannelComparison, PlotSink, SinkError};

pub const PARQUET_COLUMNS: [&str; 4] = ["channel", "index", "raw", "filtered"];

/// Collects every comparison and writes them as one long-format Parquet
/// table when the pipeline finishes.
pub struct ParquetSink<W: Write> {
    writer: W,
    channel: Vec<String>,
    index: Vec<i64>,
    raw: Vec<f64>,
    filtered: Vec<f64>,
    written: bool,
}

impl<W: Write> ParquetSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            channel: Vec::new(),
            index: Vec::new(),
            raw: Vec::new(),
            filtered: Vec::new(),
            written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn build_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let channel: Vec<&str> = self.channel.iter().map(String::as_str).collect();
        let columns: Vec<Column> = vec![
            Series::new(PARQUET_COLUMNS[0].into(), channel).into(),
            Series::new(PARQUET_COLUMNS[1].into(), self.index.clone()).into(),
            Series::new(PARQUET_COLUMNS[2].into(), self.raw.clone()).into(),
            Series::new(PARQUET_COLUMNS[3].into(), self.filtered.clone()).into(),
        ];
        DataFrame::new(columns)
    }
}

impl<W: Write> PlotSink for ParquetSink<W> {
    fn name(&self) -> &'static str {
        "parquet"
    }

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError> {
        for (index, raw, filtered) in comparison.points() {
            self.channel.push(comparison.label.clone());
            self.index.push(index as i64);
            self.raw.push(raw);
            self.filtered.push(filtered);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if self.written {
            return Ok(());
        }
        let mut df = self.build_dataframe()?;
        ParquetWriter::new(&mut self.writer).finish(&mut df)?;
        self.writer.flush()?;
        self.written = true;
        Ok(())
    }
}
