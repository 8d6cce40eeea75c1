//! Consumers of raw/filtered channel pairs.
//!
//! The pipeline only hands data over; where it ends up (a terminal table, a
//! CSV or Parquet stream, a gnuplot window, memory) is decided by whichever
//! [`PlotSink`] the caller passes in. Sinks that write files take an open
//! writer so naming and placement stay with the caller.

mod delimited;
mod gnuplot;
mod parquet;
mod recording;
mod table;

use std::io;

use polars::prelude::PolarsError;
use serde::Serialize;
use thiserror::Error;

pub use delimited::CsvSink;
pub use gnuplot::{gnuplot_script, GnuplotSink};
pub use parquet::{ParquetSink, PARQUET_COLUMNS};
pub use recording::RecordingSink;
pub use table::TableSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("renderer process failed: {0}")]
    Process(String),
}

/// One channel's chronologically ordered values before and after filtering.
/// `raw` and `filtered` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelComparison {
    pub index: usize,
    pub label: String,
    pub raw: Vec<f64>,
    pub filtered: Vec<f64>,
}

impl ChannelComparison {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// `(position, raw, filtered)` triples in chronological order.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.raw
            .iter()
            .zip(self.filtered.iter())
            .enumerate()
            .map(|(idx, (raw, filtered))| (idx, *raw, *filtered))
    }

    /// Positions where the median replaced the raw value.
    pub fn changed_points(&self) -> usize {
        self.points()
            .filter(|(_, raw, filtered)| raw != filtered)
            .count()
    }
}

pub trait PlotSink {
    fn name(&self) -> &'static str;

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError>;

    /// Called once after the last channel has been rendered.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
