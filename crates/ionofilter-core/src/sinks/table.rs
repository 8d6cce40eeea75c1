use std::io::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use super::{ChannelComparison, PlotSink, SinkError};

/// Renders each comparison as a terminal table. Rows where the median
/// replaced the raw value are marked with `*`.
pub struct TableSink<W: Write> {
    out: W,
    precision: usize,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, precision: 3 }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn build_table(&self, comparison: &ChannelComparison) -> Table {
        let precision = self.precision;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["index", "raw", "filtered", ""]);

        for (index, raw, filtered) in comparison.points() {
            let marker = if raw != filtered { "*" } else { "" };
            table.add_row(vec![
                Cell::new(index),
                Cell::new(format!("{raw:.precision$}")),
                Cell::new(format!("{filtered:.precision$}")),
                Cell::new(marker),
            ]);
        }
        table
    }
}

impl<W: Write> PlotSink for TableSink<W> {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError> {
        let table = self.build_table(comparison);
        writeln!(
            self.out,
            "{} (channel {}): {} samples, {} replaced",
            comparison.label,
            comparison.index,
            comparison.len(),
            comparison.changed_points()
        )?;
        writeln!(self.out, "{table}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
