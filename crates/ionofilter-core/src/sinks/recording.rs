use super::{ChannelComparison, PlotSink, SinkError};

/// Keeps every rendered comparison in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub comparisons: Vec<ChannelComparison>,
    pub finished: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&ChannelComparison> {
        self.comparisons
            .iter()
            .find(|comparison| comparison.label == label)
    }
}

impl PlotSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError> {
        self.comparisons.push(comparison.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
