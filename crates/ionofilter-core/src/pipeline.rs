use std::fs;
use std::path::Path;

use ionofilter_parser::{Record, SkippedLine, StationParser};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::channels::{extract_channel, ChannelError, ChannelSpec};
use crate::chrono_sort::{
    count_duplicate_keys, key_span, sort_chronologically, verify_chronological,
};
use crate::config::FilterConfig;
use crate::error::{PipelineError, Result};
use crate::median::{median_filter, WindowWidth};
use crate::sinks::{ChannelComparison, PlotSink, SinkError};

/// Failure confined to a single channel. Other channels still run.
#[derive(Debug, Error)]
pub enum ChannelFailure {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("{sink} sink failed: {source}")]
    Sink {
        sink: &'static str,
        #[source]
        source: SinkError,
    },
}

/// Records parsed, sorted and verified, ready for per-channel filtering.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedLine>,
    pub duplicate_keys: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelOutcome {
    Rendered {
        points: usize,
        changed_points: usize,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub index: usize,
    pub label: String,
    #[serde(flatten)]
    pub outcome: ChannelOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    /// blake3 hex digest of the input text.
    pub input_hash: String,
    pub record_count: usize,
    pub skipped_lines: Vec<SkippedLine>,
    pub duplicate_keys: usize,
    pub first_key: Option<String>,
    pub last_key: Option<String>,
    pub window_width: usize,
    pub channels: Vec<ChannelSummary>,
}

impl PipelineSummary {
    pub fn failed_channels(&self) -> usize {
        self.channels
            .iter()
            .filter(|channel| matches!(channel.outcome, ChannelOutcome::Failed { .. }))
            .count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses `content`, then sorts and verifies the records. Any malformed line
/// (under the abort policy) or ordering fault fails the whole batch.
pub fn prepare_batch(content: &str, config: &FilterConfig) -> Result<PreparedBatch> {
    let parser = config.parser()?;
    let batch = parser.parse(content)?;

    for line in &batch.skipped {
        warn!(
            line = line.line_number,
            reason = %line.reason,
            "Skipped malformed line"
        );
    }

    let mut records = batch.records;
    sort_chronologically(&mut records);
    verify_chronological(&records)?;

    let duplicate_keys = count_duplicate_keys(&records);
    if duplicate_keys > 0 {
        warn!(
            duplicate_keys,
            "Records share a date/time key; their relative order is unspecified"
        );
    }

    info!(
        parser = parser.name(),
        records = records.len(),
        skipped = batch.skipped.len(),
        "Prepared station batch"
    );

    Ok(PreparedBatch {
        records,
        skipped: batch.skipped,
        duplicate_keys,
    })
}

/// Extracts one channel from sorted records and median-filters it.
pub fn filter_channel(
    records: &[Record],
    spec: &ChannelSpec,
    width: WindowWidth,
) -> std::result::Result<ChannelComparison, ChannelError> {
    let raw = extract_channel(records, spec.index)?;
    let filtered = median_filter(&raw, width);
    Ok(ChannelComparison {
        index: spec.index,
        label: spec.label(),
        raw,
        filtered,
    })
}

fn render_channel(
    records: &[Record],
    spec: &ChannelSpec,
    width: WindowWidth,
    sink: &mut dyn PlotSink,
) -> std::result::Result<ChannelComparison, ChannelFailure> {
    let comparison = filter_channel(records, spec, width)?;
    sink.render(&comparison)
        .map_err(|source| ChannelFailure::Sink {
            sink: sink.name(),
            source,
        })?;
    Ok(comparison)
}

/// Runs the whole batch over `content` and hands every requested channel to
/// `sink`.
pub fn run(
    content: &str,
    config: &FilterConfig,
    sink: &mut dyn PlotSink,
) -> Result<PipelineSummary> {
    config.validate()?;
    let input_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let prepared = prepare_batch(content, config)?;
    let width = config.window_width;

    if width.get() > prepared.records.len() {
        info!(
            window_width = width.get(),
            records = prepared.records.len(),
            "Window wider than batch; samples pass through unfiltered"
        );
    }

    let mut channels = Vec::with_capacity(config.channels.len());
    for spec in &config.channels {
        let label = spec.label();
        let outcome = match render_channel(&prepared.records, spec, width, sink) {
            Ok(comparison) => {
                let changed_points = comparison.changed_points();
                debug!(
                    channel = spec.index,
                    label = %label,
                    points = comparison.len(),
                    changed_points,
                    "Rendered channel"
                );
                ChannelOutcome::Rendered {
                    points: comparison.len(),
                    changed_points,
                }
            }
            Err(err) => {
                warn!(
                    channel = spec.index,
                    label = %label,
                    error = %err,
                    "Channel failed; continuing with remaining channels"
                );
                ChannelOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        channels.push(ChannelSummary {
            index: spec.index,
            label,
            outcome,
        });
    }

    sink.finish().map_err(|source| PipelineError::Sink {
        sink: sink.name(),
        source,
    })?;

    let (first_key, last_key) = match key_span(&prepared.records) {
        Some((first, last)) => (Some(first), Some(last)),
        None => (None, None),
    };

    let summary = PipelineSummary {
        input_hash,
        record_count: prepared.records.len(),
        skipped_lines: prepared.skipped,
        duplicate_keys: prepared.duplicate_keys,
        first_key,
        last_key,
        window_width: width.get(),
        channels,
    };

    info!(
        records = summary.record_count,
        channels = summary.channels.len(),
        failed = summary.failed_channels(),
        "Pipeline finished"
    );

    Ok(summary)
}

/// Reads `path` and runs the batch over its contents.
pub fn run_file(
    path: &Path,
    config: &FilterConfig,
    sink: &mut dyn PlotSink,
) -> Result<PipelineSummary> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "Loaded station file");
    run(&content, config, sink)
}
