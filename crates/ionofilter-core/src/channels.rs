use std::fmt;
use std::str::FromStr;

use ionofilter_parser::{Record, CHANNEL_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Positions of the two series station tables are usually filtered for.
pub const FOF2_CHANNEL: usize = 0;
pub const HMF2_CHANNEL: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("channel index {index} is out of range (records carry {channel_count} channels)")]
    IndexOutOfRange { index: usize, channel_count: usize },

    #[error("invalid channel selector '{0}', expected INDEX or INDEX:LABEL")]
    InvalidSelector(String),
}

/// A channel to filter, by position within [`Record::channels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChannelSpec {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: Some(label.into()),
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self { index, label: None }
    }

    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => default_label(self.index),
        }
    }
}

impl fmt::Display for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (channel {})", self.label(), self.index)
    }
}

impl FromStr for ChannelSpec {
    type Err = ChannelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (index, label) = match value.split_once(':') {
            Some((index, label)) => (index, Some(label.trim())),
            None => (value, None),
        };
        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| ChannelError::InvalidSelector(value.to_string()))?;

        match label {
            Some("") => Err(ChannelError::InvalidSelector(value.to_string())),
            Some(label) => Ok(Self::new(index, label)),
            None => Ok(Self::from_index(index)),
        }
    }
}

pub fn default_label(index: usize) -> String {
    match index {
        FOF2_CHANNEL => "foF2".to_string(),
        HMF2_CHANNEL => "hmF2".to_string(),
        other => format!("channel_{other}"),
    }
}

pub fn default_channels() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec::from_index(FOF2_CHANNEL),
        ChannelSpec::from_index(HMF2_CHANNEL),
    ]
}

/// Projects one channel out of `records`, keeping record order.
pub fn extract_channel(records: &[Record], index: usize) -> Result<Vec<f64>, ChannelError> {
    if index >= CHANNEL_COUNT {
        return Err(ChannelError::IndexOutOfRange {
            index,
            channel_count: CHANNEL_COUNT,
        });
    }
    Ok(records.iter().map(|record| record.channels[index]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parses_index_and_label() {
        let spec: ChannelSpec = "5:hmF2".parse().expect("selector");
        assert_eq!(spec, ChannelSpec::new(5, "hmF2"));

        let spec: ChannelSpec = "3".parse().expect("bare index");
        assert_eq!(spec.label(), "channel_3");
    }

    #[test]
    fn selector_rejects_garbage() {
        assert!("x:foF2".parse::<ChannelSpec>().is_err());
        assert!("2:".parse::<ChannelSpec>().is_err());
    }

    #[test]
    fn default_labels_name_reference_channels() {
        assert_eq!(default_label(0), "foF2");
        assert_eq!(default_label(5), "hmF2");
        assert_eq!(default_label(10), "channel_10");
    }
}
