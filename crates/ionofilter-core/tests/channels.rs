use ionofilter_core::channels::{
    default_channels, extract_channel, ChannelError, ChannelSpec, FOF2_CHANNEL, HMF2_CHANNEL,
};
use ionofilter_parser::{Record, CHANNEL_COUNT};

fn record(time: &str, base: f64) -> Record {
    let mut channels = [0.0; CHANNEL_COUNT];
    for (offset, slot) in channels.iter_mut().enumerate() {
        *slot = base * 100.0 + offset as f64;
    }
    Record {
        date: "2019.01.01".to_string(),
        symbol: "(001)".to_string(),
        time: time.to_string(),
        sequence: base as i64,
        channels,
    }
}

#[test]
fn extracts_values_in_record_order() {
    let records = vec![
        record("00:00:00", 1.0),
        record("00:15:00", 2.0),
        record("00:30:00", 3.0),
    ];

    assert_eq!(
        extract_channel(&records, FOF2_CHANNEL),
        Ok(vec![100.0, 200.0, 300.0])
    );
    assert_eq!(
        extract_channel(&records, HMF2_CHANNEL),
        Ok(vec![105.0, 205.0, 305.0])
    );
    assert_eq!(
        extract_channel(&records, CHANNEL_COUNT - 1),
        Ok(vec![110.0, 210.0, 310.0])
    );
}

#[test]
fn out_of_range_index_is_rejected() {
    let records = vec![record("00:00:00", 1.0)];
    assert_eq!(
        extract_channel(&records, CHANNEL_COUNT),
        Err(ChannelError::IndexOutOfRange {
            index: CHANNEL_COUNT,
            channel_count: CHANNEL_COUNT,
        })
    );
}

#[test]
fn empty_batch_yields_empty_series() {
    assert_eq!(extract_channel(&[], FOF2_CHANNEL), Ok(Vec::new()));
}

#[test]
fn default_selection_is_fof2_then_hmf2() {
    let labels: Vec<String> = default_channels().iter().map(ChannelSpec::label).collect();
    assert_eq!(labels, vec!["foF2", "hmF2"]);
}

#[test]
fn explicit_label_overrides_default() {
    let spec: ChannelSpec = "0:critical frequency".parse().expect("selector");
    assert_eq!(spec.index, 0);
    assert_eq!(spec.label(), "critical frequency");
    assert_eq!(spec.to_string(), "critical frequency (channel 0)");
}
