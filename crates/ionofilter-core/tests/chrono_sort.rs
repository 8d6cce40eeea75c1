use ionofilter_core::chrono_sort::{
    count_duplicate_keys, key_span, sort_chronologically, verify_chronological, OrderViolation,
};
use ionofilter_parser::{Record, CHANNEL_COUNT};

fn record(date: &str, time: &str, fof2: f64) -> Record {
    let mut channels = [0.0; CHANNEL_COUNT];
    channels[0] = fof2;
    Record {
        date: date.to_string(),
        symbol: "(001)".to_string(),
        time: time.to_string(),
        sequence: 0,
        channels,
    }
}

fn keys(records: &[Record]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.date.clone(), r.time.clone()))
        .collect()
}

#[test]
fn sorts_by_date_then_time() {
    let mut records = vec![
        record("2019.01.02", "00:00:00", 4.0),
        record("2019.01.01", "23:45:00", 3.0),
        record("2019.01.01", "00:15:00", 2.0),
        record("2018.12.31", "23:59:59", 1.0),
    ];
    sort_chronologically(&mut records);

    assert_eq!(
        keys(&records),
        vec![
            ("2018.12.31".to_string(), "23:59:59".to_string()),
            ("2019.01.01".to_string(), "00:15:00".to_string()),
            ("2019.01.01".to_string(), "23:45:00".to_string()),
            ("2019.01.02".to_string(), "00:00:00".to_string()),
        ]
    );
    let fof2: Vec<f64> = records.iter().map(|r| r.channels[0]).collect();
    assert_eq!(fof2, vec![1.0, 2.0, 3.0, 4.0]);
    assert!(verify_chronological(&records).is_ok());
}

#[test]
fn sorted_output_is_a_permutation() {
    let mut records: Vec<Record> = (0..24)
        .rev()
        .map(|hour| record("2020.06.15", &format!("{hour:02}:00:00"), hour as f64))
        .collect();
    let mut before: Vec<f64> = records.iter().map(|r| r.channels[0]).collect();

    sort_chronologically(&mut records);
    let mut after: Vec<f64> = records.iter().map(|r| r.channels[0]).collect();

    assert!(verify_chronological(&records).is_ok());
    before.sort_by(f64::total_cmp);
    after.sort_by(f64::total_cmp);
    assert_eq!(before, after);
}

#[test]
fn records_sharing_a_key_sort_together() {
    let mut tied_a = record("2019.01.01", "00:15:00", 5.0);
    tied_a.symbol = "(A)".to_string();
    let mut tied_b = record("2019.01.01", "00:15:00", 6.0);
    tied_b.symbol = "(B)".to_string();

    let mut records = vec![
        record("2019.01.01", "00:30:00", 9.0),
        tied_a,
        record("2019.01.01", "00:00:00", 1.0),
        tied_b,
    ];
    sort_chronologically(&mut records);

    // Only key order is guaranteed; (A) and (B) may come out either way.
    let times: Vec<&str> = records.iter().map(|r| r.time.as_str()).collect();
    assert_eq!(times, vec!["00:00:00", "00:15:00", "00:15:00", "00:30:00"]);

    let mut tied_symbols = vec![records[1].symbol.as_str(), records[2].symbol.as_str()];
    tied_symbols.sort_unstable();
    assert_eq!(tied_symbols, vec!["(A)", "(B)"]);

    assert_eq!(count_duplicate_keys(&records), 1);
    assert!(verify_chronological(&records).is_ok());
}

#[test]
fn verify_reports_first_out_of_order_pair() {
    let records = vec![
        record("2019.01.01", "00:00:00", 1.0),
        record("2019.01.01", "01:00:00", 2.0),
        record("2019.01.01", "00:30:00", 3.0),
    ];

    assert_eq!(
        verify_chronological(&records),
        Err(OrderViolation {
            index: 2,
            previous: "2019.01.01 01:00:00".to_string(),
            current: "2019.01.01 00:30:00".to_string(),
        })
    );
}

#[test]
fn empty_and_single_batches_are_trivially_ordered() {
    let mut empty: Vec<Record> = Vec::new();
    sort_chronologically(&mut empty);
    assert!(verify_chronological(&empty).is_ok());
    assert_eq!(key_span(&empty), None);

    let single = vec![record("2019.01.01", "12:00:00", 1.0)];
    assert!(verify_chronological(&single).is_ok());
    assert_eq!(
        key_span(&single),
        Some((
            "2019.01.01 12:00:00".to_string(),
            "2019.01.01 12:00:00".to_string()
        ))
    );
}
