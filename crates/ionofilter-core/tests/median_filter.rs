use ionofilter_core::median::{median_filter, WindowWidth};

fn width(w: usize) -> WindowWidth {
    WindowWidth::new(w).expect("odd width")
}

fn brute_force_median(slice: &[f64]) -> f64 {
    let mut sorted = slice.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
    sorted[sorted.len() / 2]
}

/// Deterministic pseudo-random values in [0, 100).
fn noisy_sequence(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % 10_000) as f64 / 100.0
        })
        .collect()
}

#[test]
fn reference_sequence_filters_to_expected_medians() {
    let raw = [7.0, 8.0, 2.0, 1.0, 3.0, 6.0, 5.0, 7.0, 4.0];
    let filtered = median_filter(&raw, width(3));
    assert_eq!(
        filtered,
        vec![7.0, 7.0, 2.0, 2.0, 3.0, 5.0, 6.0, 6.0, 4.0]
    );
}

#[test]
fn single_sample_passes_through() {
    let raw = [42.5];
    assert_eq!(median_filter(&raw, width(3)), vec![42.5]);
}

#[test]
fn empty_sequence_stays_empty() {
    assert!(median_filter(&[], width(3)).is_empty());
}

#[test]
fn window_wider_than_sequence_passes_everything_through() {
    let raw = [5.0, 1.0, 9.0, 3.0];
    assert_eq!(median_filter(&raw, width(5)), raw.to_vec());
    assert_eq!(median_filter(&raw, width(7)), raw.to_vec());
}

#[test]
fn window_equal_to_length_filters_only_the_centre() {
    let raw = [5.0, 1.0, 9.0, 3.0, 2.0];
    assert_eq!(
        median_filter(&raw, width(5)),
        vec![5.0, 1.0, 3.0, 3.0, 2.0]
    );
}

#[test]
fn output_length_matches_input() {
    for len in 0..40 {
        let raw = noisy_sequence(len, len as u64 + 1);
        for w in [1, 3, 5, 7] {
            assert_eq!(median_filter(&raw, width(w)).len(), len);
        }
    }
}

#[test]
fn interior_matches_brute_force_median() {
    for (len, w) in [(9, 3), (25, 5), (31, 7), (64, 3), (12, 11)] {
        let raw = noisy_sequence(len, 0xC0FFEE + len as u64);
        let filtered = median_filter(&raw, width(w));
        let edge = w / 2;

        for i in edge..len - edge {
            let expected = brute_force_median(&raw[i - edge..=i + edge]);
            assert_eq!(filtered[i], expected, "len {len} width {w} index {i}");
        }
        for i in (0..edge).chain(len - edge..len) {
            assert_eq!(filtered[i], raw[i], "edge {i} changed");
        }
    }
}

#[test]
fn width_three_keeps_both_ends_for_every_length() {
    for len in 1..30 {
        let raw = noisy_sequence(len, 7 * len as u64);
        let filtered = median_filter(&raw, width(3));
        assert_eq!(filtered[0], raw[0]);
        assert_eq!(filtered[len - 1], raw[len - 1]);
    }
}

#[test]
fn strictly_monotonic_ramps_are_unchanged() {
    let rising: Vec<f64> = (0..50).map(|i| i as f64 * 0.75 - 3.0).collect();
    let falling: Vec<f64> = rising.iter().rev().copied().collect();

    assert_eq!(median_filter(&rising, width(3)), rising);
    assert_eq!(median_filter(&falling, width(3)), falling);
}

#[test]
fn input_is_not_mutated() {
    let raw = vec![3.0, 9.0, 1.0, 4.0];
    let copy = raw.clone();
    let _ = median_filter(&raw, width(3));
    assert_eq!(raw, copy);
}

#[test]
fn isolated_spike_is_removed() {
    let raw = [4.0, 4.1, 4.2, 19.0, 4.3, 4.4, 4.5];
    let filtered = median_filter(&raw, width(3));
    assert_eq!(filtered[3], 4.3);
    assert_eq!(filtered[2], 4.2);
}
