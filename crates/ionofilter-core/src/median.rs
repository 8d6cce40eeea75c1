use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("window width {width} must be odd and at least 1")]
    InvalidWindow { width: usize },
}

/// Odd, non-zero number of samples in one median window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowWidth(usize);

impl WindowWidth {
    pub const DEFAULT: WindowWidth = WindowWidth(3);

    pub fn new(width: usize) -> Result<Self, FilterError> {
        if width == 0 || width % 2 == 0 {
            return Err(FilterError::InvalidWindow { width });
        }
        Ok(Self(width))
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Positions left unfiltered at each end of a sequence.
    pub fn edge(&self) -> usize {
        self.0 / 2
    }
}

impl Default for WindowWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for WindowWidth {
    type Error = FilterError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WindowWidth> for usize {
    fn from(value: WindowWidth) -> Self {
        value.0
    }
}

impl fmt::Display for WindowWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sliding-window median over `values`.
///
/// The output has the same length as the input. The first and last
/// `width.edge()` samples are copied through unchanged; every other position
/// holds the median of the `width` samples centred on it. When the window is
/// wider than the sequence nothing is filtered and the input is returned as a
/// copy.
pub fn median_filter(values: &[f64], width: WindowWidth) -> Vec<f64> {
    let mut filtered = values.to_vec();
    let edge = width.edge();
    let mut scratch = Vec::with_capacity(width.get());

    for (offset, window) in values.windows(width.get()).enumerate() {
        scratch.clear();
        scratch.extend_from_slice(window);
        if let Some(median) = window_median(&mut scratch) {
            filtered[offset + edge] = median;
        }
    }

    filtered
}

/// Middle value of an odd-length window after sorting it in place.
/// Returns `None` for an empty window.
pub fn window_median(window: &mut [f64]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    window.sort_unstable_by(f64::total_cmp);
    Some(window[window.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_and_zero_widths() {
        assert_eq!(
            WindowWidth::new(4),
            Err(FilterError::InvalidWindow { width: 4 })
        );
        assert!(WindowWidth::new(0).is_err());
        assert_eq!(WindowWidth::new(5).map(|w| w.edge()), Ok(2));
    }

    #[test]
    fn width_one_is_identity() {
        let values = [3.0, 1.0, 2.0];
        let width = WindowWidth::new(1).expect("width 1");
        assert_eq!(median_filter(&values, width), values.to_vec());
    }

    #[test]
    fn window_median_sorts_by_value() {
        let mut window = [9.0, -1.0, 4.0];
        assert_eq!(window_median(&mut window), Some(4.0));
        assert_eq!(window_median(&mut []), None);
    }
}
