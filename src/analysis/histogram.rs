use serde::Serialize;

use crate::core::constants::charts;

/// Fixed-width frequency histogram.
///
/// `edges` has one more element than `counts`. Every bin is half-open
/// `[lo, hi)` except the last, which also holds the upper edge so the
/// observed maximum always lands in the highest bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins over their observed range.
    ///
    /// A zero bin count is treated as one bin. When every value is equal
    /// the range is widened by 0.5 on each side; an empty input bins over
    /// `[0, 1]` with all counts zero.
    pub fn build(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = match observed_range(values) {
            Some((min, max)) if min == max => (min - 0.5, max + 0.5),
            Some(range) => range,
            None => (0.0, 1.0),
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &value in values {
            if let Some(index) = bin_index(value, lo, width, bins) {
                counts[index] += 1;
            }
        }

        Self { edges, counts }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lo, hi, count)` for every bin in ascending order.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin count for the track position histogram: one bin per position up
/// to the maximum, capped at [`charts::MAX_TRACK_POS_BINS`], or a single
/// bin when no position is positive.
pub fn track_pos_bin_count(max_track_pos: Option<i64>) -> usize {
    match max_track_pos {
        Some(max) if max >= 1 => usize::try_from(max)
            .map_or(charts::MAX_TRACK_POS_BINS, |bins| {
                bins.min(charts::MAX_TRACK_POS_BINS)
            }),
        _ => charts::FALLBACK_BIN_COUNT,
    }
}

fn observed_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

fn bin_index(value: f64, lo: f64, width: f64, bins: usize) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let offset = ((value - lo) / width).floor();
    if offset < 0.0 {
        return None;
    }
    Some((offset as usize).min(bins - 1))
}
