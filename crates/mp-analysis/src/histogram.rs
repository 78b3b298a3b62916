//! Weighted 1-D histograms with fixed binning.
//!
//! Bin edges are fixed at creation and follow the closed-lower/open-upper
//! convention. Fills outside the range land in the underflow/overflow
//! sidebands. `sumw2` tracks the sum of squared weights per bin, so the
//! statistical uncertainty of a bin is `sqrt(sumw2)`.

use serde::{Deserialize, Serialize};

use mp_core::{Error, Result};

/// A named, fixed-binning weighted counter over one observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// Histogram name.
    pub name: String,
    /// Bin edges (length = n_bins + 1), fixed at creation.
    pub bin_edges: Vec<f64>,
    /// Sum of weights per bin.
    pub bin_content: Vec<f64>,
    /// Sum of squared weights per bin.
    pub sumw2: Vec<f64>,
    /// Total number of fill calls, including out-of-range ones.
    pub entries: u64,
    /// Sum of weights below the first edge.
    pub underflow: f64,
    /// Sum of squared weights below the first edge.
    pub underflow_sumw2: f64,
    /// Sum of weights at or above the last edge.
    pub overflow: f64,
    /// Sum of squared weights at or above the last edge.
    pub overflow_sumw2: f64,
}

impl Histogram {
    /// Create a histogram with `n_bins` uniform bins on `[lo, hi)`.
    pub fn with_uniform_bins(name: impl Into<String>, n_bins: usize, lo: f64, hi: f64) -> Self {
        let width = (hi - lo) / n_bins as f64;
        let bin_edges = (0..=n_bins).map(|i| lo + width * i as f64).collect();
        Self {
            name: name.into(),
            bin_edges,
            bin_content: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            entries: 0,
            underflow: 0.0,
            underflow_sumw2: 0.0,
            overflow: 0.0,
            overflow_sumw2: 0.0,
        }
    }

    /// Number of bins (excluding under/overflow).
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Accumulate one value with the given weight.
    pub fn fill(&mut self, value: f64, weight: f64) {
        self.entries += 1;
        let w2 = weight * weight;
        if value < self.bin_edges[0] {
            self.underflow += weight;
            self.underflow_sumw2 += w2;
            return;
        }
        if value >= self.bin_edges[self.bin_edges.len() - 1] {
            self.overflow += weight;
            self.overflow_sumw2 += w2;
            return;
        }
        if let Some(bin) = find_bin(&self.bin_edges, value) {
            self.bin_content[bin] += weight;
            self.sumw2[bin] += w2;
        }
    }

    /// Accumulate one value with unit weight.
    pub fn fill_unweighted(&mut self, value: f64) {
        self.fill(value, 1.0);
    }

    /// Multiply all contents by `factor` (sumw2 scales by `factor`²).
    /// Entry counts are unaffected.
    pub fn scale(&mut self, factor: f64) {
        let f2 = factor * factor;
        for c in &mut self.bin_content {
            *c *= factor;
        }
        for s in &mut self.sumw2 {
            *s *= f2;
        }
        self.underflow *= factor;
        self.underflow_sumw2 *= f2;
        self.overflow *= factor;
        self.overflow_sumw2 *= f2;
    }

    /// Add another histogram bin-by-bin. Binning must match exactly;
    /// addition is commutative and associative up to floating-point
    /// summation order.
    pub fn add(&mut self, other: &Histogram) -> Result<()> {
        if self.bin_edges != other.bin_edges {
            return Err(Error::Validation(format!(
                "cannot add histogram '{}': binning differs",
                other.name
            )));
        }
        for (c, o) in self.bin_content.iter_mut().zip(&other.bin_content) {
            *c += o;
        }
        for (s, o) in self.sumw2.iter_mut().zip(&other.sumw2) {
            *s += o;
        }
        self.entries += other.entries;
        self.underflow += other.underflow;
        self.underflow_sumw2 += other.underflow_sumw2;
        self.overflow += other.overflow;
        self.overflow_sumw2 += other.overflow_sumw2;
        Ok(())
    }

    /// Per-bin statistical uncertainties, `sqrt(sumw2)`.
    pub fn bin_errors(&self) -> Vec<f64> {
        self.sumw2.iter().map(|&s| s.sqrt()).collect()
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }
}

/// Find the bin index for a value given sorted bin edges.
///
/// Returns `None` for underflow/overflow.
fn find_bin(edges: &[f64], val: f64) -> Option<usize> {
    if val < edges[0] || val >= edges[edges.len() - 1] {
        return None;
    }
    match edges.binary_search_by(|e| e.partial_cmp(&val).unwrap()) {
        Ok(i) => {
            if i >= edges.len() - 1 {
                None
            } else {
                Some(i)
            }
        }
        Err(i) => {
            if i == 0 || i >= edges.len() {
                None
            } else {
                Some(i - 1)
            }
        }
    }
}
