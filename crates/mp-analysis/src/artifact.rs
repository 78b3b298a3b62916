//! The histogram artifact: everything one run hands to downstream
//! consumers (statistical comparison, plotting, combination).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mp_core::{Error, Result};

use crate::histogram::Histogram;

/// Final output of one histogramming run: region key → histogram name →
/// histogram, plus run-level bookkeeping.
///
/// Bin errors are `sqrt(sumw2)` per the standard weighted-histogram
/// convention; the artifact stores `sumw2` so partial outputs can be
/// combined before errors are taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramArtifact {
    /// Subsample this artifact was produced from, if known.
    pub subsample: Option<String>,
    /// Whether the input was real data (affects combination weighting).
    pub is_data: bool,
    /// Events processed, independent of selection outcomes. The MC
    /// normalization denominator for luminosity scaling.
    pub events_processed: u64,
    /// Histograms per region.
    pub regions: BTreeMap<String, BTreeMap<String, Histogram>>,
}

impl HistogramArtifact {
    /// Serialize to pretty JSON at `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read an artifact back from JSON.
    pub fn read_json(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let artifact = serde_json::from_slice(&bytes)?;
        Ok(artifact)
    }

    /// Scale every histogram in every region by `factor`. The raw
    /// `events_processed` count is left alone; a scaled event count is
    /// not a count.
    pub fn scale(&mut self, factor: f64) {
        for hists in self.regions.values_mut() {
            for hist in hists.values_mut() {
                hist.scale(factor);
            }
        }
    }

    /// Add another artifact histogram-by-histogram. Region and histogram
    /// structure must match; processed-event counts add as raw counts.
    pub fn add(&mut self, other: &HistogramArtifact) -> Result<()> {
        for (region, hists) in &mut self.regions {
            let other_hists = other.regions.get(region).ok_or_else(|| {
                Error::Validation(format!("cannot combine: region '{region}' missing"))
            })?;
            for (name, hist) in hists.iter_mut() {
                let other_hist = other_hists.get(name).ok_or_else(|| {
                    Error::Validation(format!(
                        "cannot combine: histogram '{name}' missing in region '{region}'"
                    ))
                })?;
                hist.add(other_hist)?;
            }
        }
        self.events_processed += other.events_processed;
        Ok(())
    }
}
