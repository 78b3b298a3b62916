//! Combination of per-subsample artifacts into one sample total.
//!
//! MC subsamples are scaled to the target luminosity with
//! `lumi * sigma / events_processed` before addition; data subsamples add
//! unscaled. Histogram addition is associative and commutative (given one
//! shared binning), so the input order only affects floating-point
//! summation order.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};

use mp_analysis::HistogramArtifact;

/// Scale one artifact to the target luminosity, in place.
///
/// Data passes through untouched. MC needs a cross-section entry for its
/// subsample and a non-zero processed-event count.
pub fn luminosity_scale(
    artifact: &mut HistogramArtifact,
    cross_sections: &BTreeMap<String, f64>,
    luminosity_pb: f64,
) -> Result<()> {
    if artifact.is_data {
        return Ok(());
    }
    let name = artifact
        .subsample
        .as_deref()
        .context("MC artifact has no subsample name; cannot look up its cross section")?;
    let xs = *cross_sections
        .get(name)
        .with_context(|| format!("no cross section for subsample '{name}'"))?;
    if artifact.events_processed == 0 {
        bail!("subsample '{name}' has zero processed events");
    }
    let sf = luminosity_pb * xs / artifact.events_processed as f64;
    tracing::info!(subsample = name, lumi_sf = sf, "scaling to luminosity");
    artifact.scale(sf);
    Ok(())
}

/// Combine per-subsample artifacts into one: scale each to luminosity,
/// then add them in the order given.
pub fn combine_artifacts(
    mut artifacts: Vec<HistogramArtifact>,
    cross_sections: &BTreeMap<String, f64>,
    luminosity_pb: f64,
) -> Result<HistogramArtifact> {
    for artifact in &mut artifacts {
        luminosity_scale(artifact, cross_sections, luminosity_pb)?;
    }
    let mut iter = artifacts.into_iter();
    let mut total = match iter.next() {
        Some(first) => first,
        None => bail!("nothing to combine"),
    };
    for artifact in iter {
        total.add(&artifact).context("adding subsample artifact")?;
    }
    // the per-subsample tag no longer applies to the sum
    total.subsample = None;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_analysis::Histogram;

    fn artifact(subsample: &str, is_data: bool, events: u64, content: f64) -> HistogramArtifact {
        let mut h = Histogram::with_uniform_bins("sr_x", 2, 0.0, 2.0);
        h.fill(0.5, content);
        let mut hists = BTreeMap::new();
        hists.insert("x".to_string(), h);
        let mut regions = BTreeMap::new();
        regions.insert("sr".to_string(), hists);
        HistogramArtifact {
            subsample: Some(subsample.to_string()),
            is_data,
            events_processed: events,
            regions,
        }
    }

    #[test]
    fn mc_scaled_data_untouched() {
        let mut xs = BTreeMap::new();
        xs.insert("WGJets".to_string(), 0.5);

        // MC: sf = 2000 * 0.5 / 100 = 10
        let mut mc = artifact("WGJets", false, 100, 1.0);
        luminosity_scale(&mut mc, &xs, 2000.0).unwrap();
        assert_eq!(mc.regions["sr"]["x"].bin_content[0], 10.0);

        let mut data = artifact("Data_2015D_subjob0", true, 100, 1.0);
        luminosity_scale(&mut data, &xs, 2000.0).unwrap();
        assert_eq!(data.regions["sr"]["x"].bin_content[0], 1.0);
    }

    #[test]
    fn missing_cross_section_is_an_error() {
        let xs = BTreeMap::new();
        let mut mc = artifact("WGJets", false, 100, 1.0);
        assert!(luminosity_scale(&mut mc, &xs, 2000.0).is_err());
    }

    #[test]
    fn combine_sums_scaled_subsamples() {
        let mut xs = BTreeMap::new();
        xs.insert("GJets_HT-100to200".to_string(), 10.0);
        xs.insert("GJets_HT-200to400".to_string(), 5.0);

        let parts = vec![
            artifact("GJets_HT-100to200", false, 1000, 1.0), // sf = 2260*10/1000 = 22.6
            artifact("GJets_HT-200to400", false, 500, 1.0),  // sf = 2260*5/500 = 22.6
        ];
        let total = combine_artifacts(parts, &xs, 2260.0).unwrap();
        assert!((total.regions["sr"]["x"].bin_content[0] - 45.2).abs() < 1e-9);
        assert_eq!(total.events_processed, 1500);
        assert_eq!(total.subsample, None);
    }

    #[test]
    fn combine_rejects_empty_input() {
        assert!(combine_artifacts(Vec::new(), &BTreeMap::new(), 2260.0).is_err());
    }
}
