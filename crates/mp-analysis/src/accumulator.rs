//! Per-region histogram accumulation.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use mp_core::{Event, RunConfig};

use crate::histogram::Histogram;
use crate::selection::{wrap_dphi, RegionKind};

/// The fixed set of histograms each region owns.
///
/// Booked once at startup, mutated only through [`RegionHistograms::fill`],
/// and exported once at the end of the run.
#[derive(Debug, Clone)]
pub struct RegionHistograms {
    events_passed: Histogram,
    events_passed_weighted: Histogram,
    photon_pt: Histogram,
    photon_eta: Histogram,
    photon_sc_eta: Histogram,
    photon_phi: Histogram,
    photon_sc_phi: Histogram,
    pfmet: Histogram,
    dphi_photon_met: Histogram,
    njets: Histogram,
    leading_jet_pt: Histogram,
    leading_jet_eta: Histogram,
}

impl RegionHistograms {
    /// Book the histogram set for the region with the given key. Names
    /// are prefixed with the region key, fine-binned; coarse analysis
    /// binnings are a rebin away downstream.
    pub fn book(region: &str) -> Self {
        let h = |name: &str, n: usize, lo: f64, hi: f64| {
            Histogram::with_uniform_bins(format!("{region}_{name}"), n, lo, hi)
        };
        Self {
            events_passed: h("events_passed", 1, 0.5, 1.5),
            events_passed_weighted: h("events_passed_weighted", 1, 0.5, 1.5),
            photon_pt: h("photon_pt", 200, 0.0, 1000.0),
            photon_eta: h("photon_eta", 60, -1.5, 1.5),
            photon_sc_eta: h("photon_SCeta", 60, -1.5, 1.5),
            photon_phi: h("photon_phi", 100, -1.1 * PI, 1.1 * PI),
            photon_sc_phi: h("photon_SCphi", 120, -1.1 * PI, 1.1 * PI),
            pfmet: h("pfmet", 100, 0.0, 1000.0),
            dphi_photon_met: h("dphi_photon_met", 100, 0.0, PI),
            njets: h("njets", 21, -0.5, 20.5),
            leading_jet_pt: h("leading_jet_pt", 50, 0.0, 1000.0),
            leading_jet_eta: h("leading_jet_eta", 50, -5.0, 5.0),
        }
    }

    /// Fill every histogram from the event, reading photon kinematics at
    /// the selected index. The leading jet is always input-order index 0,
    /// independent of the photon; events reaching here are expected to
    /// have at least one jet (accessor precondition).
    pub fn fill(&mut self, event: &Event, i_pho: usize, weight: f64) {
        self.events_passed.fill_unweighted(1.0);
        self.events_passed_weighted.fill(1.0, weight);
        self.photon_pt.fill(event.photons.et[i_pho], weight);
        self.photon_eta.fill(event.photons.eta[i_pho], weight);
        self.photon_sc_eta.fill(event.photons.sc_eta[i_pho], weight);
        self.photon_phi.fill(event.photons.phi[i_pho], weight);
        self.photon_sc_phi.fill(event.photons.sc_phi[i_pho], weight);
        self.pfmet.fill(event.pf_met, weight);
        self.dphi_photon_met
            .fill(wrap_dphi(event.photons.phi[i_pho] - event.pf_met_phi), weight);
        self.njets.fill(event.jets.len() as f64, weight);
        self.leading_jet_pt.fill(event.jets.pt[0], weight);
        self.leading_jet_eta.fill(event.jets.eta[0], weight);
    }

    /// Export as a name → histogram map (short names, without the region
    /// prefix).
    pub fn into_map(self) -> BTreeMap<String, Histogram> {
        let mut map = BTreeMap::new();
        for (key, hist) in [
            ("events_passed", self.events_passed),
            ("events_passed_weighted", self.events_passed_weighted),
            ("photon_pt", self.photon_pt),
            ("photon_eta", self.photon_eta),
            ("photon_SCeta", self.photon_sc_eta),
            ("photon_phi", self.photon_phi),
            ("photon_SCphi", self.photon_sc_phi),
            ("pfmet", self.pfmet),
            ("dphi_photon_met", self.dphi_photon_met),
            ("njets", self.njets),
            ("leading_jet_pt", self.leading_jet_pt),
            ("leading_jet_eta", self.leading_jet_eta),
        ] {
            map.insert(key.to_string(), hist);
        }
        map
    }
}

/// Evaluates every region for each event and fills the passing ones.
#[derive(Debug)]
pub struct RegionAccumulator {
    config: RunConfig,
    regions: Vec<(RegionKind, RegionHistograms)>,
    events_processed: u64,
}

impl RegionAccumulator {
    /// Book histogram sets for all regions.
    pub fn new(config: RunConfig) -> Self {
        let regions = RegionKind::ALL
            .iter()
            .map(|&kind| (kind, RegionHistograms::book(kind.key())))
            .collect();
        Self { config, regions, events_processed: 0 }
    }

    /// Process one event: bump the processed counter, evaluate every
    /// region, and fill those that pass with their weight rule.
    pub fn process(&mut self, event: &Event) {
        self.events_processed += 1;
        for (kind, hists) in &mut self.regions {
            let outcome = kind.evaluate(event);
            if !outcome.passed {
                continue;
            }
            if let Some(i_pho) = outcome.photon {
                let weight = kind.weight(&self.config, event, i_pho);
                hists.fill(event, i_pho, weight);
            }
        }
    }

    /// Number of events seen, independent of selection outcomes.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Export all regions as key → (name → histogram) maps.
    pub fn into_regions(self) -> BTreeMap<String, BTreeMap<String, Histogram>> {
        self.regions
            .into_iter()
            .map(|(kind, hists)| (kind.key().to_string(), hists.into_map()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sr_event;
    use approx::assert_relative_eq;

    #[test]
    fn booked_set_matches_the_fixed_catalog() {
        let map = RegionHistograms::book("sr").into_map();
        assert_eq!(map.len(), 12);
        assert_eq!(map["photon_pt"].name, "sr_photon_pt");
        assert_eq!(map["photon_pt"].n_bins(), 200);
        assert_eq!(map["njets"].bin_edges[0], -0.5);
        assert_relative_eq!(map["dphi_photon_met"].bin_edges[100], PI, epsilon = 1e-12);
    }

    #[test]
    fn passing_event_fills_every_sr_histogram_once() {
        let mut acc = RegionAccumulator::new(RunConfig::default());
        acc.process(&sr_event());
        assert_eq!(acc.events_processed(), 1);

        let regions = acc.into_regions();
        for hist in regions["sr"].values() {
            assert_eq!(hist.entries, 1, "{} should have one entry", hist.name);
        }
        // backup triggers did not fire, so the trigger regions are empty
        for hist in regions["trigger_denominator"].values() {
            assert_eq!(hist.entries, 0);
        }
        assert_relative_eq!(regions["sr"]["pfmet"].integral(), 1.0);
        assert_relative_eq!(regions["sr"]["photon_pt"].integral(), 1.0);
    }

    #[test]
    fn failing_event_only_bumps_the_processed_counter() {
        let mut ev = sr_event();
        ev.hlt_pho = 0;
        let mut acc = RegionAccumulator::new(RunConfig::default());
        acc.process(&ev);
        assert_eq!(acc.events_processed(), 1);
        for (_, hists) in acc.into_regions() {
            for hist in hists.values() {
                assert_eq!(hist.entries, 0);
            }
        }
    }

    #[test]
    fn control_region_fill_uses_its_scale_factor() {
        let mut ev = sr_event();
        ev.photons.has_pixel_seed[0] = 1;
        let mut acc = RegionAccumulator::new(RunConfig::default());
        acc.process(&ev);
        let regions = acc.into_regions();
        let cr = &regions["cr_electronfakes"];
        assert_eq!(cr["events_passed"].bin_content, vec![1.0]);
        assert_relative_eq!(cr["events_passed_weighted"].bin_content[0], 0.0184);
        assert_relative_eq!(cr["photon_pt"].sumw2.iter().sum::<f64>(), 0.0184 * 0.0184);
    }

    #[test]
    fn events_passed_stays_unweighted() {
        let mut ev = sr_event();
        ev.rho = 0.0;
        ev.photons.pf_ch_iso[0] = 5.0; // QCD denominator object
        let mut acc = RegionAccumulator::new(RunConfig::default());
        acc.process(&ev);
        let regions = acc.into_regions();
        let cr = &regions["cr_jetfakes"];
        assert_eq!(cr["events_passed"].bin_content, vec![1.0]);
        // weighted counterpart carries 0.079 + 0.00014 * 250
        assert_relative_eq!(cr["events_passed_weighted"].bin_content[0], 0.114);
    }
}
