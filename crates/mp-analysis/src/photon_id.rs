//! Photon identification working points.
//!
//! Cut-based barrel photon ID ("SPRING15 selection, 25ns", medium working
//! point) plus the two modified predicates used by the fake-rate control
//! regions. All predicates are pure functions of the event and a photon
//! index.

use mp_core::Event;

use crate::effective_area::photon_areas;

/// Pileup-corrected isolation: `max(0, raw - rho * area)`. Never negative.
pub fn corrected_isolation(raw: f64, rho: f64, area: f64) -> f64 {
    (raw - rho * area).max(0.0)
}

/// Isolation working-point strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationWp {
    /// Medium working point (signal selection).
    Medium,
    /// Loose working point.
    Loose,
    /// Very loose: per-category threshold capped at
    /// `min(0.20 * pT, 5 * loose threshold)`.
    VeryLoose,
}

/// Cut thresholds on the (charged, neutral, photon) corrected isolations.
///
/// Neutral and photon thresholds grow with the photon pT (quadratic and
/// linear respectively); the charged threshold is flat.
#[derive(Debug, Clone, Copy)]
struct IsolationCuts {
    charged: f64,
    neutral: f64,
    photon: f64,
}

fn medium_cuts(et: f64) -> IsolationCuts {
    IsolationCuts {
        charged: 1.37,
        neutral: 1.06 + 0.014 * et + 0.000019 * et * et,
        photon: 0.28 + 0.0053 * et,
    }
}

fn loose_cuts(et: f64) -> IsolationCuts {
    IsolationCuts {
        charged: 3.32,
        neutral: 1.92 + 0.014 * et + 0.000019 * et * et,
        photon: 0.81 + 0.0053 * et,
    }
}

fn very_loose_cuts(et: f64) -> IsolationCuts {
    let loose = loose_cuts(et);
    IsolationCuts {
        charged: (0.20 * et).min(5.0 * loose.charged),
        neutral: (0.20 * et).min(5.0 * loose.neutral),
        photon: (0.20 * et).min(5.0 * loose.photon),
    }
}

/// Does photon `i` satisfy the given isolation working point?
pub fn passes_isolation(event: &Event, i: usize, wp: IsolationWp) -> bool {
    let ph = &event.photons;
    let et = ph.et[i];
    let areas = photon_areas(ph.sc_eta[i]);
    let cuts = match wp {
        IsolationWp::Medium => medium_cuts(et),
        IsolationWp::Loose => loose_cuts(et),
        IsolationWp::VeryLoose => very_loose_cuts(et),
    };
    corrected_isolation(ph.pf_ch_iso[i], event.rho, areas.charged) < cuts.charged
        && corrected_isolation(ph.pf_neu_iso[i], event.rho, areas.neutral) < cuts.neutral
        && corrected_isolation(ph.pf_pho_iso[i], event.rho, areas.photon) < cuts.photon
}

/// Photon identification predicate used by a region's candidate scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotonId {
    /// Medium working point: the signal photon.
    Medium,
    /// Electron-fake denominator: medium ID with the pixel-seed
    /// requirement inverted.
    ElectronFakeDenominator,
    /// Jet-fake (QCD) denominator: fails loose isolation but passes the
    /// very-loose one.
    JetFakeDenominator,
}

impl PhotonId {
    /// Evaluate this predicate for photon `i`.
    pub fn passes(self, event: &Event, i: usize) -> bool {
        let ph = &event.photons;
        let shower_ok = ph.h_over_e[i] < 0.05 && ph.sigma_ieta_ieta_full5x5[i] < 0.0102;
        if !shower_ok {
            return false;
        }
        match self {
            PhotonId::Medium => {
                ph.has_pixel_seed[i] == 0 && passes_isolation(event, i, IsolationWp::Medium)
            }
            PhotonId::ElectronFakeDenominator => {
                ph.has_pixel_seed[i] == 1 && passes_isolation(event, i, IsolationWp::Medium)
            }
            PhotonId::JetFakeDenominator => {
                ph.has_pixel_seed[i] == 0
                    && !passes_isolation(event, i, IsolationWp::Loose)
                    && passes_isolation(event, i, IsolationWp::VeryLoose)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_photon_event() -> Event {
        let mut ev = Event::default();
        let ph = &mut ev.photons;
        ph.et = vec![200.0];
        ph.eta = vec![0.5];
        ph.sc_eta = vec![0.5];
        ph.phi = vec![0.0];
        ph.sc_phi = vec![0.0];
        ph.h_over_e = vec![0.0];
        ph.sigma_ieta_ieta_full5x5 = vec![0.0];
        ph.has_pixel_seed = vec![0];
        ph.pf_ch_iso = vec![0.0];
        ph.pf_neu_iso = vec![0.0];
        ph.pf_pho_iso = vec![0.0];
        ev.rho = 10.0;
        ev
    }

    #[test]
    fn corrected_isolation_never_negative() {
        assert_eq!(corrected_isolation(1.0, 10.0, 0.05), 0.5);
        assert_eq!(corrected_isolation(0.1, 10.0, 0.05), 0.0);
        assert_eq!(corrected_isolation(-3.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn perfectly_clean_photon_passes_medium() {
        let ev = one_photon_event();
        assert!(PhotonId::Medium.passes(&ev, 0));
    }

    #[test]
    fn pixel_seed_alone_fails_medium() {
        let mut ev = one_photon_event();
        ev.photons.has_pixel_seed[0] = 1;
        assert!(!PhotonId::Medium.passes(&ev, 0));
        // ... and is exactly what the electron-fake denominator wants
        assert!(PhotonId::ElectronFakeDenominator.passes(&ev, 0));
    }

    #[test]
    fn shower_shape_cut_applies_to_all_predicates() {
        let mut ev = one_photon_event();
        ev.photons.h_over_e[0] = 0.06;
        assert!(!PhotonId::Medium.passes(&ev, 0));
        assert!(!PhotonId::ElectronFakeDenominator.passes(&ev, 0));
        assert!(!PhotonId::JetFakeDenominator.passes(&ev, 0));
    }

    #[test]
    fn pt_dependent_neutral_threshold() {
        // at 200 GeV the medium neutral threshold is
        // 1.06 + 2.8 + 0.76 = 4.62
        let mut ev = one_photon_event();
        ev.rho = 0.0;
        ev.photons.pf_neu_iso[0] = 4.5;
        assert!(passes_isolation(&ev, 0, IsolationWp::Medium));
        ev.photons.pf_neu_iso[0] = 4.7;
        assert!(!passes_isolation(&ev, 0, IsolationWp::Medium));
    }

    #[test]
    fn very_loose_caps_at_fraction_of_pt() {
        // low-pT photon: 0.20*15 = 3.0 caps below 5*loose for neutral/photon
        let mut ev = one_photon_event();
        ev.rho = 0.0;
        ev.photons.et[0] = 15.0;
        ev.photons.pf_ch_iso[0] = 3.5;
        assert!(!passes_isolation(&ev, 0, IsolationWp::VeryLoose));
        ev.photons.pf_ch_iso[0] = 2.5;
        assert!(passes_isolation(&ev, 0, IsolationWp::VeryLoose));
    }

    #[test]
    fn qcd_denominator_sits_between_loose_and_very_loose() {
        let mut ev = one_photon_event();
        ev.rho = 0.0;
        // clean photon passes loose, so it is NOT a QCD-denominator object
        assert!(!PhotonId::JetFakeDenominator.passes(&ev, 0));
        // charged iso above loose (3.32) but below the very-loose cap
        // (min(0.2*200, 5*3.32) = 16.6)
        ev.photons.pf_ch_iso[0] = 5.0;
        assert!(PhotonId::JetFakeDenominator.passes(&ev, 0));
        // way above the very-loose cap: fails both
        ev.photons.pf_ch_iso[0] = 20.0;
        assert!(!PhotonId::JetFakeDenominator.passes(&ev, 0));
    }
}
