//! Per-event detector-reconstruction record.
//!
//! An [`Event`] is a flat record of parallel-indexed object columns
//! (photons, electrons, muons, jets) plus event-level scalars. All columns
//! of one category are aligned on the same object index, and objects are
//! pre-sorted by descending transverse momentum by the upstream ntuple
//! producer (assumed, not re-verified here). Accessors are valid for
//! `0..len()-1`; out-of-range indexing panics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Photon columns. Angles in radians, energies/momenta in GeV.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotonCols {
    /// Transverse energy.
    pub et: Vec<f64>,
    /// Track-based pseudorapidity.
    pub eta: Vec<f64>,
    /// Supercluster pseudorapidity.
    pub sc_eta: Vec<f64>,
    /// Azimuthal angle.
    pub phi: Vec<f64>,
    /// Supercluster azimuthal angle.
    pub sc_phi: Vec<f64>,
    /// Hadronic-over-electromagnetic energy ratio.
    pub h_over_e: Vec<f64>,
    /// Full 5x5 shower-shape variable.
    pub sigma_ieta_ieta_full5x5: Vec<f64>,
    /// Pixel-seed flag (0 or 1).
    pub has_pixel_seed: Vec<i32>,
    /// PF charged-hadron isolation sum.
    pub pf_ch_iso: Vec<f64>,
    /// PF neutral-hadron isolation sum.
    pub pf_neu_iso: Vec<f64>,
    /// PF photon isolation sum.
    pub pf_pho_iso: Vec<f64>,
}

/// Electron columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectronCols {
    /// Transverse momentum.
    pub pt: Vec<f64>,
    /// Track-based pseudorapidity.
    pub eta: Vec<f64>,
    /// Supercluster pseudorapidity.
    pub sc_eta: Vec<f64>,
    /// Azimuthal angle.
    pub phi: Vec<f64>,
    /// Full 5x5 shower-shape variable.
    pub sigma_ieta_ieta_full5x5: Vec<f64>,
    /// Track-cluster matching dEta at the vertex.
    pub d_eta_at_vtx: Vec<f64>,
    /// Track-cluster matching dPhi at the vertex.
    pub d_phi_at_vtx: Vec<f64>,
    /// Hadronic-over-electromagnetic energy ratio.
    pub h_over_e: Vec<f64>,
    /// |1/E - 1/p|.
    pub e_over_p_inv: Vec<f64>,
    /// Transverse impact parameter.
    pub d0: Vec<f64>,
    /// Longitudinal impact parameter.
    pub dz: Vec<f64>,
    /// PF charged-hadron isolation sum.
    pub pf_ch_iso: Vec<f64>,
    /// PF neutral-hadron isolation sum.
    pub pf_neu_iso: Vec<f64>,
    /// PF photon isolation sum.
    pub pf_pho_iso: Vec<f64>,
    /// Missing tracker hits.
    pub miss_hits: Vec<i32>,
    /// Conversion-veto decision (1 = passes).
    pub conv_veto: Vec<i32>,
}

/// Muon columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuonCols {
    /// Transverse momentum.
    pub pt: Vec<f64>,
    /// Pseudorapidity.
    pub eta: Vec<f64>,
    /// Azimuthal angle.
    pub phi: Vec<f64>,
    /// Particle-flow muon flag.
    pub is_pf: Vec<bool>,
    /// Global-muon flag.
    pub is_global: Vec<bool>,
    /// Tracker-muon flag.
    pub is_tracker: Vec<bool>,
    /// PF charged-hadron isolation sum.
    pub pf_ch_iso: Vec<f64>,
    /// PF neutral-hadron isolation sum.
    pub pf_neu_iso: Vec<f64>,
    /// PF photon isolation sum.
    pub pf_pho_iso: Vec<f64>,
    /// PF pileup isolation sum.
    pub pf_pu_iso: Vec<f64>,
}

/// Jet columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JetCols {
    /// Transverse momentum.
    pub pt: Vec<f64>,
    /// Pseudorapidity.
    pub eta: Vec<f64>,
    /// Azimuthal angle.
    pub phi: Vec<f64>,
}

/// One reconstructed event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// Photon columns.
    #[serde(default)]
    pub photons: PhotonCols,
    /// Electron columns.
    #[serde(default)]
    pub electrons: ElectronCols,
    /// Muon columns.
    #[serde(default)]
    pub muons: MuonCols,
    /// Jet columns.
    #[serde(default)]
    pub jets: JetCols,

    /// Magnitude of the PF missing transverse energy.
    pub pf_met: f64,
    /// Azimuthal direction of the PF missing transverse energy.
    pub pf_met_phi: f64,
    /// Event pileup density estimate.
    pub rho: f64,
    /// Photon-trigger result bitmask (one reserved bit per trigger path).
    #[serde(default)]
    pub hlt_pho: u64,
    /// Event-quality filter word (0 = all filters passed).
    #[serde(default)]
    pub met_filters: i64,
}

impl PhotonCols {
    /// Number of photons.
    pub fn len(&self) -> usize {
        self.et.len()
    }

    /// True when the event has no photons.
    pub fn is_empty(&self) -> bool {
        self.et.is_empty()
    }
}

impl ElectronCols {
    /// Number of electrons.
    pub fn len(&self) -> usize {
        self.pt.len()
    }

    /// True when the event has no electrons.
    pub fn is_empty(&self) -> bool {
        self.pt.is_empty()
    }
}

impl MuonCols {
    /// Number of muons.
    pub fn len(&self) -> usize {
        self.pt.len()
    }

    /// True when the event has no muons.
    pub fn is_empty(&self) -> bool {
        self.pt.is_empty()
    }
}

impl JetCols {
    /// Number of jets.
    pub fn len(&self) -> usize {
        self.pt.len()
    }

    /// True when the event has no jets.
    pub fn is_empty(&self) -> bool {
        self.pt.is_empty()
    }
}

impl Event {
    /// Check that every column of each object category has the same length.
    ///
    /// Producers are trusted on pT ordering, but a record with ragged
    /// columns would silently misalign object indices, so sources reject
    /// it up front.
    pub fn validate(&self) -> Result<()> {
        let p = &self.photons;
        check_aligned(
            "photon",
            p.len(),
            &[
                p.eta.len(),
                p.sc_eta.len(),
                p.phi.len(),
                p.sc_phi.len(),
                p.h_over_e.len(),
                p.sigma_ieta_ieta_full5x5.len(),
                p.has_pixel_seed.len(),
                p.pf_ch_iso.len(),
                p.pf_neu_iso.len(),
                p.pf_pho_iso.len(),
            ],
        )?;
        let e = &self.electrons;
        check_aligned(
            "electron",
            e.len(),
            &[
                e.eta.len(),
                e.sc_eta.len(),
                e.phi.len(),
                e.sigma_ieta_ieta_full5x5.len(),
                e.d_eta_at_vtx.len(),
                e.d_phi_at_vtx.len(),
                e.h_over_e.len(),
                e.e_over_p_inv.len(),
                e.d0.len(),
                e.dz.len(),
                e.pf_ch_iso.len(),
                e.pf_neu_iso.len(),
                e.pf_pho_iso.len(),
                e.miss_hits.len(),
                e.conv_veto.len(),
            ],
        )?;
        let m = &self.muons;
        check_aligned(
            "muon",
            m.len(),
            &[
                m.eta.len(),
                m.phi.len(),
                m.is_pf.len(),
                m.is_global.len(),
                m.is_tracker.len(),
                m.pf_ch_iso.len(),
                m.pf_neu_iso.len(),
                m.pf_pho_iso.len(),
                m.pf_pu_iso.len(),
            ],
        )?;
        let j = &self.jets;
        check_aligned("jet", j.len(), &[j.eta.len(), j.phi.len()])?;
        Ok(())
    }
}

fn check_aligned(category: &str, expected: usize, lens: &[usize]) -> Result<()> {
    for &len in lens {
        if len != expected {
            return Err(Error::Input(format!(
                "ragged {category} columns: expected {expected} entries, found {len}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_event_is_valid_and_empty() {
        let ev = Event::default();
        assert!(ev.validate().is_ok());
        assert!(ev.photons.is_empty());
        assert_eq!(ev.jets.len(), 0);
    }

    #[test]
    fn ragged_columns_rejected() {
        let mut ev = Event::default();
        ev.photons.et = vec![200.0];
        // every other photon column left empty
        let err = ev.validate().unwrap_err();
        assert!(err.to_string().contains("photon"));
    }

    #[test]
    fn json_round_trip() {
        let mut ev = Event::default();
        ev.photons.et = vec![250.0, 80.0];
        ev.photons.eta = vec![0.3, -1.1];
        ev.photons.sc_eta = vec![0.31, -1.12];
        ev.photons.phi = vec![1.0, -2.0];
        ev.photons.sc_phi = vec![1.01, -2.01];
        ev.photons.h_over_e = vec![0.01, 0.02];
        ev.photons.sigma_ieta_ieta_full5x5 = vec![0.009, 0.011];
        ev.photons.has_pixel_seed = vec![0, 1];
        ev.photons.pf_ch_iso = vec![0.2, 3.0];
        ev.photons.pf_neu_iso = vec![0.5, 4.0];
        ev.photons.pf_pho_iso = vec![0.4, 2.0];
        ev.pf_met = 210.0;
        ev.pf_met_phi = -1.4;
        ev.rho = 12.5;
        ev.hlt_pho = 0b1000_0000;
        let json = serde_json::to_string(&ev).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back.photons.len(), 2);
        assert_eq!(back.hlt_pho, ev.hlt_pho);
        assert_eq!(back.pf_met, ev.pf_met);
    }
}
