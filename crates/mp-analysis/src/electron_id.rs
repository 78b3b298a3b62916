//! Loose electron identification, used for the signal-region electron veto.

use mp_core::Event;

use crate::effective_area::electron_area;

/// Cut constants for one supercluster-η regime.
struct ElectronCuts {
    sigma_ieta_ieta: f64,
    d_eta_in: f64,
    d_phi_in: f64,
    h_over_e: f64,
    rel_iso: f64,
    e_over_p_inv: f64,
    d0: f64,
    dz: f64,
    miss_hits: i32,
}

const BARREL: ElectronCuts = ElectronCuts {
    sigma_ieta_ieta: 0.0103,
    d_eta_in: 0.0105,
    d_phi_in: 0.115,
    h_over_e: 0.104,
    rel_iso: 0.0893,
    e_over_p_inv: 0.102,
    d0: 0.0261,
    dz: 0.41,
    miss_hits: 2,
};

const ENDCAP: ElectronCuts = ElectronCuts {
    sigma_ieta_ieta: 0.0301,
    d_eta_in: 0.00814,
    d_phi_in: 0.182,
    h_over_e: 0.0897,
    rel_iso: 0.121,
    e_over_p_inv: 0.126,
    d0: 0.118,
    dz: 0.822,
    miss_hits: 1,
};

/// Effective-area-corrected relative isolation of electron `i`:
/// `(chIso + max(0, neuIso + phoIso - rho*EA)) / pT`.
///
/// `None` when the supercluster is beyond the |η| = 2.5 identification
/// domain. Precondition: `pt[i] > 0`.
pub fn electron_rel_iso(event: &Event, i: usize) -> Option<f64> {
    let el = &event.electrons;
    let area = electron_area(el.sc_eta[i])?;
    let neutral = (el.pf_neu_iso[i] + el.pf_pho_iso[i] - event.rho * area).max(0.0);
    Some((el.pf_ch_iso[i] + neutral) / el.pt[i])
}

/// Loose electron identification.
///
/// Two supercluster-η regimes (barrel |η| <= 1.479, endcap up to 2.5) with
/// independent cut constants; electrons beyond |η| = 2.5 are rejected
/// unconditionally.
pub fn electron_id_loose(event: &Event, i: usize) -> bool {
    let el = &event.electrons;
    let rel_iso = match electron_rel_iso(event, i) {
        Some(iso) => iso,
        None => return false,
    };
    let cuts = if el.sc_eta[i].abs() <= 1.479 { &BARREL } else { &ENDCAP };

    el.sigma_ieta_ieta_full5x5[i] < cuts.sigma_ieta_ieta
        && el.d_eta_at_vtx[i].abs() < cuts.d_eta_in
        && el.d_phi_at_vtx[i].abs() < cuts.d_phi_in
        && el.h_over_e[i] < cuts.h_over_e
        && rel_iso < cuts.rel_iso
        && el.e_over_p_inv[i] < cuts.e_over_p_inv
        && el.d0[i].abs() < cuts.d0
        && el.dz[i].abs() < cuts.dz
        && el.miss_hits[i] <= cuts.miss_hits
        && el.conv_veto[i] == 1
}
