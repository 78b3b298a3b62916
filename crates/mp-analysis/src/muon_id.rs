//! Loose muon identification, used for the signal-region muon veto.

use mp_core::Event;

/// Working-point cut on [`muon_rel_iso`]. The loose ID below does not
/// gate on it; the muon veto only checks the reconstruction flags.
pub const MUON_LOOSE_ISO_CUT: f64 = 0.25;

/// Combined relative isolation of muon `i` with Δβ pileup subtraction:
/// `(chIso + max(0, neuIso + phoIso - 0.5*puIso)) / pT`.
///
/// Precondition: `pt[i] > 0`.
pub fn muon_rel_iso(event: &Event, i: usize) -> f64 {
    let mu = &event.muons;
    let neutral = (mu.pf_neu_iso[i] + mu.pf_pho_iso[i] - 0.5 * mu.pf_pu_iso[i]).max(0.0);
    (mu.pf_ch_iso[i] + neutral) / mu.pt[i]
}

/// Loose muon identification: particle-flow muon AND (global OR tracker).
pub fn muon_id_loose(event: &Event, i: usize) -> bool {
    let mu = &event.muons;
    mu.is_pf[i] && (mu.is_global[i] || mu.is_tracker[i])
}
