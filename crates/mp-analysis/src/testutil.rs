//! Synthetic-event builders shared by the unit tests.

use mp_core::Event;

use crate::trigger::PhotonTrigger;

/// An event that passes every signal-region cut with some margin: one
/// clean barrel photon back-to-back with a 300 GeV MET, one hard jet far
/// from the MET direction, signal trigger fired, filters clean.
pub(crate) fn sr_event() -> Event {
    let mut ev = Event::default();
    let ph = &mut ev.photons;
    ph.et = vec![250.0];
    ph.eta = vec![0.3];
    ph.sc_eta = vec![0.3];
    ph.phi = vec![0.0];
    ph.sc_phi = vec![0.0];
    ph.h_over_e = vec![0.0];
    ph.sigma_ieta_ieta_full5x5 = vec![0.0];
    ph.has_pixel_seed = vec![0];
    ph.pf_ch_iso = vec![0.0];
    ph.pf_neu_iso = vec![0.0];
    ph.pf_pho_iso = vec![0.0];
    ev.jets.pt = vec![45.0];
    ev.jets.eta = vec![1.2];
    ev.jets.phi = vec![0.2];
    ev.pf_met = 300.0;
    ev.pf_met_phi = std::f64::consts::PI;
    ev.rho = 10.0;
    ev.hlt_pho = 1 << PhotonTrigger::Photon175 as u8;
    ev.met_filters = 0;
    ev
}

/// Append a loose, isolated barrel electron at (η, φ) with the given pT.
pub(crate) fn push_loose_electron(ev: &mut Event, pt: f64, eta: f64, phi: f64) {
    let el = &mut ev.electrons;
    el.pt.push(pt);
    el.eta.push(eta);
    el.sc_eta.push(eta);
    el.phi.push(phi);
    el.sigma_ieta_ieta_full5x5.push(0.0);
    el.d_eta_at_vtx.push(0.0);
    el.d_phi_at_vtx.push(0.0);
    el.h_over_e.push(0.0);
    el.e_over_p_inv.push(0.0);
    el.d0.push(0.0);
    el.dz.push(0.0);
    el.pf_ch_iso.push(0.0);
    el.pf_neu_iso.push(0.0);
    el.pf_pho_iso.push(0.0);
    el.miss_hits.push(0);
    el.conv_veto.push(1);
}

/// Append a loose global muon at (η, φ) with the given pT.
pub(crate) fn push_loose_muon(ev: &mut Event, pt: f64, eta: f64, phi: f64) {
    let mu = &mut ev.muons;
    mu.pt.push(pt);
    mu.eta.push(eta);
    mu.phi.push(phi);
    mu.is_pf.push(true);
    mu.is_global.push(true);
    mu.is_tracker.push(false);
    mu.pf_ch_iso.push(0.0);
    mu.pf_neu_iso.push(0.0);
    mu.pf_pho_iso.push(0.0);
    mu.pf_pu_iso.push(0.0);
}
