//! Event selection: candidate-photon choice, lepton and jet vetoes, and
//! the named analysis regions.
//!
//! Each region is a pure predicate over one event, returning pass/fail
//! together with the index of the selected photon. Regions share the same
//! candidate-scan and veto machinery and differ only in their photon
//! working point, their extra cuts, and their fill-weight rule, so they
//! are modeled as a fixed table of enum variants rather than a map of
//! closures.

use mp_core::{Event, RunConfig};

use crate::electron_id::electron_id_loose;
use crate::muon_id::muon_id_loose;
use crate::photon_id::PhotonId;
use crate::trigger::{backup_triggers_fired, signal_triggers_fired};

/// Barrel fiducial cut on the candidate photon's supercluster η.
pub const BARREL_SC_ETA_MAX: f64 = 1.4442;

/// Map an azimuthal difference onto the opening-angle interval [0, π].
///
/// `acos(cos(Δφ))` folds the 2π periodicity away, so callers never have
/// to normalize their inputs.
pub fn wrap_dphi(dphi: f64) -> f64 {
    dphi.cos().acos()
}

/// Outcome of evaluating one region for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Did the event pass the region?
    pub passed: bool,
    /// Index of the selected photon, `None` when no candidate was found.
    pub photon: Option<usize>,
}

impl SelectionOutcome {
    fn fail() -> Self {
        Self { passed: false, photon: None }
    }
}

/// First photon (input order, i.e. descending pT) inside the barrel
/// fiducial region that satisfies the working point. First-match, not
/// best-match: ordering is inherited entirely from the producer.
pub fn candidate_photon(event: &Event, id: PhotonId) -> Option<usize> {
    (0..event.photons.len())
        .find(|&i| event.photons.sc_eta[i].abs() < BARREL_SC_ETA_MAX && id.passes(event, i))
}

/// Number of veto electrons: loose ID, pT > 10, and separation from the
/// candidate photon above 0.5.
///
/// The separation uses the photon's track-based η, not the SC η the
/// candidate was selected on. Keep as is; changing it changes the veto.
fn veto_electrons(event: &Event, i_pho: usize) -> usize {
    let el = &event.electrons;
    let pho_eta = event.photons.eta[i_pho];
    let pho_phi = event.photons.phi[i_pho];
    (0..el.len())
        .filter(|&i| {
            let d_eta = el.eta[i] - pho_eta;
            let d_phi = wrap_dphi(el.phi[i] - pho_phi);
            let dr = (d_eta * d_eta + d_phi * d_phi).sqrt();
            electron_id_loose(event, i) && el.pt[i] > 10.0 && dr > 0.5
        })
        .count()
}

/// Number of veto muons, same construction as [`veto_electrons`].
fn veto_muons(event: &Event, i_pho: usize) -> usize {
    let mu = &event.muons;
    let pho_eta = event.photons.eta[i_pho];
    let pho_phi = event.photons.phi[i_pho];
    (0..mu.len())
        .filter(|&i| {
            let d_eta = mu.eta[i] - pho_eta;
            let d_phi = wrap_dphi(mu.phi[i] - pho_phi);
            let dr = (d_eta * d_eta + d_phi * d_phi).sqrt();
            muon_id_loose(event, i) && mu.pt[i] > 10.0 && dr > 0.5
        })
        .count()
}

/// Require the missing energy to point away from all of the leading four
/// jets: fail when any of them has pT > 30 within Δφ < 0.5 of the MET.
fn met_away_from_jets(event: &Event) -> bool {
    let jets = &event.jets;
    let n = jets.len().min(4);
    (0..n).all(|i| {
        !(wrap_dphi(jets.phi[i] - event.pf_met_phi) < 0.5 && jets.pt[i] > 30.0)
    })
}

/// Full signal-region selection with a pluggable photon working point.
///
/// The two fake-rate control regions reuse this with their denominator
/// predicates substituted.
fn signal_region_like(event: &Event, id: PhotonId) -> SelectionOutcome {
    let i_pho = match candidate_photon(event, id) {
        Some(i) => i,
        None => return SelectionOutcome::fail(),
    };

    let passed = signal_triggers_fired(event.hlt_pho)
        && event.met_filters == 0
        && event.photons.et[i_pho] > 175.0
        && event.pf_met > 170.0
        && wrap_dphi(event.photons.phi[i_pho] - event.pf_met_phi) > 2.0
        && veto_electrons(event, i_pho) == 0
        && veto_muons(event, i_pho) == 0
        && met_away_from_jets(event);

    SelectionOutcome { passed, photon: Some(i_pho) }
}

/// Trigger-efficiency denominator: unbiased backup triggers plus a relaxed
/// MET cut, with a signal-style candidate photon (ID and η cuts only).
fn trigger_denominator(event: &Event) -> SelectionOutcome {
    let i_pho = match candidate_photon(event, PhotonId::Medium) {
        Some(i) => i,
        None => return SelectionOutcome::fail(),
    };
    let passed = backup_triggers_fired(event.hlt_pho) && event.pf_met > 140.0;
    SelectionOutcome { passed, photon: Some(i_pho) }
}

/// The named analysis regions, in fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Trigger-efficiency numerator.
    TriggerNumerator,
    /// Trigger-efficiency denominator.
    TriggerDenominator,
    /// The monophoton signal region.
    SignalRegion,
    /// Electron→photon fake-rate control region.
    ElectronFakes,
    /// Jet→photon (QCD) fake-rate control region.
    JetFakes,
}

impl RegionKind {
    /// Every region, in the order histograms are booked and filled.
    pub const ALL: [RegionKind; 5] = [
        RegionKind::TriggerNumerator,
        RegionKind::TriggerDenominator,
        RegionKind::SignalRegion,
        RegionKind::ElectronFakes,
        RegionKind::JetFakes,
    ];

    /// Stable string key, used for histogram naming and output.
    pub fn key(&self) -> &'static str {
        match self {
            RegionKind::TriggerNumerator => "trigger_numerator",
            RegionKind::TriggerDenominator => "trigger_denominator",
            RegionKind::SignalRegion => "sr",
            RegionKind::ElectronFakes => "cr_electronfakes",
            RegionKind::JetFakes => "cr_jetfakes",
        }
    }

    /// Photon working point this region's candidate scan uses.
    pub fn photon_id(&self) -> PhotonId {
        match self {
            RegionKind::TriggerNumerator
            | RegionKind::TriggerDenominator
            | RegionKind::SignalRegion => PhotonId::Medium,
            RegionKind::ElectronFakes => PhotonId::ElectronFakeDenominator,
            RegionKind::JetFakes => PhotonId::JetFakeDenominator,
        }
    }

    /// Evaluate this region for one event. Pure: regions never mutate
    /// shared state, and several may pass for the same event.
    pub fn evaluate(&self, event: &Event) -> SelectionOutcome {
        match self {
            RegionKind::SignalRegion | RegionKind::ElectronFakes | RegionKind::JetFakes => {
                signal_region_like(event, self.photon_id())
            }
            RegionKind::TriggerDenominator => trigger_denominator(event),
            RegionKind::TriggerNumerator => {
                let denom = trigger_denominator(event);
                SelectionOutcome {
                    passed: denom.passed && signal_triggers_fired(event.hlt_pho),
                    photon: denom.photon,
                }
            }
        }
    }

    /// Fill weight for a passing event. The control regions carry their
    /// external fake-rate scale factors; everything else fills with unit
    /// weight.
    pub fn weight(&self, config: &RunConfig, event: &Event, i_pho: usize) -> f64 {
        match self {
            RegionKind::ElectronFakes => config.electron_fake_rate,
            RegionKind::JetFakes => {
                config.jet_fake_rate_intercept
                    + config.jet_fake_rate_slope * event.photons.et[i_pho]
            }
            _ => 1.0,
        }
    }
}
