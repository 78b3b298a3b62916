//! Pileup effective-area lookup tables.
//!
//! Effective areas are step functions of |η| used to subtract the expected
//! pileup contribution (`rho * area`) from particle-flow isolation sums.
//! Bins follow a closed-lower/open-upper convention; the photon table is
//! open-ended above its last edge, so any |η| beyond 2.4 resolves to the
//! final row instead of erroring.

/// Effective areas for the three photon isolation categories at one |η|.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotonAreas {
    /// Charged-hadron isolation area.
    pub charged: f64,
    /// Neutral-hadron isolation area.
    pub neutral: f64,
    /// Photon isolation area.
    pub photon: f64,
}

/// Photon effective areas per |η| bin: (lower edge, charged, neutral, photon).
///
/// SPRING15 25ns values. Rows are sorted by lower edge; the last row is
/// open-ended.
const PHOTON_AREA_TABLE: [(f64, PhotonAreas); 7] = [
    (0.0, PhotonAreas { charged: 0.0456, neutral: 0.0599, photon: 0.1271 }),
    (1.0, PhotonAreas { charged: 0.0500, neutral: 0.0819, photon: 0.1101 }),
    (1.479, PhotonAreas { charged: 0.0340, neutral: 0.0696, photon: 0.0756 }),
    (2.0, PhotonAreas { charged: 0.0383, neutral: 0.0360, photon: 0.1175 }),
    (2.2, PhotonAreas { charged: 0.0339, neutral: 0.0360, photon: 0.1498 }),
    (2.3, PhotonAreas { charged: 0.0303, neutral: 0.0462, photon: 0.1857 }),
    (2.4, PhotonAreas { charged: 0.0240, neutral: 0.0656, photon: 0.2183 }),
];

/// Electron combined-isolation effective areas per |η| bin, closed-upper
/// edges up to 2.5. Electrons beyond 2.5 have no area (rejected by the ID).
const ELECTRON_AREA_TABLE: [(f64, f64); 7] = [
    (1.0, 0.1752),
    (1.479, 0.1862),
    (2.0, 0.1411),
    (2.2, 0.1534),
    (2.3, 0.1903),
    (2.4, 0.2243),
    (2.5, 0.2687),
];

/// Look up the photon effective areas for a supercluster pseudorapidity.
pub fn photon_areas(sc_eta: f64) -> PhotonAreas {
    let abs_eta = sc_eta.abs();
    let mut areas = PHOTON_AREA_TABLE[0].1;
    for &(lower, row) in &PHOTON_AREA_TABLE {
        if abs_eta >= lower {
            areas = row;
        } else {
            break;
        }
    }
    areas
}

/// Look up the electron effective area for a supercluster pseudorapidity.
///
/// Returns `None` at |η| >= 2.5, where the loose electron ID rejects the
/// object outright.
pub fn electron_area(sc_eta: f64) -> Option<f64> {
    let abs_eta = sc_eta.abs();
    if abs_eta >= 2.5 {
        return None;
    }
    ELECTRON_AREA_TABLE
        .iter()
        .find(|&&(upper, _)| abs_eta <= upper)
        .map(|&(_, area)| area)
}
