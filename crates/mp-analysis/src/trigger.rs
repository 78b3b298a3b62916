//! Photon-trigger bitmask decoding.
//!
//! The ntuple producer packs every photon HLT path decision into one
//! integer; each named path owns a reserved bit position. Decoding is
//! stateless and cannot fail for well-formed integers.

/// Photon HLT paths and their reserved bit positions in the trigger word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum PhotonTrigger {
    Photon22 = 0,
    Photon30 = 1,
    Photon36 = 2,
    Photon50 = 3,
    Photon75 = 4,
    Photon90 = 5,
    Photon120 = 6,
    Photon175 = 7,
    Photon250NoHe = 8,
    Photon300NoHe = 9,
    Photon500 = 10,
    Photon600 = 11,
    Photon165He10 = 12,
    Photon42AndPhoton25Mass15 = 13,
    Diphoton30_18Mass90 = 14,
    Diphoton30_18PixelSeedMatchMass70 = 15,
    Diphoton30Pv18PvPixelVetoMass55 = 16,
    Diphoton30Eb18EbPixelVetoMass55 = 17,
    Photon135Pfmet100 = 18,
    Photon120EbOnlyPfmet40 = 19,
    Photon22EbOnlyVbf = 20,
    Photon90Pfht600 = 21,
    DoublePhoton60 = 22,
    DoublePhoton85 = 23,
    Photon22IsoM = 24,
    Photon50IsoM = 25,
    Photon75IsoM = 26,
    Photon90IsoM = 27,
    Photon120IsoM = 28,
    Photon165IsoM = 29,
    EcalHt800 = 30,
}

/// Triggers the analysis selects on.
pub const SIGNAL_TRIGGERS: [PhotonTrigger; 7] = [
    PhotonTrigger::Photon175,
    PhotonTrigger::Photon250NoHe,
    PhotonTrigger::Photon300NoHe,
    PhotonTrigger::Photon500,
    PhotonTrigger::Photon600,
    PhotonTrigger::Photon165He10,
    PhotonTrigger::DoublePhoton60,
];

/// Lower-threshold backup/monitoring paths, used as an unbiased reference
/// for the trigger-efficiency measurement.
pub const BACKUP_TRIGGERS: [PhotonTrigger; 3] =
    [PhotonTrigger::Photon75, PhotonTrigger::Photon90, PhotonTrigger::Photon120];

/// Did the given path fire in this trigger word?
pub fn fired(hlt_pho: u64, trigger: PhotonTrigger) -> bool {
    (hlt_pho >> trigger as u8) & 1 == 1
}

/// Did any of the given paths fire?
pub fn any_fired(hlt_pho: u64, triggers: &[PhotonTrigger]) -> bool {
    triggers.iter().any(|&t| fired(hlt_pho, t))
}

/// OR of the signal paths.
pub fn signal_triggers_fired(hlt_pho: u64) -> bool {
    any_fired(hlt_pho, &SIGNAL_TRIGGERS)
}

/// OR of the backup paths.
pub fn backup_triggers_fired(hlt_pho: u64) -> bool {
    any_fired(hlt_pho, &BACKUP_TRIGGERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bit_decoding() {
        assert!(fired(0b1, PhotonTrigger::Photon22));
        assert!(!fired(0b1, PhotonTrigger::Photon30));
        assert!(fired(1 << 7, PhotonTrigger::Photon175));
        assert!(fired(1 << 30, PhotonTrigger::EcalHt800));
    }

    #[test]
    fn or_group_decoding() {
        // group {Photon22, Photon50} (bits 0 and 3) against 0b1000
        assert!(any_fired(0b1000, &[PhotonTrigger::Photon22, PhotonTrigger::Photon50]));
        assert!(!any_fired(0b0100, &[PhotonTrigger::Photon22, PhotonTrigger::Photon50]));
    }

    #[test]
    fn signal_and_backup_groups_are_disjoint() {
        for t in SIGNAL_TRIGGERS {
            assert!(!BACKUP_TRIGGERS.contains(&t));
        }
        assert!(signal_triggers_fired(1 << 7));
        assert!(!backup_triggers_fired(1 << 7));
        assert!(backup_triggers_fired(1 << 4));
        assert!(!signal_triggers_fired(1 << 4));
    }

    #[test]
    fn empty_word_fires_nothing() {
        assert!(!signal_triggers_fired(0));
        assert!(!backup_triggers_fired(0));
    }
}
