//! # mp-analysis
//!
//! Event selection and histogram accumulation for the monophoton search:
//! photon/electron/muon identification, trigger decoding, the signal and
//! control region predicates, and per-region weighted histograms.
//!
//! ## Example
//!
//! ```no_run
//! use mp_analysis::Histogrammer;
//! use mp_core::{JsonlEventSource, RunConfig};
//!
//! let source = JsonlEventSource::open(&["events.jsonl"]).unwrap();
//! let mut histogrammer = Histogrammer::new(RunConfig::default()).subsample("Data_2015D");
//! histogrammer.run(&source).unwrap();
//! let artifact = histogrammer.finish();
//! println!("processed {} events", artifact.events_processed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod artifact;
pub mod effective_area;
pub mod electron_id;
pub mod histogram;
pub mod muon_id;
pub mod photon_id;
pub mod runner;
pub mod selection;
#[cfg(test)]
mod testutil;
pub mod trigger;

pub use accumulator::{RegionAccumulator, RegionHistograms};
pub use artifact::HistogramArtifact;
pub use effective_area::{electron_area, photon_areas, PhotonAreas};
pub use electron_id::{electron_id_loose, electron_rel_iso};
pub use histogram::Histogram;
pub use muon_id::{muon_id_loose, muon_rel_iso, MUON_LOOSE_ISO_CUT};
pub use photon_id::{corrected_isolation, passes_isolation, IsolationWp, PhotonId};
pub use runner::Histogrammer;
pub use selection::{candidate_photon, wrap_dphi, RegionKind, SelectionOutcome};
pub use trigger::{
    any_fired, backup_triggers_fired, fired, signal_triggers_fired, PhotonTrigger,
    BACKUP_TRIGGERS, SIGNAL_TRIGGERS,
};
