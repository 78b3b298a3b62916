//! # mp-core
//!
//! Core types for the monophoton analysis: the event data model, event
//! sources, run configuration, and the shared error type.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod source;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use event::{ElectronCols, Event, JetCols, MuonCols, PhotonCols};
pub use source::{EventSource, JsonlEventSource, VecEventSource};
