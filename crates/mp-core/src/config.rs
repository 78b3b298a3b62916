//! Run configuration for the histogrammer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for one histogramming run.
///
/// All fields have defaults, so `{}` is a valid config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// True when running over real data, false for simulation. Selection
    /// logic is identical either way; the flag only controls whether
    /// generator-level quantities are meaningful downstream.
    #[serde(default = "default_is_data")]
    pub is_data: bool,

    /// Limit on processed events (-1 = unlimited).
    #[serde(default = "default_max_events")]
    pub max_events: i64,

    /// Fill weight for the electron-fake control region.
    #[serde(default = "default_electron_fake_rate")]
    pub electron_fake_rate: f64,

    /// Intercept of the jet-fake (QCD) control-region weight,
    /// `w = intercept + slope * photon_pt`.
    #[serde(default = "default_jet_fake_rate_intercept")]
    pub jet_fake_rate_intercept: f64,

    /// Slope of the jet-fake (QCD) control-region weight.
    #[serde(default = "default_jet_fake_rate_slope")]
    pub jet_fake_rate_slope: f64,

    /// Integrated luminosity in pb^-1, used when combining MC subsamples.
    #[serde(default = "default_luminosity_pb")]
    pub luminosity_pb: f64,
}

fn default_is_data() -> bool {
    true
}

fn default_max_events() -> i64 {
    -1
}

fn default_electron_fake_rate() -> f64 {
    0.0184
}

fn default_jet_fake_rate_intercept() -> f64 {
    0.079
}

fn default_jet_fake_rate_slope() -> f64 {
    0.00014
}

fn default_luminosity_pb() -> f64 {
    2260.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            is_data: default_is_data(),
            max_events: default_max_events(),
            electron_fake_rate: default_electron_fake_rate(),
            jet_fake_rate_intercept: default_jet_fake_rate_intercept(),
            jet_fake_rate_slope: default_jet_fake_rate_slope(),
            luminosity_pb: default_luminosity_pb(),
        }
    }
}

impl RunConfig {
    /// Read a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let cfg: RunConfig = serde_json::from_slice(&bytes)?;
        Ok(cfg)
    }
}
