//! Sample manifests and cross-section tables.
//!
//! A manifest names the top-level samples (the processes that appear in
//! plot legends) and the subsamples they are split into (HT-binned MC,
//! data periods, condor subjobs), together with each subsample's input
//! files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One top-level sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSpec {
    /// True for real-data samples.
    #[serde(default)]
    pub is_data: bool,
    /// Subsample name → input event files (JSONL).
    pub subsamples: BTreeMap<String, Vec<PathBuf>>,
}

/// Manifest of all samples known to the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleManifest {
    /// Sample name → spec.
    pub samples: BTreeMap<String, SampleSpec>,
}

impl SampleManifest {
    /// Read a manifest from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let manifest: SampleManifest = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Find the subsample with the given name, returning its owning
    /// sample spec and file list.
    pub fn subsample(&self, name: &str) -> Result<(&SampleSpec, &[PathBuf])> {
        for spec in self.samples.values() {
            if let Some(files) = spec.subsamples.get(name) {
                return Ok((spec, files));
            }
        }
        bail!("subsample '{name}' not found in manifest");
    }
}

/// Load a cross-section table.
///
/// Plain-text format: `#` starts a comment line; data lines are
/// whitespace-separated with the subsample name in the first column and
/// the cross section (pb) in the fifth.
pub fn load_cross_sections(path: &Path) -> Result<BTreeMap<String, f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading cross sections {}", path.display()))?;
    let mut table = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            bail!("{}:{}: expected at least 5 columns", path.display(), lineno + 1);
        }
        let xs: f64 = cols[4]
            .parse()
            .with_context(|| format!("{}:{}: bad cross section", path.display(), lineno + 1))?;
        table.insert(cols[0].to_string(), xs);
    }
    Ok(table)
}
