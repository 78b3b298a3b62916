//! Monophoton analysis CLI.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use mp_analysis::{Histogrammer, HistogramArtifact};
use mp_core::{EventSource, JsonlEventSource, RunConfig};

mod combine;
mod samples;

use samples::SampleManifest;

#[derive(Parser)]
#[command(name = "monophoton")]
#[command(about = "Monophoton search - event selection and histogramming")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run selection and histogramming over input events
    Run {
        /// Input event files (JSONL), chained in order
        #[arg(short, long, num_args = 1.., conflicts_with = "manifest")]
        inputs: Vec<PathBuf>,

        /// Sample manifest (JSON); selects inputs for --subsample
        #[arg(long, requires = "subsample")]
        manifest: Option<PathBuf>,

        /// Subsample name: selects manifest inputs and tags the output
        #[arg(long)]
        subsample: Option<String>,

        /// Run config (JSON). Defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output artifact path (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Limit processed events (-1 = unlimited); overrides the config
        #[arg(long)]
        max_events: Option<i64>,

        /// Treat the input as simulation instead of data
        #[arg(long)]
        mc: bool,
    },

    /// Combine per-subsample artifacts into one sample artifact
    Combine {
        /// Input artifact files (JSON)
        #[arg(short, long, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Cross-section table for luminosity-scaling MC subsamples
        #[arg(long)]
        cross_sections: Option<PathBuf>,

        /// Run config (JSON), read for the target luminosity
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output artifact path (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Run { inputs, manifest, subsample, config, output, max_events, mc } => {
            cmd_run(inputs, manifest, subsample, config, &output, max_events, mc)
        }
        Commands::Combine { inputs, cross_sections, config, output } => {
            cmd_combine(&inputs, cross_sections, config, &output)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            RunConfig::from_path(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => Ok(RunConfig::default()),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn cmd_run(
    inputs: Vec<PathBuf>,
    manifest: Option<PathBuf>,
    subsample: Option<String>,
    config: Option<PathBuf>,
    output: &Path,
    max_events: Option<i64>,
    mc: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(limit) = max_events {
        config.max_events = limit;
    }
    if mc {
        config.is_data = false;
    }

    let files: Vec<PathBuf> = if let Some(manifest_path) = manifest {
        let manifest = SampleManifest::from_path(&manifest_path)?;
        let name = subsample.as_deref().context("--manifest requires --subsample")?;
        let (spec, files) = manifest.subsample(name)?;
        config.is_data = spec.is_data;
        files.to_vec()
    } else if !inputs.is_empty() {
        inputs
    } else {
        bail!("no inputs: pass --inputs or --manifest with --subsample");
    };

    if config.is_data {
        tracing::info!("running over DATA");
    } else {
        tracing::info!("running over MC");
    }

    let source = JsonlEventSource::open(&files)?;
    tracing::info!(files = files.len(), events = source.len(), "inputs loaded");

    let mut histogrammer = Histogrammer::new(config);
    if let Some(name) = subsample {
        histogrammer = histogrammer.subsample(name);
    }
    histogrammer.run(&source)?;
    let artifact = histogrammer.finish();

    ensure_parent_dir(output)?;
    artifact.write_json(output)?;
    tracing::info!(path = %output.display(), "artifact written");
    Ok(())
}

fn cmd_combine(
    inputs: &[PathBuf],
    cross_sections: Option<PathBuf>,
    config: Option<PathBuf>,
    output: &Path,
) -> Result<()> {
    let config = load_config(config)?;
    let cross_sections = match cross_sections {
        Some(path) => samples::load_cross_sections(&path)?,
        None => BTreeMap::new(),
    };

    let mut artifacts = Vec::with_capacity(inputs.len());
    for path in inputs {
        let artifact = HistogramArtifact::read_json(path)
            .with_context(|| format!("reading {}", path.display()))?;
        artifacts.push(artifact);
    }

    let total = combine::combine_artifacts(artifacts, &cross_sections, config.luminosity_pb)?;

    ensure_parent_dir(output)?;
    total.write_json(output)?;
    tracing::info!(path = %output.display(), inputs = inputs.len(), "combined artifact written");
    Ok(())
}
