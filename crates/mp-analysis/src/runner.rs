//! Sequential event-loop driver.

use std::time::Instant;

use mp_core::{EventSource, Result, RunConfig};

use crate::accumulator::RegionAccumulator;
use crate::artifact::HistogramArtifact;

/// Number of progress checkpoints logged over one run (every 5%).
const PROGRESS_CHECKPOINTS: u64 = 20;

/// Drives event selection and accumulation over an event source.
///
/// Events are processed strictly one at a time, each to completion
/// (every region evaluated, every applicable fill done) before the next
/// is read. Parallelism happens outside, by running independent
/// instances over disjoint input partitions and combining their
/// artifacts afterwards.
pub struct Histogrammer {
    config: RunConfig,
    subsample: Option<String>,
    accumulator: RegionAccumulator,
}

impl Histogrammer {
    /// Create a histogrammer and book all region histograms.
    pub fn new(config: RunConfig) -> Self {
        tracing::info!(is_data = config.is_data, "histogrammer ready");
        let accumulator = RegionAccumulator::new(config.clone());
        Self { config, subsample: None, accumulator }
    }

    /// Tag the output artifact with a subsample name.
    pub fn subsample(mut self, name: impl Into<String>) -> Self {
        self.subsample = Some(name.into());
        self
    }

    /// Run the event loop, honoring `max_events` from the config.
    pub fn run<S: EventSource>(&mut self, source: &S) -> Result<()> {
        let total = source.len();
        let limit = if self.config.max_events > 0 {
            total.min(self.config.max_events as usize)
        } else {
            total
        };

        let print_every = ((limit as u64).div_ceil(PROGRESS_CHECKPOINTS)).max(1);
        let started = Instant::now();
        for i in 0..limit {
            if i as u64 % print_every == 0 {
                tracing::info!(event = i + 1, total = limit, "processing");
            }
            let event = source.event(i)?;
            self.accumulator.process(&event);
        }

        let elapsed = started.elapsed().as_secs_f64();
        let processed = self.accumulator.events_processed();
        let rate = if elapsed > 0.0 { processed as f64 / elapsed } else { 0.0 };
        tracing::info!(events = processed, elapsed_s = elapsed, rate_hz = rate, "event loop done");
        Ok(())
    }

    /// Events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.accumulator.events_processed()
    }

    /// Finish the run and export the histogram artifact.
    pub fn finish(self) -> HistogramArtifact {
        HistogramArtifact {
            subsample: self.subsample,
            is_data: self.config.is_data,
            events_processed: self.accumulator.events_processed(),
            regions: self.accumulator.into_regions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sr_event;
    use mp_core::VecEventSource;

    #[test]
    fn two_event_stream_end_to_end() {
        // one event passing the signal region, one failing everything
        let passing = sr_event();
        let mut failing = sr_event();
        failing.hlt_pho = 0;
        failing.pf_met = 20.0;
        let source = VecEventSource::new(vec![passing, failing]);

        let mut histogrammer = Histogrammer::new(RunConfig::default()).subsample("test");
        histogrammer.run(&source).unwrap();
        let artifact = histogrammer.finish();

        // processed counter counts both events, pass or fail
        assert_eq!(artifact.events_processed, 2);
        assert_eq!(artifact.subsample.as_deref(), Some("test"));

        // exactly one weighted fill in every SR histogram, zero elsewhere
        for hist in artifact.regions["sr"].values() {
            assert_eq!(hist.entries, 1, "{}", hist.name);
        }
        for region in ["trigger_numerator", "trigger_denominator", "cr_electronfakes", "cr_jetfakes"]
        {
            for hist in artifact.regions[region].values() {
                assert_eq!(hist.entries, 0, "{}", hist.name);
            }
        }
    }

    #[test]
    fn max_events_limits_the_loop() {
        let source = VecEventSource::new(vec![sr_event(), sr_event(), sr_event()]);
        let mut config = RunConfig::default();
        config.max_events = 2;
        let mut histogrammer = Histogrammer::new(config);
        histogrammer.run(&source).unwrap();
        assert_eq!(histogrammer.events_processed(), 2);

        // -1 means unlimited
        let mut histogrammer = Histogrammer::new(RunConfig::default());
        histogrammer.run(&source).unwrap();
        assert_eq!(histogrammer.events_processed(), 3);
    }

    #[test]
    fn empty_source_is_fine() {
        let source = VecEventSource::new(Vec::new());
        let mut histogrammer = Histogrammer::new(RunConfig::default());
        histogrammer.run(&source).unwrap();
        assert_eq!(histogrammer.finish().events_processed, 0);
    }
}
