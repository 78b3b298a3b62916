//! Event sources: the positional-accessor seam between tuple storage and
//! the selection core.
//!
//! The analysis only needs an ordered, index-addressable sequence of
//! [`Event`] records; where those records come from (and how files are
//! discovered, opened, or chained) stays behind this trait.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::event::Event;

/// Ordered sequence of events, iterable by index.
pub trait EventSource {
    /// Number of events available.
    fn len(&self) -> usize;

    /// True when the source holds no events.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the event at index `i` (`0..len()`).
    fn event(&self, i: usize) -> Result<Event>;
}

/// In-memory event source, used by tests and synthetic-event studies.
#[derive(Debug, Clone, Default)]
pub struct VecEventSource {
    events: Vec<Event>,
}

impl VecEventSource {
    /// Wrap a vector of events.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl EventSource for VecEventSource {
    fn len(&self) -> usize {
        self.events.len()
    }

    fn event(&self, i: usize) -> Result<Event> {
        self.events
            .get(i)
            .cloned()
            .ok_or_else(|| Error::Input(format!("event index {i} out of range")))
    }
}

/// Event source backed by JSON-lines files (one event object per line).
///
/// Multiple input files are chained in the order given, so a subsample
/// split across files reads as one contiguous sequence. Records are
/// parsed and validated eagerly; a ragged or malformed record fails the
/// whole open rather than a later event lookup.
#[derive(Debug)]
pub struct JsonlEventSource {
    events: Vec<Event>,
}

impl JsonlEventSource {
    /// Open and chain one or more JSONL files.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut events = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let file = File::open(path)?;
            for (lineno, line) in BufReader::new(file).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let event: Event = serde_json::from_str(&line).map_err(|e| {
                    Error::Input(format!(
                        "{}:{}: malformed event record: {e}",
                        path.display(),
                        lineno + 1
                    ))
                })?;
                event.validate().map_err(|e| {
                    Error::Input(format!("{}:{}: {e}", path.display(), lineno + 1))
                })?;
                events.push(event);
            }
        }
        Ok(Self { events })
    }
}

impl EventSource for JsonlEventSource {
    fn len(&self) -> usize {
        self.events.len()
    }

    fn event(&self, i: usize) -> Result<Event> {
        self.events
            .get(i)
            .cloned()
            .ok_or_else(|| Error::Input(format!("event index {i} out of range")))
    }
}
