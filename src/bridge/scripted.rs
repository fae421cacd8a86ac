//! Replay engine.
//!
//! `ScriptedEngine` walks through a recorded register trace, one frame per
//! step. It is deterministic by construction, which makes it the engine of
//! choice for tests and for the headless front-end when no live engine is
//! attached.
//!
//! # Trace Format
//!
//! ```toml
//! [initial]
//! sp = 0xFFFF
//!
//! [[frames]]
//! pc = 1
//!
//! [[frames]]
//! pc = 3
//! af = 0x4200
//! ```
//!
//! Registers left out of a table are zero. Unknown keys and tables are
//! rejected.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::engine::{Engine, EngineFault};
use super::snapshot::Snapshot;

/// Errors loading a register trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Trace file could not be read.
    #[error("failed to read trace {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Trace text is not valid TOML or has the wrong shape.
    #[error("invalid trace: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Trace {
    #[serde(default)]
    initial: Snapshot,
    #[serde(default)]
    frames: Vec<Snapshot>,
}

/// Engine replaying a fixed list of register frames.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    /// State after reset.
    initial: Snapshot,
    /// State after each successive step.
    frames: Vec<Snapshot>,
    /// Number of frames consumed since reset.
    cursor: usize,
}

impl ScriptedEngine {
    /// Create an engine from an initial state and the frames that follow it.
    pub fn new(initial: Snapshot, frames: Vec<Snapshot>) -> Self {
        Self {
            initial,
            frames,
            cursor: 0,
        }
    }

    /// Parse a TOML trace.
    pub fn from_toml(text: &str) -> Result<Self, TraceError> {
        let trace: Trace = toml::from_str(text)?;
        Ok(Self::new(trace.initial, trace.frames))
    }

    /// Load a TOML trace from disk.
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let text = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let engine = Self::from_toml(&text)?;
        log::info!("Loaded {} frames from {}", engine.frames.len(), path.display());
        Ok(engine)
    }

    /// Total number of steps the trace can take.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if the trace has no frames beyond its initial state.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Steps left before the engine halts.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }

    fn current(&self) -> &Snapshot {
        match self.cursor {
            0 => &self.initial,
            n => &self.frames[n - 1],
        }
    }
}

impl Engine for ScriptedEngine {
    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn step(&mut self) -> Result<(), EngineFault> {
        if self.cursor >= self.frames.len() {
            return Err(EngineFault::Halted {
                pc: self.current().pc,
            });
        }
        self.cursor += 1;
        Ok(())
    }

    fn registers(&self) -> Snapshot {
        *self.current()
    }
}
