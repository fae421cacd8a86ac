//! Register snapshots of an external Z-80 engine.
//!
//! The engine itself (MUZ computer, YAZE core, or anything else) is behind the
//! [`Engine`] trait. This module provides:
//! - `Snapshot`: an immutable copy of the registers at one instant
//! - `StateBridge`: start/step/registers for display panels, plus `run` and
//!   PC breakpoints
//! - `ScriptedEngine`: a replay engine driven by a recorded trace
//!
//! # Example
//!
//! ```ignore
//! use muz_workshop::bridge::{ScriptedEngine, StateBridge};
//!
//! let engine = ScriptedEngine::load(path)?;
//! let mut bridge = StateBridge::exclusive(engine);
//! bridge.start();
//! bridge.step()?;
//! let regs = bridge.registers();
//! println!("PC={:04X}", regs.pc);
//! ```

pub mod engine;
pub mod scripted;
pub mod snapshot;
pub mod state;

pub use engine::{Engine, EngineFault};
pub use scripted::{ScriptedEngine, TraceError};
pub use snapshot::{Register, Snapshot};
pub use state::{share, BridgeStatus, SharedEngine, StateBridge};
