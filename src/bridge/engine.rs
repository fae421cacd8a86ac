//! Engine boundary.
//!
//! The execution engine itself lives outside this crate. Anything that can
//! reset, advance one unit, and report its registers can sit behind a
//! `StateBridge`.

use thiserror::Error;

use super::snapshot::Snapshot;

/// Reasons an engine refuses to advance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineFault {
    /// Engine reached a state it cannot execute past.
    #[error("engine halted at PC 0x{pc:04X}")]
    Halted {
        /// Program counter where execution stopped.
        pc: u16,
    },

    /// Opcode could not be executed.
    #[error("invalid opcode 0x{opcode:02X} at PC 0x{pc:04X}")]
    InvalidOpcode {
        /// Offending opcode byte.
        opcode: u8,
        /// Program counter of the opcode.
        pc: u16,
    },

    /// Engine state is unusable (not loaded, corrupted, ...).
    #[error("engine unavailable: {reason}")]
    Unavailable {
        /// Human-readable explanation.
        reason: String,
    },
}

/// Stateful execution engine.
///
/// Implementations own their live state. The bridge never copies or frees it;
/// it only calls these three methods.
pub trait Engine {
    /// Put the engine back in its defined starting state.
    ///
    /// Must be safe to call any number of times.
    fn reset(&mut self);

    /// Execute exactly one unit (instruction or cycle, engine-defined).
    fn step(&mut self) -> Result<(), EngineFault>;

    /// Copy out the current registers without advancing.
    fn registers(&self) -> Snapshot;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn step(&mut self) -> Result<(), EngineFault> {
        (**self).step()
    }

    fn registers(&self) -> Snapshot {
        (**self).registers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        let halted = EngineFault::Halted { pc: 0x1A };
        assert_eq!(halted.to_string(), "engine halted at PC 0x001A");

        let bad = EngineFault::InvalidOpcode { opcode: 0xED, pc: 0x0100 };
        assert_eq!(bad.to_string(), "invalid opcode 0xED at PC 0x0100");
    }
}
