//! Register snapshots.
//!
//! A `Snapshot` is a plain copy of every register the engine exposes at one
//! instant. Values are raw 16-bit words; how many hex digits a panel shows is
//! the panel's business.

use serde::{Deserialize, Serialize};

/// Z-80 register pairs visible through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Program counter.
    Pc,
    /// Stack pointer.
    Sp,
    Af,
    Bc,
    De,
    Hl,
    Ix,
    Iy,
    /// Alternate accumulator/flags.
    AfPrime,
    BcPrime,
    DePrime,
    HlPrime,
    /// Interrupt vector and refresh.
    Ir,
    /// Interrupt flip-flops.
    Iff,
}

impl Register {
    /// Registers shown by the basic register panel.
    pub const CORE: [Register; 7] = [
        Register::Pc,
        Register::Af,
        Register::Bc,
        Register::De,
        Register::Hl,
        Register::Ix,
        Register::Iy,
    ];

    /// Registers shown by the extended register panel, alternates paired
    /// with their main set.
    pub const EXTENDED: [Register; 12] = [
        Register::Sp,
        Register::Pc,
        Register::Af,
        Register::AfPrime,
        Register::Bc,
        Register::BcPrime,
        Register::De,
        Register::DePrime,
        Register::Hl,
        Register::HlPrime,
        Register::Ix,
        Register::Iy,
    ];

    /// Every register in a snapshot.
    pub const ALL: [Register; 14] = [
        Register::Pc,
        Register::Sp,
        Register::Af,
        Register::Bc,
        Register::De,
        Register::Hl,
        Register::Ix,
        Register::Iy,
        Register::AfPrime,
        Register::BcPrime,
        Register::DePrime,
        Register::HlPrime,
        Register::Ir,
        Register::Iff,
    ];

    /// Conventional assembler name.
    pub fn name(self) -> &'static str {
        match self {
            Register::Pc => "PC",
            Register::Sp => "SP",
            Register::Af => "AF",
            Register::Bc => "BC",
            Register::De => "DE",
            Register::Hl => "HL",
            Register::Ix => "IX",
            Register::Iy => "IY",
            Register::AfPrime => "AF'",
            Register::BcPrime => "BC'",
            Register::DePrime => "DE'",
            Register::HlPrime => "HL'",
            Register::Ir => "IR",
            Register::Iff => "IFF",
        }
    }
}

/// Observable register state at one instant.
///
/// Snapshots are `Copy` values: every call to `registers()` hands out a fresh
/// one, and nothing the engine does afterwards can reach it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    pub pc: u16,
    pub af: u16,
    pub bc: u16,
    pub de: u16,
    pub hl: u16,
    pub ix: u16,
    pub iy: u16,
    pub sp: u16,
    pub af_prime: u16,
    pub bc_prime: u16,
    pub de_prime: u16,
    pub hl_prime: u16,
    pub ir: u16,
    pub iff: u16,
}

impl Snapshot {
    /// Read one register.
    pub fn get(&self, reg: Register) -> u16 {
        match reg {
            Register::Pc => self.pc,
            Register::Sp => self.sp,
            Register::Af => self.af,
            Register::Bc => self.bc,
            Register::De => self.de,
            Register::Hl => self.hl,
            Register::Ix => self.ix,
            Register::Iy => self.iy,
            Register::AfPrime => self.af_prime,
            Register::BcPrime => self.bc_prime,
            Register::DePrime => self.de_prime,
            Register::HlPrime => self.hl_prime,
            Register::Ir => self.ir,
            Register::Iff => self.iff,
        }
    }

    /// Pair each register in `regs` with its value, in order.
    pub fn values<'a>(
        &'a self,
        regs: &'a [Register],
    ) -> impl Iterator<Item = (Register, u16)> + 'a {
        regs.iter().map(move |&r| (r, self.get(r)))
    }

    /// Registers whose value differs between `self` and `other`.
    ///
    /// Panels use this to highlight what the last step touched.
    pub fn changed(&self, other: &Snapshot) -> Vec<Register> {
        Register::ALL
            .iter()
            .copied()
            .filter(|&r| self.get(r) != other.get(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_matches_fields() {
        let snap = Snapshot {
            pc: 0x0100,
            af: 0x12FF,
            hl_prime: 0xBEEF,
            iff: 1,
            ..Default::default()
        };
        assert_eq!(snap.get(Register::Pc), 0x0100);
        assert_eq!(snap.get(Register::Af), 0x12FF);
        assert_eq!(snap.get(Register::HlPrime), 0xBEEF);
        assert_eq!(snap.get(Register::Iff), 1);
        assert_eq!(snap.get(Register::Sp), 0);
    }

    #[test]
    fn test_panel_register_sets() {
        assert_eq!(Register::CORE[0], Register::Pc);
        assert!(Register::EXTENDED.contains(&Register::Sp));
        assert!(!Register::CORE.contains(&Register::Sp));
        for reg in Register::EXTENDED {
            assert!(Register::ALL.contains(&reg));
        }
    }

    #[test]
    fn test_values_preserve_order() {
        let snap = Snapshot { pc: 1, af: 2, bc: 3, ..Default::default() };
        let names: Vec<_> = snap
            .values(&Register::CORE)
            .map(|(r, v)| (r.name(), v))
            .take(3)
            .collect();
        assert_eq!(names, vec![("PC", 1), ("AF", 2), ("BC", 3)]);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Snapshot { pc: 5, ..Default::default() };
        let mut copy = original;
        copy.pc = 6;
        assert_eq!(original.pc, 5);
        assert_eq!(copy.changed(&original), vec![Register::Pc]);
    }

    #[test]
    fn test_partial_trace_frame_parses() {
        let snap: Snapshot = toml::from_str("pc = 3\nde_prime = 0x4000").unwrap();
        assert_eq!(snap.pc, 3);
        assert_eq!(snap.de_prime, 0x4000);
        assert_eq!(snap.af, 0);
    }

    #[test]
    fn test_misspelled_register_rejected() {
        assert!(toml::from_str::<Snapshot>("pc = 3\nhl_prim = 1").is_err());
    }
}
