/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::addresses::Addr;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg8 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Reg8::A => "A",
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reg16 {
    Af,
    Bc,
    De,
    Hl,
    Sp,
}

impl Reg16 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Reg16::Af => "AF",
            Reg16::Bc => "BC",
            Reg16::De => "DE",
            Reg16::Hl => "HL",
            Reg16::Sp => "SP",
        }
    }
}

/// A memory-indirect operand, the `[...]` forms.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemRef {
    Bc,
    De,
    Hl,
    /// `[HL+]`, post-increment.
    HlInc,
    /// `[HL-]`, post-decrement.
    HlDec,
    /// `[$FF00+C]`, the high-page shorthand through the C register.
    HighC,
    /// `[$FF00+n]` from an `ldh` immediate.
    High(u8),
    /// `[$nnnn]` absolute.
    Abs(Addr),
}

impl MemRef {
    /// The absolute address this reference points at, when statically known.
    #[must_use]
    pub const fn target(&self) -> Option<Addr> {
        match self {
            MemRef::Abs(addr) => Some(*addr),
            MemRef::High(n) => Some(Addr::new(0xFF00 | *n as u16)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operand {
    Reg8(Reg8),
    Reg16(Reg16),
    Imm8(u8),
    Imm16(u16),
    /// Signed 8-bit immediate (`add sp, e`).
    Simm8(i8),
    /// `SP+e` of `ld hl, sp+e`.
    SpPlus(i8),
    Mem(MemRef),
    /// A branch destination resolved to an absolute address.
    Target(Addr),
    /// Bit index of the secondary page's `bit`/`res`/`set`.
    Bit(u8),
}

impl Operand {
    #[must_use]
    pub const fn mem_target(&self) -> Option<Addr> {
        match self {
            Operand::Mem(mem) => mem.target(),
            _ => None,
        }
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
