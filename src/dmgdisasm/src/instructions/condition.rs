/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// Condition code of a conditional `jr`/`jp`/`call`/`ret`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Condition {
    Nz,
    Z,
    Nc,
    C,
}

impl Condition {
    /// The two condition bits as they appear in the opcode (bits 3 and 4).
    #[must_use]
    pub const fn encoding_bits(self) -> u8 {
        match self {
            Condition::Nz => 0b00,
            Condition::Z => 0b01,
            Condition::Nc => 0b10,
            Condition::C => 0b11,
        }
    }

    #[must_use]
    pub const fn from_encoding_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Condition::Nz,
            0b01 => Condition::Z,
            0b10 => Condition::Nc,
            _ => Condition::C,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Condition::Nz => "NZ",
            Condition::Z => "Z",
            Condition::Nc => "NC",
            Condition::C => "C",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
