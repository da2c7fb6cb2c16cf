/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

use crate::addresses::Addr;

/// The bytes at an address do not decode to a defined instruction.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum DecodeError {
    /// One of the 11 primary opcodes the CPU leaves undefined.
    UndefinedOpcode { addr: Addr, opcode: u8 },
    /// The instruction needs more operand bytes than the window holds.
    TruncatedWindow { addr: Addr, opcode: u8 },
}

impl DecodeError {
    #[must_use]
    pub const fn addr(&self) -> Addr {
        match self {
            DecodeError::UndefinedOpcode { addr, .. } => *addr,
            DecodeError::TruncatedWindow { addr, .. } => *addr,
        }
    }

    #[must_use]
    pub const fn opcode(&self) -> u8 {
        match self {
            DecodeError::UndefinedOpcode { opcode, .. } => *opcode,
            DecodeError::TruncatedWindow { opcode, .. } => *opcode,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UndefinedOpcode { addr, opcode } => {
                write!(f, "Undefined opcode 0x{:02X} at {}", opcode, addr)
            }
            DecodeError::TruncatedWindow { addr, opcode } => {
                write!(
                    f,
                    "Opcode 0x{:02X} at {} runs past the end of its region",
                    opcode, addr
                )
            }
        }
    }
}

impl error::Error for DecodeError {}
