/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::addresses::Addr;
use crate::instructions::DecodeError;
use crate::memory::RegionId;

/// One non-fatal finding of the exploration pass.
///
/// Every variant aborts exactly one chain; the rest of the worklist keeps
/// running. A partially explored image with diagnostics is a valid,
/// inspectable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The bytes at the chain's current address do not decode.
    InvalidInstruction {
        region: RegionId,
        error: DecodeError,
    },
    /// Growing the chain's block would claim bytes another block already
    /// owns.
    InstructionOverlap { region: RegionId, addr: Addr },
    /// A branch lands in the switchable window but no active bank is known,
    /// so the reference was dropped.
    UnresolvedBankTarget {
        region: RegionId,
        source: Addr,
        target: Addr,
    },
}

impl Diagnostic {
    #[must_use]
    pub const fn region(&self) -> RegionId {
        match self {
            Diagnostic::InvalidInstruction { region, .. }
            | Diagnostic::InstructionOverlap { region, .. }
            | Diagnostic::UnresolvedBankTarget { region, .. } => *region,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidInstruction { error, .. } => {
                write!(f, "chain aborted: {}", error)
            }
            Diagnostic::InstructionOverlap { addr, .. } => {
                write!(
                    f,
                    "chain aborted: instruction at {} would overlap an existing block",
                    addr
                )
            }
            Diagnostic::UnresolvedBankTarget { source, target, .. } => {
                write!(
                    f,
                    "reference from {} to banked address {} dropped: active bank unknown",
                    source, target
                )
            }
        }
    }
}
