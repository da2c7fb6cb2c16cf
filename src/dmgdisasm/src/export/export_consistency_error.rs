/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::addresses::{Addr, Size};
use crate::memory::RegionId;

/// A block's declared size disagrees with the bytes actually claimed for it.
///
/// This means the ownership invariant was violated somewhere; it is raised at
/// export time and never swallowed, since rendering through it would emit a
/// disassembly that cannot reassemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConsistencyError {
    pub region: RegionId,
    pub base_address: Addr,
    pub declared: Size,
    pub claimed: Size,
}

impl fmt::Display for ExportConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block at {} declares {} bytes but owns {}",
            self.base_address, self.declared, self.claimed
        )
    }
}

impl core::error::Error for ExportConsistencyError {}
