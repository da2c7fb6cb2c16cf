/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use super::DataFormat;

/// The interpretation of a claimed byte range. A closed set: exporters match
/// on it to pick a rendering, the engine only ever creates `Code` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlockKind {
    Code,
    Data(DataFormat),
    JumpTable,
    IoRegister,
}

impl BlockKind {
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self, BlockKind::Code)
    }
}
