/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// How an address got referenced. Declaration order is display precedence:
/// an address that is both `call`ed and `jr`ed to renders with the `call`
/// prefix, no matter the insertion order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferenceKind {
    Call,
    Rst,
    Jp,
    Jr,
    Data,
}

impl ReferenceKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            ReferenceKind::Call => "call",
            ReferenceKind::Rst => "rst",
            ReferenceKind::Jp => "jp",
            ReferenceKind::Jr => "jr",
            ReferenceKind::Data => "data",
        }
    }

    /// A `call` reference makes the referenced address a subroutine entry,
    /// which must stay globally nameable.
    #[must_use]
    pub const fn forces_global(self) -> bool {
        matches!(self, ReferenceKind::Call)
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
