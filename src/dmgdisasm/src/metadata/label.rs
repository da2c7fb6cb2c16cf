/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;

use super::AutoLabel;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum LabelScope {
    Global,
    Local,
}

/// What a region knows about one labelled address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSlot {
    /// A user-supplied name. Always global unless it starts with a dot.
    Named(Arc<str>),
    Auto(AutoLabel),
    /// The byte is the tail of an instruction; no label may ever land here.
    Suppressed,
}

impl LabelSlot {
    #[must_use]
    pub const fn as_auto(&self) -> Option<&AutoLabel> {
        match self {
            LabelSlot::Auto(label) => Some(label),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_scoped_name(&self) -> bool {
        match self {
            LabelSlot::Named(name) => name.starts_with('.'),
            LabelSlot::Auto(_) | LabelSlot::Suppressed => false,
        }
    }

    /// Whether this label interrupts the span of a would-be local AutoLabel.
    #[must_use]
    pub fn breaks_local_span(&self) -> bool {
        match self {
            LabelSlot::Named(_) => !self.is_scoped_name(),
            LabelSlot::Auto(label) => label.is_forced_global(),
            LabelSlot::Suppressed => false,
        }
    }
}
