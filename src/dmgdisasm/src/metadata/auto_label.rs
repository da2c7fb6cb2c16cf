/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_set::BTreeSet;
use alloc::format;
use alloc::string::String;

use crate::addresses::{Addr, Bank};

use super::{LabelScope, ReferenceKind};

/// A synthesized label. It has no name of its own until export: it only
/// accumulates provenance, and the name is derived from the highest-precedence
/// reference kind plus bank and address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoLabel {
    /// `(source address, kind)` pairs. A `None` source is a reference with no
    /// known origin, e.g. an entry point forced by an annotation.
    references: BTreeSet<(Option<Addr>, ReferenceKind)>,
    forced_global: bool,
}

impl AutoLabel {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            references: BTreeSet::new(),
            forced_global: false,
        }
    }

    /// Records one reference. Forcing to global scope is irreversible; it
    /// happens the instant a `call` reference or a source-less reference
    /// arrives.
    pub(crate) fn add_reference(&mut self, source: Option<Addr>, kind: ReferenceKind) {
        if kind.forces_global() || source.is_none() {
            self.forced_global = true;
        }
        self.references.insert((source, kind));
    }

    pub(crate) fn force_global(&mut self) {
        self.forced_global = true;
    }

    #[must_use]
    pub const fn is_forced_global(&self) -> bool {
        self.forced_global
    }

    #[must_use]
    pub fn scope(&self) -> LabelScope {
        if self.forced_global {
            LabelScope::Global
        } else {
            LabelScope::Local
        }
    }

    /// Highest-precedence kind seen so far. An AutoLabel always has at least
    /// one reference by construction, but an empty one renders as plain data.
    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        self.references
            .iter()
            .map(|(_, kind)| *kind)
            .min()
            .unwrap_or(ReferenceKind::Data)
    }

    pub fn sources(&self) -> impl Iterator<Item = Option<Addr>> + '_ {
        self.references.iter().map(|(source, _)| *source)
    }

    /// Inclusive address span covered by this label and everything that
    /// references it. The localizer walks this to decide scope.
    #[must_use]
    pub fn span(&self, own_addr: Addr) -> (Addr, Addr) {
        let mut lo = own_addr;
        let mut hi = own_addr;
        for source in self.sources().flatten() {
            if source < lo {
                lo = source;
            }
            if source > hi {
                hi = source;
            }
        }
        (lo, hi)
    }

    /// The exported name. Deferred until now so precedence and scope are
    /// final.
    #[must_use]
    pub fn render(&self, bank: Bank, addr: Addr) -> String {
        let prefix = self.kind().prefix();
        match self.scope() {
            LabelScope::Global => format!("{}_{}_{:04x}", prefix, bank, addr.inner()),
            LabelScope::Local => format!(".{}_{}_{:04x}", prefix, bank, addr.inner()),
        }
    }
}
