/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::addresses::{Addr, Size};

use super::BlockKind;

/// Index of a [`Block`] inside its region's arena. Blocks never move and are
/// never destroyed, so an id stays valid for the whole run.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockId {
    inner: usize,
}

impl BlockId {
    pub(crate) const fn new(value: usize) -> Self {
        Self { inner: value }
    }

    pub(crate) const fn index(&self) -> usize {
        self.inner
    }
}

/// A contiguous claimed byte range inside exactly one region.
///
/// Created zero-sized the moment exploration first touches an unclaimed byte
/// and only ever grows forward. The actual slot bookkeeping lives on the
/// owning region, which is the only way the growth protocol can check the
/// "no byte claimed twice" invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    base_address: Addr,
    size: Size,
}

impl Block {
    pub(crate) const fn new(kind: BlockKind, base_address: Addr) -> Self {
        Self {
            kind,
            base_address,
            size: Size::new(0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &BlockKind {
        &self.kind
    }

    #[must_use]
    pub const fn base_address(&self) -> Addr {
        self.base_address
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn contains(&self, addr: Addr) -> bool {
        // Plain integer arithmetic: a one-byte block at 0xFFFF would overflow
        // an exclusive-end Addr.
        addr >= self.base_address
            && (addr.inner() as u32)
                < self.base_address.inner() as u32 + self.size.inner() as u32
    }

    pub(crate) fn set_size(&mut self, new_size: Size) {
        debug_assert!(new_size >= self.size);
        self.size = new_size;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} block at {} ({} bytes)",
            self.kind,
            self.base_address,
            self.size.inner()
        )
    }
}
