/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;
use alloc::vec::Vec;

use super::memory::BANK_SIZE;

/// The raw ROM image. Shared read-only with every ROM bank region.
#[derive(Debug, Clone)]
pub struct RomImage {
    data: Arc<[u8]>,
}

impl RomImage {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }

    #[must_use]
    pub(crate) fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of 0x4000-byte banks, rounding a short tail up.
    #[must_use]
    pub fn bank_count(&self) -> usize {
        self.data.len().div_ceil(BANK_SIZE)
    }

    /// Unused space in shipped ROMs is padded with one of these.
    #[must_use]
    pub const fn is_fill_byte(byte: u8) -> bool {
        byte == 0x00 || byte == 0xFF
    }
}
