/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_map::BTreeMap;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

use crate::addresses::{Addr, Bank, Size};
use crate::blocks::{Block, BlockId, BlockKind};
use crate::metadata::{AutoLabel, LabelSlot, ReferenceKind};

use super::{MarkSet, RegionKind};

/// Index of a region inside its [`AddressSpace`].
///
/// [`AddressSpace`]: super::AddressSpace
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegionId {
    inner: usize,
}

impl RegionId {
    pub(crate) const fn new(value: usize) -> Self {
        Self { inner: value }
    }

    pub(crate) const fn index(&self) -> usize {
        self.inner
    }
}

/// ROM regions share one image; each bank views its own 0x4000-byte slice.
#[derive(Debug, Clone)]
struct RomBacking {
    data: Arc<[u8]>,
    offset: usize,
}

/// One addressable segment: a ROM bank or one of the fixed RAM/IO windows.
///
/// Owns the byte-ownership slots, the block arena, and the sparse label,
/// mark and bank-override maps for its address range. Every mutation of the
/// ownership model funnels through [`MemoryRegion::grow_block`], which is
/// what upholds the no-byte-claimed-twice invariant.
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    kind: RegionKind,
    base_address: Addr,
    size: Size,
    bank: Option<Bank>,
    rom: Option<RomBacking>,

    slots: Vec<Option<BlockId>>,
    blocks: Vec<Block>,
    labels: BTreeMap<Addr, LabelSlot>,
    marks: BTreeMap<Addr, MarkSet>,
    bank_overrides: BTreeMap<Addr, Bank>,
}

pub(crate) const BANK_SIZE: usize = 0x4000;
pub(crate) const SWITCHABLE_BASE: u16 = 0x4000;

impl MemoryRegion {
    pub(crate) fn new_rom_bank(data: Arc<[u8]>, bank: Bank) -> Self {
        let offset = bank.inner() as usize * BANK_SIZE;
        let base_address = if bank.is_fixed() {
            Addr::new(0x0000)
        } else {
            Addr::new(SWITCHABLE_BASE)
        };
        // The image's last bank may be short.
        let size = BANK_SIZE.min(data.len().saturating_sub(offset));

        Self {
            kind: RegionKind::RomBank,
            base_address,
            size: Size::new(size as u16),
            bank: Some(bank),
            rom: Some(RomBacking { data, offset }),
            slots: vec![None; size],
            blocks: Vec::new(),
            labels: BTreeMap::new(),
            marks: BTreeMap::new(),
            bank_overrides: BTreeMap::new(),
        }
    }

    pub(crate) fn new_ram(kind: RegionKind, base_address: Addr, size: Size) -> Self {
        Self {
            kind,
            base_address,
            size,
            bank: None,
            rom: None,
            slots: vec![None; size.as_usize()],
            blocks: Vec::new(),
            labels: BTreeMap::new(),
            marks: BTreeMap::new(),
            bank_overrides: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        self.kind
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
    pub const fn bank(&self) -> Option<Bank> {
        self.bank
    }

    /// Bank number used when rendering labels. Fixed windows report bank 0.
    #[must_use]
    pub fn bank_number(&self) -> Bank {
        self.bank.unwrap_or(Bank::new(0))
    }

    #[must_use]
    pub fn contains(&self, addr: Addr) -> bool {
        addr >= self.base_address
            && (addr.inner() as usize) < self.base_address.inner() as usize + self.size.as_usize()
    }

    fn index_of(&self, addr: Addr) -> usize {
        debug_assert!(self.contains(addr), "{} outside of region {}", addr, self.kind);
        (addr.inner() - self.base_address.inner()) as usize
    }

    /// The backing byte, for ROM regions only.
    #[must_use]
    pub fn byte(&self, addr: Addr) -> Option<u8> {
        let rom = self.rom.as_ref()?;
        if !self.contains(addr) {
            return None;
        }
        rom.data.get(rom.offset + self.index_of(addr)).copied()
    }

    /// Little-endian word at `addr`, for ROM regions only.
    #[must_use]
    pub fn word(&self, addr: Addr) -> Option<u16> {
        let lo = self.byte(addr)?;
        let hi = self.byte(addr.next())?;
        Some(u16::from_le_bytes([lo, hi]))
    }

    /// Window from `addr` to the end of the region. Empty for RAM regions,
    /// which have no concrete content.
    #[must_use]
    pub fn bytes_from(&self, addr: Addr) -> &[u8] {
        match &self.rom {
            Some(rom) if self.contains(addr) => {
                let start = rom.offset + self.index_of(addr);
                let end = rom.offset + self.size.as_usize();
                &rom.data[start..end]
            }
            _ => &[],
        }
    }

    // --- block ownership ---

    #[must_use]
    pub fn block_at(&self, addr: Addr) -> Option<BlockId> {
        if !self.contains(addr) {
            return None;
        }
        self.slots[self.index_of(addr)]
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Creates a zero-sized block. It owns nothing until it grows.
    pub fn create_block(&mut self, kind: BlockKind, base_address: Addr) -> BlockId {
        assert!(
            self.contains(base_address),
            "block base {} outside of region {}",
            base_address,
            self.kind
        );
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(Block::new(kind, base_address));
        id
    }

    /// Grows a block forward to `new_size`, claiming every added byte.
    ///
    /// With `allow_fail` set this is fail-soft: if any byte in the added
    /// range is outside the region or already owned, nothing is mutated and
    /// `false` comes back. Without it, a conflicting claim is a violated
    /// invariant and panics.
    pub fn grow_block(&mut self, id: BlockId, new_size: Size, allow_fail: bool) -> bool {
        let block = &self.blocks[id.index()];
        let old_size = block.size();
        assert!(
            new_size >= old_size,
            "a block only ever grows ({} -> {})",
            old_size,
            new_size
        );
        let base_index = self.index_of(block.base_address());

        if allow_fail {
            for n in old_size.as_usize()..new_size.as_usize() {
                match self.slots.get(base_index + n) {
                    Some(None) => {}
                    // Already owned, or past the end of the region.
                    Some(Some(_)) | None => return false,
                }
            }
        }
        for n in old_size.as_usize()..new_size.as_usize() {
            let slot = &mut self.slots[base_index + n];
            assert!(
                slot.is_none(),
                "byte {} already claimed",
                Addr::new(self.base_address.inner() + (base_index + n) as u16)
            );
            *slot = Some(id);
        }
        self.blocks[id.index()].set_size(new_size);
        true
    }

    // --- labels ---

    /// User-supplied names overwrite whatever was there, auto or suppressed.
    pub fn add_label<N>(&mut self, addr: Addr, name: N)
    where
        N: Into<Arc<str>>,
    {
        assert!(
            self.contains(addr),
            "label address {} outside of region {}",
            addr,
            self.kind
        );
        self.labels.insert(addr, LabelSlot::Named(name.into()));
    }

    /// Marks an instruction-tail byte so no label can ever land on it.
    pub fn suppress_label(&mut self, addr: Addr) {
        assert!(self.contains(addr));
        self.labels.insert(addr, LabelSlot::Suppressed);
    }

    /// Attaches reference provenance at `addr`.
    ///
    /// ROM banks accumulate an [`AutoLabel`]; RAM-like regions synthesize a
    /// fixed name on first touch instead, and the IO windows ignore this
    /// entirely because their registers already carry canonical names.
    pub fn add_auto_label(&mut self, addr: Addr, source: Option<Addr>, kind: ReferenceKind) {
        assert!(
            self.contains(addr),
            "label address {} outside of region {}",
            addr,
            self.kind
        );
        match self.kind {
            RegionKind::RomBank => {
                let slot = self
                    .labels
                    .entry(addr)
                    .or_insert_with(|| LabelSlot::Auto(AutoLabel::new()));
                if let LabelSlot::Auto(label) = slot {
                    label.add_reference(source, kind);
                }
            }
            RegionKind::Vram
            | RegionKind::Sram
            | RegionKind::Wram
            | RegionKind::Oam
            | RegionKind::Hram => {
                if !self.labels.contains_key(&addr) {
                    let prefix = match self.kind {
                        RegionKind::Vram => "v",
                        RegionKind::Sram => "s",
                        RegionKind::Wram => "w",
                        RegionKind::Oam => "oam",
                        _ => "h",
                    };
                    let name = format!("{}{:04X}", prefix, addr.inner());
                    self.labels.insert(addr, LabelSlot::Named(name.into()));
                }
            }
            RegionKind::Io | RegionKind::IeRegister => {}
        }
    }

    #[must_use]
    pub fn label(&self, addr: Addr) -> Option<&LabelSlot> {
        self.labels.get(&addr)
    }

    pub fn labels(&self) -> impl Iterator<Item = (Addr, &LabelSlot)> {
        self.labels.iter().map(|(addr, slot)| (*addr, slot))
    }

    pub(crate) fn labels_between(
        &self,
        range: RangeInclusive<Addr>,
    ) -> impl Iterator<Item = (Addr, &LabelSlot)> {
        self.labels.range(range).map(|(addr, slot)| (*addr, slot))
    }

    /// Nearest label at or before `addr`, skipping suppressed slots.
    #[must_use]
    pub fn label_before(&self, addr: Addr) -> Option<(Addr, &LabelSlot)> {
        self.labels
            .range(..=addr)
            .rev()
            .find(|(_, slot)| !matches!(slot, LabelSlot::Suppressed))
            .map(|(addr, slot)| (*addr, slot))
    }

    pub(crate) fn force_label_global(&mut self, addr: Addr) {
        if let Some(LabelSlot::Auto(label)) = self.labels.get_mut(&addr) {
            label.force_global();
        }
    }

    // --- marks & bank overrides ---

    pub fn mark(&mut self, addr: Addr, mark: MarkSet) {
        assert!(self.contains(addr));
        *self.marks.entry(addr).or_insert(MarkSet::empty()) |= mark;
    }

    #[must_use]
    pub fn marks_at(&self, addr: Addr) -> MarkSet {
        self.marks.get(&addr).copied().unwrap_or(MarkSet::empty())
    }

    /// Records that a specific switchable bank is known to be mapped while
    /// executing at `addr`. An explicit override always beats the walker's
    /// own load-tracking heuristic.
    pub fn set_bank_override(&mut self, addr: Addr, bank: Bank) {
        assert!(self.contains(addr));
        self.bank_overrides.insert(addr, bank);
    }

    #[must_use]
    pub fn bank_override_at(&self, addr: Addr) -> Option<Bank> {
        self.bank_overrides.get(&addr).copied()
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bank {
            Some(bank) => write!(f, "{}{:x}", self.kind, bank.inner()),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_region() -> MemoryRegion {
        let data: Arc<[u8]> = Arc::from(&[0u8; 0x4000][..]);
        MemoryRegion::new_rom_bank(data, Bank::new(0))
    }

    #[test]
    fn fail_soft_growth_refuses_overlap_without_mutating() {
        let mut region = rom_region();
        let first = region.create_block(BlockKind::Code, Addr::new(0x0100));
        assert!(region.grow_block(first, Size::new(3), true));

        let second = region.create_block(BlockKind::Code, Addr::new(0x00FE));
        // Would run into the first block's bytes.
        assert!(!region.grow_block(second, Size::new(4), true));
        assert_eq!(region.block(second).size(), Size::new(0));
        assert_eq!(region.block_at(Addr::new(0x00FE)), None);
        assert_eq!(region.block_at(Addr::new(0x00FF)), None);
        assert_eq!(region.block_at(Addr::new(0x0100)), Some(first));

        // Growing up to the boundary is fine.
        assert!(region.grow_block(second, Size::new(2), true));
        assert_eq!(region.block_at(Addr::new(0x00FF)), Some(second));
    }

    #[test]
    fn fail_soft_growth_refuses_past_region_end() {
        let mut region = rom_region();
        let block = region.create_block(BlockKind::Code, Addr::new(0x3FFF));
        assert!(!region.grow_block(block, Size::new(2), true));
        assert_eq!(region.block(block).size(), Size::new(0));
        assert!(region.grow_block(block, Size::new(1), true));
    }

    #[test]
    fn named_label_wins_over_auto_references() {
        let mut region = rom_region();
        region.add_label(Addr::new(0x0100), "entry");
        region.add_auto_label(Addr::new(0x0100), Some(Addr::new(0x0200)), ReferenceKind::Jp);
        assert_eq!(
            region.label(Addr::new(0x0100)),
            Some(&LabelSlot::Named("entry".into()))
        );
    }

    #[test]
    fn suppressed_byte_rejects_auto_labels() {
        let mut region = rom_region();
        region.suppress_label(Addr::new(0x0101));
        region.add_auto_label(Addr::new(0x0101), Some(Addr::new(0x0200)), ReferenceKind::Jr);
        assert_eq!(region.label(Addr::new(0x0101)), Some(&LabelSlot::Suppressed));
    }
}
