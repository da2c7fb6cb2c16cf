/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::addresses::{Addr, Bank, Size};
use crate::blocks::BlockKind;
use crate::metadata::LabelSlot;
use crate::rom::RomImage;

use super::hardware_io::HARDWARE_REGISTERS;
use super::{MemoryRegion, RegionId, RegionKind};

/// The whole 16-bit bus: every ROM bank plus the fixed RAM/IO windows.
///
/// Routing an address to its owning region is the one place bank switching
/// shows up: the `[0x4000, 0x8000)` window maps nowhere without a bank
/// context to disambiguate it.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    regions: Vec<MemoryRegion>,
    bank_count: usize,
    vram: RegionId,
    sram: RegionId,
    wram: RegionId,
    oam: RegionId,
    io: RegionId,
    hram: RegionId,
    ie: RegionId,
}

impl AddressSpace {
    #[must_use]
    pub fn new(rom: &RomImage) -> Self {
        let bank_count = rom.bank_count();
        let mut regions = Vec::with_capacity(bank_count + 7);
        for bank in 0..bank_count {
            regions.push(MemoryRegion::new_rom_bank(
                rom.data().clone(),
                Bank::new(bank as u16),
            ));
        }

        let mut fixed = |kind, base, size| {
            let id = RegionId::new(regions.len());
            regions.push(MemoryRegion::new_ram(kind, Addr::new(base), Size::new(size)));
            id
        };
        let vram = fixed(RegionKind::Vram, 0x8000, 0x2000);
        let sram = fixed(RegionKind::Sram, 0xA000, 0x2000);
        let wram = fixed(RegionKind::Wram, 0xC000, 0x2000);
        let oam = fixed(RegionKind::Oam, 0xFE00, 0x00A0);
        let io = fixed(RegionKind::Io, 0xFF00, 0x0080);
        let hram = fixed(RegionKind::Hram, 0xFF80, 0x007F);
        let ie = fixed(RegionKind::IeRegister, 0xFFFF, 0x0001);

        let mut space = Self {
            regions,
            bank_count,
            vram,
            sram,
            wram,
            oam,
            io,
            hram,
            ie,
        };
        space.seed_hardware_registers();
        space
    }

    fn seed_hardware_registers(&mut self) {
        for &(raw_addr, name) in HARDWARE_REGISTERS {
            let addr = Addr::new(raw_addr);
            let id = if raw_addr == 0xFFFF { self.ie } else { self.io };
            let region = self.region_mut(id);
            let block = region.create_block(BlockKind::IoRegister, addr);
            region.grow_block(block, Size::new(1), false);
            region.add_label(addr, name);
        }
    }

    #[must_use]
    pub fn region(&self, id: RegionId) -> &MemoryRegion {
        &self.regions[id.index()]
    }

    #[must_use]
    pub fn region_mut(&mut self, id: RegionId) -> &mut MemoryRegion {
        &mut self.regions[id.index()]
    }

    #[must_use]
    pub const fn rom_bank_count(&self) -> usize {
        self.bank_count
    }

    #[must_use]
    pub fn rom_bank(&self, bank: Bank) -> Option<RegionId> {
        if (bank.inner() as usize) < self.bank_count {
            Some(RegionId::new(bank.inner() as usize))
        } else {
            None
        }
    }

    pub fn rom_banks(&self) -> impl Iterator<Item = RegionId> {
        (0..self.bank_count).map(RegionId::new)
    }

    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &MemoryRegion)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(index, region)| (RegionId::new(index), region))
    }

    /// Resolves a bus address to its owning region.
    ///
    /// The switchable window needs `bank_context` to disambiguate; a context
    /// of bank 0 (or none at all) resolves to `None` there, which callers
    /// surface as an address-resolution diagnostic. The echo window and the
    /// unusable gap above OAM map nowhere.
    #[must_use]
    pub fn resolve(&self, addr: Addr, bank_context: Option<Bank>) -> Option<RegionId> {
        match addr.inner() {
            0x0000..=0x3FFF => self.rom_bank(Bank::new(0)),
            0x4000..=0x7FFF => match bank_context {
                Some(bank) if !bank.is_fixed() => self.rom_bank(bank),
                _ => None,
            },
            0x8000..=0x9FFF => Some(self.vram),
            0xA000..=0xBFFF => Some(self.sram),
            0xC000..=0xDFFF => Some(self.wram),
            0xE000..=0xFDFF => None,
            0xFE00..=0xFE9F => Some(self.oam),
            0xFEA0..=0xFEFF => None,
            0xFF00..=0xFF7F => Some(self.io),
            0xFF80..=0xFFFE => Some(self.hram),
            0xFFFF => Some(self.ie),
        }
    }

    /// The label visible at `addr`, if a block owns that byte.
    #[must_use]
    pub fn label_at(&self, addr: Addr, bank_context: Option<Bank>) -> Option<&LabelSlot> {
        let region = self.region(self.resolve(addr, bank_context)?);
        region.block_at(addr)?;
        region.label(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_with_banks(count: usize) -> AddressSpace {
        let rom = RomImage::new(alloc::vec![0u8; count * 0x4000]);
        AddressSpace::new(&rom)
    }

    #[test]
    fn fixed_partitioning() {
        let space = space_with_banks(2);
        let kind_of = |addr: u16, ctx: Option<Bank>| {
            space
                .resolve(Addr::new(addr), ctx)
                .map(|id| space.region(id).kind())
        };

        assert_eq!(kind_of(0x0000, None), Some(RegionKind::RomBank));
        assert_eq!(kind_of(0x3FFF, None), Some(RegionKind::RomBank));
        assert_eq!(kind_of(0x4000, None), None);
        assert_eq!(kind_of(0x4000, Some(Bank::new(0))), None);
        assert_eq!(kind_of(0x4000, Some(Bank::new(1))), Some(RegionKind::RomBank));
        assert_eq!(kind_of(0x8000, None), Some(RegionKind::Vram));
        assert_eq!(kind_of(0xA000, None), Some(RegionKind::Sram));
        assert_eq!(kind_of(0xC000, None), Some(RegionKind::Wram));
        assert_eq!(kind_of(0xE000, None), None);
        assert_eq!(kind_of(0xFE00, None), Some(RegionKind::Oam));
        assert_eq!(kind_of(0xFEA0, None), None);
        assert_eq!(kind_of(0xFF00, None), Some(RegionKind::Io));
        assert_eq!(kind_of(0xFF80, None), Some(RegionKind::Hram));
        assert_eq!(kind_of(0xFFFF, None), Some(RegionKind::IeRegister));
    }

    #[test]
    fn hardware_registers_are_seeded() {
        let space = space_with_banks(1);
        let label = space.label_at(Addr::new(0xFF40), None);
        assert_eq!(label, Some(&LabelSlot::Named("rLCDC".into())));
        let ie = space.label_at(Addr::new(0xFFFF), None);
        assert_eq!(ie, Some(&LabelSlot::Named("rIE".into())));
    }

    #[test]
    fn unknown_bank_context_has_no_region() {
        let space = space_with_banks(2);
        assert_eq!(space.resolve(Addr::new(0x5000), Some(Bank::new(7))), None);
    }
}
