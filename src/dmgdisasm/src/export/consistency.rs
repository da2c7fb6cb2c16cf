/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_map::BTreeMap;
use alloc::vec::Vec;

use crate::addresses::{Addr, Size};
use crate::blocks::BlockId;
use crate::memory::{AddressSpace, MemoryRegion};

use super::ExportConsistencyError;

/// Every maximal run of consecutively claimed bytes, as `(owner, start,
/// length)` in address order. Exporters walk this to render a region;
/// unclaimed gaps between runs are theirs to fill with raw byte dumps.
#[must_use]
pub fn claimed_ranges(region: &MemoryRegion) -> Vec<(BlockId, Addr, Size)> {
    let mut ranges: Vec<(BlockId, Addr, Size)> = Vec::new();
    for n in 0..region.size().as_usize() {
        let addr = region.base_address() + Size::new(n as u16);
        let Some(id) = region.block_at(addr) else {
            continue;
        };
        match ranges.last_mut() {
            Some((last, start, len)) if *last == id && *start + *len == addr => {
                *len += Size::new(1);
            }
            _ => ranges.push((id, addr, Size::new(1))),
        }
    }
    ranges
}

/// Checks, for every region, that each block's declared size matches the
/// bytes claimed for it. The growth protocol makes a violation impossible
/// through the public API; this is the export-time backstop that refuses to
/// render if it happened anyway.
pub fn verify_consistency(space: &AddressSpace) -> Result<(), ExportConsistencyError> {
    for (region_id, region) in space.regions() {
        let mut observed: BTreeMap<BlockId, (Addr, usize)> = BTreeMap::new();
        for n in 0..region.size().as_usize() {
            let addr = region.base_address() + Size::new(n as u16);
            if let Some(id) = region.block_at(addr) {
                let entry = observed.entry(id).or_insert((addr, 0));
                entry.1 += 1;
            }
        }
        for (id, (first, count)) in observed {
            let block = region.block(id);
            if block.base_address() != first || block.size().as_usize() != count {
                return Err(ExportConsistencyError {
                    region: region_id,
                    base_address: block.base_address(),
                    declared: block.size(),
                    claimed: Size::new(count as u16),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pretty_assertions::assert_eq;

    use crate::blocks::BlockKind;
    use crate::memory::RegionId;
    use crate::rom::RomImage;

    use super::*;

    #[test]
    fn adjacent_blocks_split_into_separate_ranges() {
        let rom = RomImage::new(vec![0u8; 0x4000]);
        let mut space = AddressSpace::new(&rom);
        let region = space.region_mut(RegionId::new(0));
        let first = region.create_block(BlockKind::Code, Addr::new(0x0100));
        region.grow_block(first, Size::new(3), false);
        let second = region.create_block(BlockKind::Code, Addr::new(0x0103));
        region.grow_block(second, Size::new(1), false);
        // And one further away.
        let third = region.create_block(BlockKind::Code, Addr::new(0x0200));
        region.grow_block(third, Size::new(2), false);

        let ranges = claimed_ranges(space.region(RegionId::new(0)));
        assert_eq!(
            ranges,
            vec![
                (first, Addr::new(0x0100), Size::new(3)),
                (second, Addr::new(0x0103), Size::new(1)),
                (third, Addr::new(0x0200), Size::new(2)),
            ]
        );
        assert_eq!(verify_consistency(&space), Ok(()));
    }

    #[test]
    fn freshly_routed_space_is_consistent() {
        // Includes the seeded one-byte IO register blocks up to $FFFF.
        let rom = RomImage::new(vec![0u8; 0x8000]);
        let space = AddressSpace::new(&rom);
        assert_eq!(verify_consistency(&space), Ok(()));
    }
}
