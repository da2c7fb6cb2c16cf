/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use dmgdisasm::addresses::{Addr, Bank, Size};
use dmgdisasm::blocks::BlockKind;
use dmgdisasm::export::verify_consistency;
use dmgdisasm::memory::AddressSpace;
use dmgdisasm::rom::RomImage;

fn xorshift(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

/// Interleaved fail-soft growths never produce a doubly-owned byte, and a
/// refused growth never mutates anything. Checked against a plain mirror of
/// the expected ownership.
#[test]
fn random_growth_interleavings_keep_single_ownership() {
    let mut space = AddressSpace::new(&RomImage::new(vec![0u8; 0x4000]));
    let bank0 = space.rom_bank(Bank::new(0)).unwrap();
    let region = space.region_mut(bank0);

    let mut mirror = [false; 0x4000];
    let mut state = 0x2A2A_5EED;

    for _ in 0..500 {
        let base = (xorshift(&mut state) as usize) % 0x3FF0;
        let want = 1 + (xorshift(&mut state) as usize) % 8;

        let block = region.create_block(BlockKind::Code, Addr::new(base as u16));
        let fits = mirror[base..base + want].iter().all(|claimed| !claimed);
        let grown = region.grow_block(block, Size::new(want as u16), true);
        assert_eq!(grown, fits, "claim of {}..{} disagrees with mirror", base, base + want);
        if grown {
            for slot in &mut mirror[base..base + want] {
                *slot = true;
            }
        }
    }

    let region = space.region(bank0);
    for (n, claimed) in mirror.iter().enumerate() {
        assert_eq!(
            region.block_at(Addr::new(n as u16)).is_some(),
            *claimed,
            "byte {:#06X}",
            n
        );
    }
    assert_eq!(verify_consistency(&space), Ok(()));
}
