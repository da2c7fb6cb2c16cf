/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::addresses::Addr;
use crate::analysis::{CodeWalker, Diagnostic, NoHooks, WalkHooks};
use crate::annotations::{apply_annotations, Annotation, AnnotationError};
use crate::memory::{AddressSpace, RegionId};
use crate::metadata::localize_labels;
use crate::rom::RomImage;

/// The cartridge entry point jumped to after the boot sequence.
const ENTRY_POINT: u16 = 0x0100;

/// Restart and interrupt vectors, with the names assemblers conventionally
/// give their handlers. Only seeded when the vector holds something other
/// than fill bytes.
const INTERRUPT_VECTORS: &[(u16, &str)] = &[
    (0x0040, "isrVBlank"),
    (0x0048, "isrLCDC"),
    (0x0050, "isrTimer"),
    (0x0058, "isrSerial"),
    (0x0060, "isrJoypad"),
];

/// Ties the pieces together for one image: annotations first, then the
/// worklist exploration from the standard entry points, then the label
/// scope pass.
pub struct Disassembler {
    space: AddressSpace,
    annotations: Vec<(RegionId, Addr, Annotation)>,
}

impl Disassembler {
    #[must_use]
    pub fn new(rom: &RomImage) -> Self {
        Self {
            space: AddressSpace::new(rom),
            annotations: Vec::new(),
        }
    }

    /// Queues a directive against `(region, addr)`. Parsed eagerly so an
    /// unknown name fails at the call site, not mid-run.
    pub fn annotate(
        &mut self,
        region: RegionId,
        addr: Addr,
        text: &str,
    ) -> Result<(), AnnotationError> {
        let annotation = Annotation::parse(text)?;
        self.annotations.push((region, addr, annotation));
        Ok(())
    }

    #[must_use]
    pub const fn space(&self) -> &AddressSpace {
        &self.space
    }

    #[must_use]
    pub fn space_mut(&mut self) -> &mut AddressSpace {
        &mut self.space
    }

    #[must_use]
    pub fn into_space(self) -> AddressSpace {
        self.space
    }

    pub fn run(&mut self) -> Result<Vec<Diagnostic>, AnnotationError> {
        self.run_with_hooks(&mut NoHooks)
    }

    /// Full pipeline. Annotation failures abort before anything is explored;
    /// exploration failures come back as diagnostics on success.
    pub fn run_with_hooks(
        &mut self,
        hooks: &mut dyn WalkHooks,
    ) -> Result<Vec<Diagnostic>, AnnotationError> {
        let seeds = apply_annotations(&mut self.space, &self.annotations)?;
        let vectors = self.vector_seeds();

        let mut walker = CodeWalker::new(&mut self.space);
        for (region, addr) in vectors.into_iter().chain(seeds) {
            walker.seed(region, addr);
        }
        walker.run(hooks);
        let diagnostics = walker.into_diagnostics();

        let rom_banks: Vec<RegionId> = self.space.rom_banks().collect();
        for id in rom_banks {
            localize_labels(self.space.region_mut(id));
        }
        Ok(diagnostics)
    }

    /// Labels and seeds the entry point and whichever interrupt vectors are
    /// populated. The entry point is always code; a vector full of fill
    /// bytes, or already claimed by an annotation, is left alone.
    fn vector_seeds(&mut self) -> Vec<(RegionId, Addr)> {
        let Some(bank0) = self.space.rom_banks().next() else {
            return Vec::new();
        };
        let region = self.space.region_mut(bank0);
        let mut seeds = Vec::new();

        let entry = Addr::new(ENTRY_POINT);
        if region.contains(entry) {
            region.add_label(entry, "entry");
            seeds.push((bank0, entry));
        }

        for &(raw_addr, name) in INTERRUPT_VECTORS {
            let addr = Addr::new(raw_addr);
            let populated = region
                .byte(addr)
                .is_some_and(|byte| !RomImage::is_fill_byte(byte));
            if populated && region.block_at(addr).is_none() {
                region.add_label(addr, name);
                seeds.push((bank0, addr));
            }
        }
        seeds
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pretty_assertions::assert_eq;

    use crate::addresses::Size;
    use crate::metadata::LabelSlot;

    use super::*;

    #[test]
    fn vectors_full_of_fill_bytes_are_not_seeded() {
        let mut data = vec![0u8; 0x8000];
        data[0x0040] = 0xD9; // reti
        data[0x0100] = 0xC9; // ret
        let mut disassembler = Disassembler::new(&RomImage::new(data));
        let diagnostics = disassembler.run().unwrap();
        assert_eq!(diagnostics, vec![]);

        let space = disassembler.space();
        let region = space.region(RegionId::new(0));
        assert!(region.block_at(Addr::new(0x0040)).is_some());
        assert_eq!(
            region.label(Addr::new(0x0040)),
            Some(&LabelSlot::Named("isrVBlank".into()))
        );
        // 0x0048 holds 0x00: never seeded, never claimed.
        assert_eq!(region.block_at(Addr::new(0x0048)), None);
        assert_eq!(region.label(Addr::new(0x0048)), None);
    }

    #[test]
    fn annotation_seeds_feed_the_same_run() {
        let mut data = vec![0u8; 0x8000];
        data[0x0100] = 0xC9;
        data[0x0200] = 0xC9;
        let mut disassembler = Disassembler::new(&RomImage::new(data));
        disassembler
            .annotate(RegionId::new(0), Addr::new(0x0200), "code")
            .unwrap();
        let diagnostics = disassembler.run().unwrap();
        assert_eq!(diagnostics, vec![]);

        let region = disassembler.space().region(RegionId::new(0));
        let block = region.block_at(Addr::new(0x0200)).unwrap();
        assert_eq!(region.block(block).size(), Size::new(1));
    }

    #[test]
    fn unknown_annotation_fails_before_exploration() {
        let mut disassembler = Disassembler::new(&RomImage::new(vec![0u8; 0x4000]));
        let result = disassembler.annotate(RegionId::new(0), Addr::new(0x0100), "nonsense");
        assert!(matches!(
            result,
            Err(AnnotationError::UnknownAnnotation { .. })
        ));
    }
}
