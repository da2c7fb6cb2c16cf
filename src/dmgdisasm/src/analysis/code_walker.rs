/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_set::BTreeSet;
use alloc::vec::Vec;

use crate::addresses::{Addr, Bank};
use crate::blocks::{BlockId, BlockKind};
use crate::instructions::{Instruction, MemRef, Mnemonic, Operand, Reg16, Reg8};
use crate::memory::{AddressSpace, MarkSet, RegionId, SWITCHABLE_BASE};
use crate::metadata::ReferenceKind;

use super::Diagnostic;

/// Extension points invoked around call sites and chain ends.
///
/// Both receive `(space, source region, instruction address, address after
/// the instruction)`. Specialized callers claim auxiliary bytes that
/// conventionally trail a call site here; the engine itself never does.
pub trait WalkHooks {
    fn after_call(&mut self, space: &mut AddressSpace, region: RegionId, addr: Addr, next: Addr) {
        let _ = (space, region, addr, next);
    }

    fn at_chain_end(&mut self, space: &mut AddressSpace, region: RegionId, addr: Addr, next: Addr) {
        let _ = (space, region, addr, next);
    }
}

/// The default: no auxiliary claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl WalkHooks for NoHooks {}

/// The worklist-driven control-flow exploration.
///
/// Seeded with entry points; each popped address starts one straight-line
/// chain that decodes instructions, claims their bytes into a growing code
/// block and pushes every statically resolvable branch target back onto the
/// worklist. A chain stops on an already-claimed byte (a merge), a decode
/// failure, a refused claim, the region boundary, or a non-fall-through
/// instruction. Failures abort only their own chain and are collected as
/// diagnostics.
///
/// Single-threaded by construction; every ownership mutation goes through
/// the fail-soft growth protocol, so an overlapping claim is detected before
/// anything is written.
pub struct CodeWalker<'a> {
    space: &'a mut AddressSpace,
    visited: BTreeSet<(RegionId, Addr)>,
    worklist: Vec<(RegionId, Addr)>,
    diagnostics: Vec<Diagnostic>,
}

/// Straight-line state carried while walking one chain.
struct Chain {
    block: Option<BlockId>,
    /// Bank believed active in the switchable window. Static inside a
    /// switchable bank; inferred in the fixed bank.
    bank_context: Option<Bank>,
    /// Value of the last `ld a, imm` still live in the accumulator, watched
    /// for a following store to the bank-select range.
    accumulator: Option<u8>,
}

const BANK_SELECT: core::ops::RangeInclusive<u16> = 0x2000..=0x3FFF;

impl<'a> CodeWalker<'a> {
    #[must_use]
    pub fn new(space: &'a mut AddressSpace) -> Self {
        Self {
            space,
            visited: BTreeSet::new(),
            worklist: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Queues an entry point. No label is attached; seeds carry their own
    /// naming (vectors, annotations).
    pub fn seed(&mut self, region: RegionId, addr: Addr) {
        self.worklist.push((region, addr));
    }

    /// Drains the worklist. Last-in-first-out; the order only affects the
    /// order of diagnostics, never the final ownership model.
    pub fn run(&mut self, hooks: &mut dyn WalkHooks) {
        while let Some((region, addr)) = self.worklist.pop() {
            self.walk_chain(region, addr, hooks);
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn walk_chain(&mut self, id: RegionId, start: Addr, hooks: &mut dyn WalkHooks) {
        if !self.visited.insert((id, start)) {
            return;
        }
        let region = self.space.region(id);
        if !region.kind().is_code_eligible() {
            return;
        }
        let mut chain = Chain {
            block: None,
            bank_context: region.bank().filter(|bank| !bank.is_fixed()),
            accumulator: None,
        };

        let mut addr = start;
        loop {
            let region = self.space.region(id);
            if !region.contains(addr) {
                return;
            }
            // Running into an existing block merges with prior analysis.
            if region.block_at(addr).is_some() {
                return;
            }
            let instruction = match Instruction::decode(region.bytes_from(addr), addr) {
                Ok(instruction) => instruction,
                Err(error) => {
                    self.diagnostics
                        .push(Diagnostic::InvalidInstruction { region: id, error });
                    return;
                }
            };

            if !self.claim(id, &mut chain, &instruction) {
                self.diagnostics
                    .push(Diagnostic::InstructionOverlap { region: id, addr });
                return;
            }
            self.track_bank(id, &mut chain, &instruction);

            let next = addr + instruction.size();
            if let Some(target) = instruction.jump_target() {
                let resolved = self.follow_branch(id, &chain, &instruction, target);
                if resolved && matches!(instruction.mnemonic(), Mnemonic::Call | Mnemonic::Rst) {
                    hooks.after_call(self.space, id, addr, next);
                }
            } else if let Some(target) = data_reference(&instruction) {
                self.attach_data_reference(&chain, addr, target);
            }

            if !instruction.has_next() {
                hooks.at_chain_end(self.space, id, addr, next);
                return;
            }
            addr = next;
        }
    }

    /// Claims the instruction's bytes into the chain's block and keeps its
    /// tail bytes label-free. Fail-soft; `false` means an overlap.
    fn claim(&mut self, id: RegionId, chain: &mut Chain, instruction: &Instruction) -> bool {
        let addr = instruction.addr();
        let region = self.space.region_mut(id);
        let block = *chain
            .block
            .get_or_insert_with(|| region.create_block(BlockKind::Code, addr));

        let base = region.block(block).base_address();
        let new_size = (addr - base) + instruction.size();
        if !region.grow_block(block, new_size, true) {
            return false;
        }
        region.mark(addr, MarkSet::CODE);
        let mut tail = addr.next();
        while tail < addr + instruction.size() {
            region.suppress_label(tail);
            tail = tail.next();
        }
        true
    }

    /// Best-effort active-bank inference: an immediate load of the
    /// accumulator followed by a store into the bank-select range. An
    /// explicit per-address override always wins.
    fn track_bank(&mut self, id: RegionId, chain: &mut Chain, instruction: &Instruction) {
        if let Some(bank) = self.space.region(id).bank_override_at(instruction.addr()) {
            chain.bank_context = Some(bank);
            return;
        }
        match (instruction.mnemonic(), instruction.operand0(), instruction.operand1()) {
            (Mnemonic::Ld, Some(Operand::Reg8(Reg8::A)), Some(Operand::Imm8(value))) => {
                chain.accumulator = Some(value);
            }
            (Mnemonic::Ld, Some(Operand::Mem(MemRef::Abs(target))), Some(Operand::Reg8(Reg8::A)))
                if BANK_SELECT.contains(&target.inner()) =>
            {
                if let Some(value) = chain.accumulator {
                    chain.bank_context = Some(Bank::new(value as u16));
                }
            }
            // Anything else that writes A invalidates the tracked value.
            (_, Some(Operand::Reg8(Reg8::A)), _) => chain.accumulator = None,
            _ => {}
        }
    }

    /// Reports whether the target resolved to a region; the call-site hook
    /// only fires for resolved targets.
    fn follow_branch(
        &mut self,
        id: RegionId,
        chain: &Chain,
        instruction: &Instruction,
        target: Addr,
    ) -> bool {
        let kind = match instruction.mnemonic() {
            Mnemonic::Call => ReferenceKind::Call,
            Mnemonic::Rst => ReferenceKind::Rst,
            Mnemonic::Jp => ReferenceKind::Jp,
            _ => ReferenceKind::Jr,
        };
        let Some(target_id) = self.space.resolve(target, chain.bank_context) else {
            if target.inner() >= SWITCHABLE_BASE && target.inner() < 0x8000 {
                self.diagnostics.push(Diagnostic::UnresolvedBankTarget {
                    region: id,
                    source: instruction.addr(),
                    target,
                });
            }
            return false;
        };
        let target_region = self.space.region_mut(target_id);
        if !target_region.kind().is_code_eligible() {
            return true;
        }
        target_region.add_auto_label(target, Some(instruction.addr()), kind);
        if target_region.block_at(target).is_none() {
            self.worklist.push((target_id, target));
        }
        true
    }

    /// A memory operand or a pointer-looking immediate becomes a data-kind
    /// label hint at its target. No block is created; classifying pure data
    /// ranges is the annotation layer's job.
    fn attach_data_reference(&mut self, chain: &Chain, source: Addr, target: Addr) {
        let Some(target_id) = self.space.resolve(target, chain.bank_context) else {
            return;
        };
        self.space
            .region_mut(target_id)
            .add_auto_label(target, Some(source), ReferenceKind::Data);
    }
}

/// Which address, if any, an instruction references as data.
///
/// Stores only count when they leave ROM (a write to `[0x2000]` is a bank
/// switch, not a data access); loads count anywhere; a pointer immediate
/// loaded into `bc`/`de`/`hl` counts when it falls in the banked-ROM, WRAM
/// or HRAM ranges.
fn data_reference(instruction: &Instruction) -> Option<Addr> {
    if let Some(target) = instruction.operand0().as_ref().and_then(Operand::mem_target) {
        if target.inner() >= 0x8000 {
            return Some(target);
        }
    }
    if let Some(target) = instruction.operand1().as_ref().and_then(Operand::mem_target) {
        return Some(target);
    }
    if let (
        Some(Operand::Reg16(Reg16::Bc | Reg16::De | Reg16::Hl)),
        Some(Operand::Imm16(value)),
    ) = (instruction.operand0(), instruction.operand1())
    {
        let pointer_like = (SWITCHABLE_BASE..0x8000).contains(&value)
            || (0xC000..0xE000).contains(&value)
            || (0xFF80..0xFFFF).contains(&value);
        if pointer_like {
            return Some(Addr::new(value));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use pretty_assertions::assert_eq;

    use crate::addresses::Size;
    use crate::metadata::LabelSlot;
    use crate::rom::RomImage;

    use super::*;

    fn rom_with(code: &[(usize, &[u8])], banks: usize) -> AddressSpace {
        let mut data = vec![0u8; banks * 0x4000];
        for (offset, bytes) in code {
            data[*offset..*offset + bytes.len()].copy_from_slice(bytes);
        }
        AddressSpace::new(&RomImage::new(data))
    }

    fn bank0() -> RegionId {
        RegionId::new(0)
    }

    fn explore(space: &mut AddressSpace, addr: u16) -> Vec<Diagnostic> {
        let mut walker = CodeWalker::new(space);
        walker.seed(bank0(), Addr::new(addr));
        walker.run(&mut NoHooks);
        walker.into_diagnostics()
    }

    #[test]
    fn lone_ret_claims_one_byte() {
        let mut space = rom_with(&[(0x0150, &[0xC9])], 1);
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics, vec![]);

        let region = space.region(bank0());
        let block = region.block_at(Addr::new(0x0150)).unwrap();
        assert_eq!(region.block(block).size(), Size::new(1));
        assert_eq!(region.block_at(Addr::new(0x0151)), None);
    }

    #[test]
    fn decode_failure_claims_nothing_at_the_failing_address() {
        // nop; then the undefined 0xDD.
        let mut space = rom_with(&[(0x0150, &[0x00, 0xDD])], 1);
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::InvalidInstruction { .. }
        ));

        let region = space.region(bank0());
        assert!(region.block_at(Addr::new(0x0150)).is_some());
        assert_eq!(region.block_at(Addr::new(0x0151)), None);
    }

    #[test]
    fn conditional_jump_explores_both_edges() {
        // jr nz, +2 (over the `inc a`); inc a; ret; ret
        let mut space = rom_with(&[(0x0150, &[0x20, 0x02, 0x3C, 0xC9, 0xC9])], 1);
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics, vec![]);

        let region = space.region(bank0());
        // Fall-through path claimed 0x0150..0x0154, target chain 0x0154.
        assert!(region.block_at(Addr::new(0x0153)).is_some());
        assert!(region.block_at(Addr::new(0x0154)).is_some());
        assert_eq!(
            region
                .label(Addr::new(0x0154))
                .and_then(LabelSlot::as_auto)
                .map(|label| label.kind()),
            Some(ReferenceKind::Jr)
        );
    }

    #[test]
    fn revisit_of_claimed_bytes_merges_without_diagnostics() {
        // Two seeds into the same straight-line code.
        let mut space = rom_with(&[(0x0150, &[0x00, 0x00, 0xC9])], 1);
        let mut walker = CodeWalker::new(&mut space);
        walker.seed(bank0(), Addr::new(0x0150));
        walker.run(&mut NoHooks);
        walker.seed(bank0(), Addr::new(0x0150));
        walker.run(&mut NoHooks);
        assert_eq!(walker.into_diagnostics(), vec![]);
    }

    #[test]
    fn banked_call_uses_tracked_bank_select_store() {
        // ld a, 2; ld [$2000], a; call $4000; ret -- and bank 2 holds a ret.
        let mut space = rom_with(
            &[
                (0x0150, &[0x3E, 0x02, 0xEA, 0x00, 0x20, 0xCD, 0x00, 0x40, 0xC9]),
                (2 * 0x4000, &[0xC9]),
            ],
            3,
        );
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics, vec![]);

        let bank2 = space.rom_bank(Bank::new(2)).unwrap();
        let region = space.region(bank2);
        assert!(region.block_at(Addr::new(0x4000)).is_some());
        let label = region.label(Addr::new(0x4000)).and_then(LabelSlot::as_auto);
        assert_eq!(label.map(|l| l.kind()), Some(ReferenceKind::Call));
        assert!(label.is_some_and(crate::metadata::AutoLabel::is_forced_global));
    }

    #[test]
    fn banked_jump_without_context_is_dropped_with_diagnostic() {
        // jp $4000 straight from the fixed bank, no bank select in sight.
        let mut space = rom_with(&[(0x0150, &[0xC3, 0x00, 0x40])], 2);
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::UnresolvedBankTarget { .. }
        ));

        let bank1 = space.rom_bank(Bank::new(1)).unwrap();
        assert_eq!(space.region(bank1).label(Addr::new(0x4000)), None);
    }

    #[derive(Default)]
    struct CountCalls {
        calls: usize,
    }

    impl WalkHooks for CountCalls {
        fn after_call(&mut self, _: &mut AddressSpace, _: RegionId, _: Addr, _: Addr) {
            self.calls += 1;
        }
    }

    #[test]
    fn call_hook_fires_once_per_resolved_call() {
        // call $0160; ret -- and the callee is a lone ret.
        let mut space = rom_with(&[(0x0150, &[0xCD, 0x60, 0x01, 0xC9]), (0x0160, &[0xC9])], 1);
        let mut walker = CodeWalker::new(&mut space);
        walker.seed(bank0(), Addr::new(0x0150));
        let mut hooks = CountCalls::default();
        walker.run(&mut hooks);
        assert_eq!(walker.into_diagnostics(), vec![]);
        assert_eq!(hooks.calls, 1);
    }

    #[test]
    fn call_hook_is_skipped_when_the_target_does_not_resolve() {
        // call $4000 from the fixed bank with no bank select in sight.
        let mut space = rom_with(&[(0x0150, &[0xCD, 0x00, 0x40, 0xC9])], 2);
        let mut walker = CodeWalker::new(&mut space);
        walker.seed(bank0(), Addr::new(0x0150));
        let mut hooks = CountCalls::default();
        walker.run(&mut hooks);
        assert_eq!(hooks.calls, 0);
        let diagnostics = walker.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::UnresolvedBankTarget { .. }
        ));
    }

    #[test]
    fn ram_store_gets_a_fixed_data_label() {
        // ld [$C123], a; ret
        let mut space = rom_with(&[(0x0150, &[0xEA, 0x23, 0xC1, 0xC9])], 1);
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics, vec![]);

        let label = space
            .resolve(Addr::new(0xC123), None)
            .map(|id| space.region(id).label(Addr::new(0xC123)));
        assert_eq!(
            label,
            Some(Some(&LabelSlot::Named("wC123".into())))
        );
    }

    #[test]
    fn overlap_with_foreign_block_aborts_the_chain() {
        // Data block planted over 0x0152, then code runs into it:
        // nop; nop; nop; ret -- third nop's byte is taken.
        let mut space = rom_with(&[(0x0150, &[0x00, 0x00, 0x00, 0xC9])], 1);
        {
            let region = space.region_mut(bank0());
            let block = region.create_block(
                BlockKind::Data(crate::blocks::DataFormat::parse("b").unwrap()),
                Addr::new(0x0152),
            );
            region.grow_block(block, Size::new(1), false);
        }
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics, vec![]);

        // Not an overlap: the chain merges by stopping at the claimed byte.
        let region = space.region(bank0());
        assert!(region.block_at(Addr::new(0x0151)).is_some());
        assert_ne!(
            region.block_at(Addr::new(0x0151)),
            region.block_at(Addr::new(0x0152))
        );
    }

    #[test]
    fn mid_instruction_overlap_is_reported() {
        // Plant a one-byte block on the operand byte of `jp $0150`, so the
        // claim itself fails rather than the pre-claim ownership check.
        let mut space = rom_with(&[(0x0150, &[0xC3, 0x50, 0x01])], 1);
        {
            let region = space.region_mut(bank0());
            let block = region.create_block(
                BlockKind::Data(crate::blocks::DataFormat::parse("b").unwrap()),
                Addr::new(0x0151),
            );
            region.grow_block(block, Size::new(1), false);
        }
        let diagnostics = explore(&mut space, 0x0150);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::InstructionOverlap { .. }
        ));
        // Nothing was claimed by the aborted chain.
        assert_eq!(space.region(bank0()).block_at(Addr::new(0x0150)), None);
    }
}
