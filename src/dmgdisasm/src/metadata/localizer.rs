/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::memory::MemoryRegion;

/// Decides local-vs-global scope for every AutoLabel of a region.
///
/// A label can only render as scoped when the whole span between it and all
/// of its reference sites is free of global names: a user label or an
/// already-global AutoLabel in between would change which global the scoped
/// name hangs off. Promotion is monotonic (local labels only ever become
/// global), so repeating the pass until nothing changes terminates, and a
/// promotion made in one pass is seen by the labels whose spans cross it in
/// the next.
///
/// Runs once after exploration finishes; running it again is a no-op.
pub fn localize_labels(region: &mut MemoryRegion) {
    loop {
        let mut promotions: Vec<_> = Vec::new();

        for (addr, slot) in region.labels() {
            let Some(label) = slot.as_auto() else {
                continue;
            };
            if label.is_forced_global() {
                continue;
            }

            // A reference from outside this region can never use a scoped
            // name.
            let crosses_region = label
                .sources()
                .flatten()
                .any(|source| !region.contains(source));
            if crosses_region {
                promotions.push(addr);
                continue;
            }

            let (lo, hi) = label.span(addr);
            let interrupted = region
                .labels_between(lo..=hi)
                .any(|(other, slot)| other != addr && slot.breaks_local_span());
            if interrupted {
                promotions.push(addr);
            }
        }

        if promotions.is_empty() {
            break;
        }
        for addr in promotions {
            region.force_label_global(addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use crate::addresses::{Addr, Bank};
    use crate::metadata::{LabelScope, LabelSlot, ReferenceKind};

    use super::*;

    fn rom_region() -> MemoryRegion {
        let data: Arc<[u8]> = Arc::from(vec![0u8; 0x4000]);
        MemoryRegion::new_rom_bank(data, Bank::new(0))
    }

    fn scope_at(region: &MemoryRegion, addr: u16) -> LabelScope {
        region
            .label(Addr::new(addr))
            .and_then(LabelSlot::as_auto)
            .map(|label| label.scope())
            .unwrap()
    }

    #[test]
    fn tight_span_stays_local() {
        let mut region = rom_region();
        region.add_auto_label(Addr::new(0x0110), Some(Addr::new(0x0100)), ReferenceKind::Jr);
        localize_labels(&mut region);
        assert_eq!(scope_at(&region, 0x0110), LabelScope::Local);
    }

    #[test]
    fn user_label_inside_span_forces_global() {
        let mut region = rom_region();
        region.add_auto_label(Addr::new(0x0110), Some(Addr::new(0x0100)), ReferenceKind::Jr);
        region.add_label(Addr::new(0x0108), "some_routine");
        localize_labels(&mut region);
        assert_eq!(scope_at(&region, 0x0110), LabelScope::Global);
    }

    #[test]
    fn promotion_propagates_through_overlapping_spans() {
        let mut region = rom_region();
        // 0x0130's span crosses 0x0120; 0x0120's span crosses the called
        // label at 0x0110, so both must end up global.
        region.add_auto_label(Addr::new(0x0110), Some(Addr::new(0x0200)), ReferenceKind::Call);
        region.add_auto_label(Addr::new(0x0120), Some(Addr::new(0x0100)), ReferenceKind::Jr);
        region.add_auto_label(Addr::new(0x0130), Some(Addr::new(0x0118)), ReferenceKind::Jr);
        localize_labels(&mut region);
        assert_eq!(scope_at(&region, 0x0110), LabelScope::Global);
        assert_eq!(scope_at(&region, 0x0120), LabelScope::Global);
        assert_eq!(scope_at(&region, 0x0130), LabelScope::Global);
    }

    #[test]
    fn localizer_is_idempotent() {
        let mut region = rom_region();
        region.add_auto_label(Addr::new(0x0110), Some(Addr::new(0x0100)), ReferenceKind::Jr);
        region.add_auto_label(Addr::new(0x0150), Some(Addr::new(0x0100)), ReferenceKind::Call);
        localize_labels(&mut region);
        let first: Vec<_> = region
            .labels()
            .map(|(addr, slot)| (addr, slot.clone()))
            .collect();
        localize_labels(&mut region);
        let second: Vec<_> = region
            .labels()
            .map(|(addr, slot)| (addr, slot.clone()))
            .collect();
        assert_eq!(first, second);
    }
}
