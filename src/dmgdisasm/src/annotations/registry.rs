/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::addresses::{Addr, Bank, Size};
use crate::blocks::{BlockKind, DataElem, DataFormat};
use crate::memory::{AddressSpace, MarkSet, RegionId};
use crate::metadata::ReferenceKind;

use super::annotation::parse_number;
use super::{Annotation, AnnotationError};

type Handler = fn(
    &mut AddressSpace,
    RegionId,
    Addr,
    &Annotation,
    &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError>;

pub(crate) struct Entry {
    pub(crate) name: &'static str,
    pub(crate) priority: u8,
    handler: Handler,
}

/// The fixed directive table, built once. Ordering here is cosmetic; the
/// `priority` field decides application order.
const REGISTRY: &[Entry] = &[
    Entry { name: "=bank", priority: 10, handler: bank_override },
    Entry { name: "code", priority: 20, handler: code },
    Entry { name: "data", priority: 20, handler: data },
    Entry { name: "jumptable", priority: 20, handler: jumptable },
    Entry { name: "=value", priority: 30, handler: value_mark },
    Entry { name: "=ptr", priority: 30, handler: ptr_mark },
];

pub(crate) fn lookup(name: &str) -> Option<&'static Entry> {
    REGISTRY.iter().find(|entry| entry.name == name)
}

/// Rejects a requested byte span before any address arithmetic touches it:
/// `[addr, addr + byte_count)` must lie inside the region. Done in 32 bits
/// so an absurd `size=` cannot overflow on the way in.
fn checked_span(
    space: &AddressSpace,
    region: RegionId,
    addr: Addr,
    byte_count: u32,
    name: &str,
    size_text: &str,
) -> Result<Size, AnnotationError> {
    let region = space.region(region);
    let end = region.base_address().inner() as u32 + region.size().as_usize() as u32;
    if byte_count > u16::MAX as u32
        || addr < region.base_address()
        || addr.inner() as u32 + byte_count > end
    {
        return Err(AnnotationError::InvalidArgument {
            name: name.to_string(),
            value: size_text.to_string(),
        });
    }
    Ok(Size::new(byte_count as u16))
}

/// Runs every annotation in ascending priority order, so bank overrides are
/// in place before anything that resolves banked addresses, and structural
/// directives run before pure formatting ones.
///
/// Returns the extra exploration seeds the directives produced. Any failure
/// aborts the whole run.
pub fn apply_annotations(
    space: &mut AddressSpace,
    sites: &[(RegionId, Addr, Annotation)],
) -> Result<Vec<(RegionId, Addr)>, AnnotationError> {
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by_key(|&index| sites[index].2.priority());

    let mut seeds = Vec::new();
    for index in order {
        let (region, addr, annotation) = &sites[index];
        let entry = lookup(annotation.name()).ok_or_else(|| {
            AnnotationError::UnknownAnnotation {
                name: annotation.name().to_string(),
            }
        })?;
        (entry.handler)(space, *region, *addr, annotation, &mut seeds)?;
    }
    Ok(seeds)
}

/// `code` — declare an entry point with no known caller.
fn code(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    _annotation: &Annotation,
    seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    space
        .region_mut(region)
        .add_auto_label(addr, None, ReferenceKind::Jp);
    seeds.push((region, addr));
    Ok(())
}

/// `data [format] [size=N]` — claim N bytes (default one record) as a typed
/// data block. Pointer elements get `data` references attached to their
/// targets.
fn data(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    annotation: &Annotation,
    _seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    let format_text = annotation
        .arg(0)
        .or_else(|| annotation.kwarg("format"))
        .unwrap_or("b");
    let format = DataFormat::parse(format_text).ok_or_else(|| AnnotationError::InvalidArgument {
        name: "data".to_string(),
        value: format_text.to_string(),
    })?;
    let size = match annotation.kwarg("size") {
        Some(text) => {
            let count = parse_number(text).ok_or_else(|| AnnotationError::InvalidArgument {
                name: "data".to_string(),
                value: text.to_string(),
            })?;
            checked_span(space, region, addr, count as u32, "data", text)?
        }
        None => {
            let record = format.record_size();
            checked_span(space, region, addr, record.as_usize() as u32, "data", format_text)?
        }
    };

    let bank_context = space.region(region).bank();
    let pointers = pointer_targets(space, region, addr, &format, size);

    let target_region = space.region_mut(region);
    let block = target_region.create_block(BlockKind::Data(format), addr);
    if !target_region.grow_block(block, size, true) {
        return Err(AnnotationError::ClaimConflict {
            name: "data".to_string(),
            addr,
        });
    }
    for (site, target) in pointers {
        if let Some(id) = space.resolve(target, bank_context) {
            space
                .region_mut(id)
                .add_auto_label(target, Some(site), ReferenceKind::Data);
        }
    }
    Ok(())
}

/// Collects `(pointer address, pointed-to address)` pairs of every pointer
/// element across the records covered by `size`.
fn pointer_targets(
    space: &AddressSpace,
    region: RegionId,
    base: Addr,
    format: &DataFormat,
    size: Size,
) -> Vec<(Addr, Addr)> {
    let source = space.region(region);
    let mut pointers = Vec::new();
    let mut offset = Size::new(0);
    while offset < size {
        for elem in format.elems() {
            if offset >= size {
                break;
            }
            let site = base + offset;
            if *elem == DataElem::Pointer {
                if let Some(word) = source.word(site) {
                    pointers.push((site, Addr::new(word)));
                }
            }
            offset += elem.size();
        }
    }
    pointers
}

/// `jumptable size=N` — claim N little-endian entries and explore each one
/// as a `jp` target.
fn jumptable(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    annotation: &Annotation,
    seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    let text = annotation
        .kwarg("size")
        .ok_or_else(|| AnnotationError::MissingArgument {
            name: "jumptable".to_string(),
            what: "size=N entry count",
        })?;
    let entries = parse_number(text).ok_or_else(|| AnnotationError::InvalidArgument {
        name: "jumptable".to_string(),
        value: text.to_string(),
    })?;
    let table_size = checked_span(space, region, addr, entries as u32 * 2, "jumptable", text)?;

    let bank_context = space.region(region).bank();
    let targets: Vec<(Addr, Option<Addr>)> = (0..entries)
        .map(|n| {
            let site = addr + Size::new(2 * n);
            (site, space.region(region).word(site).map(Addr::new))
        })
        .collect();

    let table_region = space.region_mut(region);
    let block = table_region.create_block(BlockKind::JumpTable, addr);
    if !table_region.grow_block(block, table_size, true) {
        return Err(AnnotationError::ClaimConflict {
            name: "jumptable".to_string(),
            addr,
        });
    }

    for (site, target) in targets {
        let Some(target) = target else { continue };
        let Some(id) = space.resolve(target, bank_context) else {
            continue;
        };
        let entry_region = space.region_mut(id);
        if !entry_region.kind().is_code_eligible() {
            continue;
        }
        entry_region.add_auto_label(target, Some(site), ReferenceKind::Jp);
        seeds.push((id, target));
    }
    Ok(())
}

/// `=bank N` — record the bank known to be mapped while executing here.
fn bank_override(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    annotation: &Annotation,
    _seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    let text = annotation
        .arg(0)
        .ok_or_else(|| AnnotationError::MissingArgument {
            name: "=bank".to_string(),
            what: "bank number",
        })?;
    let bank = parse_number(text).ok_or_else(|| AnnotationError::InvalidArgument {
        name: "=bank".to_string(),
        value: text.to_string(),
    })?;
    let target = space.region_mut(region);
    target.set_bank_override(addr, Bank::new(bank));
    target.mark(addr, MarkSet::BANK);
    Ok(())
}

/// `=value` — render the operand here as a plain number, never a label.
fn value_mark(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    _annotation: &Annotation,
    _seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    space.region_mut(region).mark(addr, MarkSet::VALUE);
    Ok(())
}

/// `=ptr` — render the operand here symbolically even outside the ranges the
/// engine labels on its own.
fn ptr_mark(
    space: &mut AddressSpace,
    region: RegionId,
    addr: Addr,
    _annotation: &Annotation,
    _seeds: &mut Vec<(RegionId, Addr)>,
) -> Result<(), AnnotationError> {
    space.region_mut(region).mark(addr, MarkSet::PTR);
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pretty_assertions::assert_eq;

    use crate::metadata::LabelSlot;
    use crate::rom::RomImage;

    use super::*;

    fn space_with(code: &[(usize, &[u8])]) -> AddressSpace {
        let mut data = vec![0u8; 0x8000];
        for (offset, bytes) in code {
            data[*offset..*offset + bytes.len()].copy_from_slice(bytes);
        }
        AddressSpace::new(&RomImage::new(data))
    }

    fn site(text: &str, addr: u16) -> (RegionId, Addr, Annotation) {
        (RegionId::new(0), Addr::new(addr), Annotation::parse(text).unwrap())
    }

    #[test]
    fn bank_override_applies_before_code_regardless_of_input_order() {
        let mut space = space_with(&[]);
        let sites = vec![
            site("code", 0x0200),
            site("=bank 3", 0x0200),
        ];
        let seeds = apply_annotations(&mut space, &sites).unwrap();
        assert_eq!(seeds, vec![(RegionId::new(0), Addr::new(0x0200))]);
        assert_eq!(
            space.region(RegionId::new(0)).bank_override_at(Addr::new(0x0200)),
            Some(Bank::new(3))
        );
    }

    #[test]
    fn code_annotation_forces_a_global_label() {
        let mut space = space_with(&[]);
        let sites = vec![site("code", 0x0200)];
        apply_annotations(&mut space, &sites).unwrap();
        let label = space
            .region(RegionId::new(0))
            .label(Addr::new(0x0200))
            .and_then(LabelSlot::as_auto)
            .unwrap();
        assert!(label.is_forced_global());
    }

    #[test]
    fn data_annotation_claims_records_and_follows_pointers() {
        // Two records of `bp`: byte + pointer to 0x0300 / 0x0310.
        let mut space = space_with(&[(0x0200, &[0x01, 0x00, 0x03, 0x02, 0x10, 0x03])]);
        let sites = vec![site("data bp size=6", 0x0200)];
        apply_annotations(&mut space, &sites).unwrap();

        let region = space.region(RegionId::new(0));
        let block = region.block_at(Addr::new(0x0200)).unwrap();
        assert_eq!(region.block(block).size(), Size::new(6));
        assert!(region.label(Addr::new(0x0300)).is_some());
        assert!(region.label(Addr::new(0x0310)).is_some());
    }

    #[test]
    fn jumptable_annotation_seeds_every_entry() {
        let mut space = space_with(&[(0x0200, &[0x00, 0x03, 0x10, 0x03])]);
        let sites = vec![site("jumptable size=2", 0x0200)];
        let seeds = apply_annotations(&mut space, &sites).unwrap();
        assert_eq!(
            seeds,
            vec![
                (RegionId::new(0), Addr::new(0x0300)),
                (RegionId::new(0), Addr::new(0x0310)),
            ]
        );
        let region = space.region(RegionId::new(0));
        let block = region.block_at(Addr::new(0x0200)).unwrap();
        assert_eq!(region.block(block).kind(), &BlockKind::JumpTable);
    }

    #[test]
    fn oversized_jumptable_is_rejected_not_overflowed() {
        let mut space = space_with(&[]);
        let sites = vec![site("jumptable size=$8000", 0x0200)];
        assert_eq!(
            apply_annotations(&mut space, &sites),
            Err(AnnotationError::InvalidArgument {
                name: "jumptable".into(),
                value: "$8000".into(),
            })
        );
        // Nothing was claimed on the way to the error.
        assert_eq!(space.region(RegionId::new(0)).block_at(Addr::new(0x0200)), None);
    }

    #[test]
    fn data_span_past_the_region_end_is_rejected() {
        let mut space = space_with(&[]);
        let sites = vec![site("data b size=$ffff", 0x0200)];
        assert_eq!(
            apply_annotations(&mut space, &sites),
            Err(AnnotationError::InvalidArgument {
                name: "data".into(),
                value: "$ffff".into(),
            })
        );
    }

    #[test]
    fn conflicting_data_claim_is_fatal() {
        let mut space = space_with(&[]);
        let sites = vec![
            site("data b size=4", 0x0200),
            site("data b size=4", 0x0202),
        ];
        let result = apply_annotations(&mut space, &sites);
        assert_eq!(
            result,
            Err(AnnotationError::ClaimConflict {
                name: "data".into(),
                addr: Addr::new(0x0202),
            })
        );
    }
}
