/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod address_space;
mod hardware_io;
mod mark;
mod memory_region;
mod region_kind;

pub use address_space::AddressSpace;
pub use mark::MarkSet;
pub use memory_region::{MemoryRegion, RegionId};
pub use region_kind::RegionKind;

pub(crate) use memory_region::{BANK_SIZE, SWITCHABLE_BASE};
