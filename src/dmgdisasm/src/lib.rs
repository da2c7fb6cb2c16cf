/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

extern crate alloc;

pub mod addresses;
pub mod instructions;
pub mod blocks;
pub mod metadata;
pub mod memory;
pub mod rom;
pub mod analysis;
pub mod annotations;
pub mod export;

mod disassembler;

pub use disassembler::Disassembler;
