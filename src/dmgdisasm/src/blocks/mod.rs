/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod block;
mod block_kind;
mod data_format;

pub use block::{Block, BlockId};
pub use block_kind::BlockKind;
pub use data_format::{DataElem, DataFormat};
