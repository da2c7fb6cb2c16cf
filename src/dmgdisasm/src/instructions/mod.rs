/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod condition;
mod decode_error;
mod instruction;
mod mnemonic;
mod operand;

pub use condition::Condition;
pub use decode_error::DecodeError;
pub use instruction::Instruction;
pub use mnemonic::Mnemonic;
pub use operand::{MemRef, Operand, Reg16, Reg8};
