/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod code_walker;
mod diagnostic;

pub use code_walker::{CodeWalker, NoHooks, WalkHooks};
pub use diagnostic::Diagnostic;
