/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod addr;
mod bank;
mod size;

pub use addr::Addr;
pub use bank::Bank;
pub use size::Size;
