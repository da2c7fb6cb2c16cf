/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod consistency;
mod export_consistency_error;

pub use consistency::{claimed_ranges, verify_consistency};
pub use export_consistency_error::ExportConsistencyError;
