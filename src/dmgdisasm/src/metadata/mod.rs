/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod auto_label;
mod label;
mod localizer;
mod reference_kind;

pub use auto_label::AutoLabel;
pub use label::{LabelScope, LabelSlot};
pub use localizer::localize_labels;
pub use reference_kind::ReferenceKind;
