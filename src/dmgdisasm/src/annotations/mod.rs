/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

mod annotation;
mod annotation_error;
mod registry;

pub use annotation::Annotation;
pub use annotation_error::AnnotationError;
pub use registry::apply_annotations;
