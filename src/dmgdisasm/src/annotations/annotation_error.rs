/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::string::String;
use core::fmt;

use crate::addresses::Addr;

/// A directive that could not be honored. Always fatal to the run: silently
/// ignoring a directive would silently produce a wrong disassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    UnknownAnnotation { name: String },
    MissingArgument { name: String, what: &'static str },
    InvalidArgument { name: String, value: String },
    /// The bytes an annotation wanted to claim are already owned.
    ClaimConflict { name: String, addr: Addr },
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationError::UnknownAnnotation { name } => {
                write!(f, "unknown annotation `{}`", name)
            }
            AnnotationError::MissingArgument { name, what } => {
                write!(f, "annotation `{}` is missing its {}", name, what)
            }
            AnnotationError::InvalidArgument { name, value } => {
                write!(f, "annotation `{}`: cannot parse `{}`", name, value)
            }
            AnnotationError::ClaimConflict { name, addr } => {
                write!(
                    f,
                    "annotation `{}` at {}: bytes are already claimed",
                    name, addr
                )
            }
        }
    }
}

impl core::error::Error for AnnotationError {}
