/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;
use core::fmt;

use crate::addresses::Size;

/// One element of a `data` annotation's record layout.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataElem {
    Byte,
    Word,
    /// A word that is known to point at an address; its target gets a `data`
    /// reference attached while claiming the block.
    Pointer,
}

impl DataElem {
    #[must_use]
    pub const fn size(self) -> Size {
        match self {
            DataElem::Byte => Size::new(1),
            DataElem::Word | DataElem::Pointer => Size::new(2),
        }
    }
}

/// Record layout of a typed data block, parsed from the `b`/`w`/`p` letters
/// of a `data format=...` annotation.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DataFormat {
    elems: Vec<DataElem>,
}

impl DataFormat {
    #[must_use]
    pub fn parse(format: &str) -> Option<Self> {
        let mut elems = Vec::with_capacity(format.len());
        for c in format.chars() {
            match c.to_ascii_lowercase() {
                'b' => elems.push(DataElem::Byte),
                'w' => elems.push(DataElem::Word),
                'p' => elems.push(DataElem::Pointer),
                _ => return None,
            }
        }
        if elems.is_empty() {
            None
        } else {
            Some(Self { elems })
        }
    }

    #[must_use]
    pub fn elems(&self) -> &[DataElem] {
        &self.elems
    }

    /// Byte size of one record.
    #[must_use]
    pub fn record_size(&self) -> Size {
        let mut total = Size::new(0);
        for elem in &self.elems {
            total += elem.size();
        }
        total
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.elems {
            let c = match elem {
                DataElem::Byte => 'b',
                DataElem::Word => 'w',
                DataElem::Pointer => 'p',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
