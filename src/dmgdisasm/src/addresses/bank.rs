/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// A switchable ROM bank number. Bank 0 is the fixed low bank.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bank {
    inner: u16,
}

impl Bank {
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self { inner: value }
    }

    #[must_use]
    pub const fn inner(&self) -> u16 {
        self.inner
    }

    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.inner == 0
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.inner)
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bank {{ {} }}", self.inner)
    }
}
