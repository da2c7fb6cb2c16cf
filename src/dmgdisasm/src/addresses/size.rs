/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::{fmt, ops};

/// A byte count inside one region, so it never exceeds 16 bits either.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size {
    inner: u16,
}

impl Size {
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self { inner: value }
    }

    #[must_use]
    pub const fn inner(&self) -> u16 {
        self.inner
    }

    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.inner as usize
    }
}

impl ops::Add<Size> for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Self::Output {
        Self::new(self.inner + rhs.inner)
    }
}

impl ops::AddAssign<Size> for Size {
    fn add_assign(&mut self, rhs: Size) {
        self.inner += rhs.inner;
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.inner)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size {{ 0x{:X} }}", self.inner)
    }
}
