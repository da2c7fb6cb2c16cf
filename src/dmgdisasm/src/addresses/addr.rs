/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::{fmt, ops};

use super::Size;

/// An address as seen by the CPU, somewhere in the 16-bit bus.
///
/// Which physical byte this actually names depends on the region that gets
/// resolved for it, since the `[0x4000, 0x8000)` window can map any switchable
/// ROM bank.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Addr {
    inner: u16,
}

impl Addr {
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self { inner: value }
    }

    #[must_use]
    pub const fn inner(&self) -> u16 {
        self.inner
    }

    #[must_use]
    pub const fn add_size(&self, size: &Size) -> Self {
        Self::new(self.inner + size.inner())
    }

    #[must_use]
    pub const fn sub_addr(&self, rhs: &Addr) -> Size {
        Size::new(self.inner - rhs.inner)
    }

    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.inner + 1)
    }
}

impl ops::Add<Size> for Addr {
    type Output = Addr;

    fn add(self, rhs: Size) -> Self::Output {
        self.add_size(&rhs)
    }
}

impl ops::Sub<Addr> for Addr {
    type Output = Size;

    fn sub(self, rhs: Addr) -> Self::Output {
        self.sub_addr(&rhs)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}", self.inner)
    }
}

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr {{ 0x{:04X} }}", self.inner)
    }
}
