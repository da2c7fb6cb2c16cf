/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// Which segment of the bus a region models.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegionKind {
    RomBank,
    Vram,
    Sram,
    Wram,
    Oam,
    Io,
    Hram,
    IeRegister,
}

impl RegionKind {
    /// Only ROM banks can hold executable code.
    #[must_use]
    pub const fn is_code_eligible(self) -> bool {
        matches!(self, RegionKind::RomBank)
    }

    /// Regions with concrete backing bytes. Everything else only carries
    /// structural classification.
    #[must_use]
    pub const fn has_backing(self) -> bool {
        matches!(self, RegionKind::RomBank)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RegionKind::RomBank => "rom",
            RegionKind::Vram => "vram",
            RegionKind::Sram => "sram",
            RegionKind::Wram => "wram",
            RegionKind::Oam => "oam",
            RegionKind::Io => "io",
            RegionKind::Hram => "hram",
            RegionKind::IeRegister => "ie",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
