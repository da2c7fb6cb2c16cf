/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

/// Canonical names of the hardware registers, as assemblers expect them.
/// Seeded into the IO window (and the IE register) as one-byte blocks so
/// references render symbolically and the export walk has owners for them.
pub(crate) const HARDWARE_REGISTERS: &[(u16, &str)] = &[
    (0xFF00, "rP1"),
    (0xFF01, "rSB"),
    (0xFF02, "rSC"),
    (0xFF04, "rDIV"),
    (0xFF05, "rTIMA"),
    (0xFF06, "rTMA"),
    (0xFF07, "rTAC"),
    (0xFF0F, "rIF"),
    (0xFF10, "rNR10"),
    (0xFF11, "rNR11"),
    (0xFF12, "rNR12"),
    (0xFF13, "rNR13"),
    (0xFF14, "rNR14"),
    (0xFF16, "rNR21"),
    (0xFF17, "rNR22"),
    (0xFF18, "rNR23"),
    (0xFF19, "rNR24"),
    (0xFF1A, "rNR30"),
    (0xFF1B, "rNR31"),
    (0xFF1C, "rNR32"),
    (0xFF1D, "rNR33"),
    (0xFF1E, "rNR34"),
    (0xFF20, "rNR41"),
    (0xFF21, "rNR42"),
    (0xFF22, "rNR43"),
    (0xFF23, "rNR44"),
    (0xFF24, "rNR50"),
    (0xFF25, "rNR51"),
    (0xFF26, "rNR52"),
    (0xFF40, "rLCDC"),
    (0xFF41, "rSTAT"),
    (0xFF42, "rSCY"),
    (0xFF43, "rSCX"),
    (0xFF44, "rLY"),
    (0xFF45, "rLYC"),
    (0xFF46, "rDMA"),
    (0xFF47, "rBGP"),
    (0xFF48, "rOBP0"),
    (0xFF49, "rOBP1"),
    (0xFF4A, "rWY"),
    (0xFF4B, "rWX"),
    (0xFF4D, "rKEY1"),
    (0xFF4F, "rVBK"),
    (0xFF51, "rHDMA1"),
    (0xFF52, "rHDMA2"),
    (0xFF53, "rHDMA3"),
    (0xFF54, "rHDMA4"),
    (0xFF55, "rHDMA5"),
    (0xFF56, "rRP"),
    (0xFF68, "rBCPS"),
    (0xFF69, "rBCPD"),
    (0xFF6A, "rOCPS"),
    (0xFF6B, "rOCPD"),
    (0xFF70, "rSVBK"),
    (0xFFFF, "rIE"),
];
