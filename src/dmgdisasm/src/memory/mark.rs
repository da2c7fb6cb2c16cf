/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use bitflags::bitflags;

bitflags! {
    /// Classification tags attached to single addresses, usually coming from
    /// annotations or external instrumentation dumps. The engine itself only
    /// reads `BANK` overrides; the rest steers value formatting downstream.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    pub struct MarkSet: u16 {
        const CODE = 1 << 0;
        const DATA = 1 << 1;
        const PTR_LOW = 1 << 2;
        const PTR_HIGH = 1 << 3;
        const WORD_LOW = 1 << 4;
        const WORD_HIGH = 1 << 5;
        const BANK = 1 << 6;
        const VALUE = 1 << 7;
        const SIGNED = 1 << 8;
        const PTR = 1 << 9;
    }
}
