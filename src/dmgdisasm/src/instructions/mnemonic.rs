/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// Every mnemonic of the primary page plus the `0xCB`-prefixed secondary page.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mnemonic {
    Nop,
    Stop,
    Halt,
    Jp,
    Jr,
    Ld,
    Ldh,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Or,
    Xor,
    Cp,
    Rst,
    Ret,
    Reti,
    Call,
    Inc,
    Dec,
    Push,
    Pop,
    Ei,
    Di,
    Rlca,
    Rla,
    Daa,
    Scf,
    Rrca,
    Rra,
    Cpl,
    Ccf,
    // Secondary page.
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
    Bit,
    Res,
    Set,
}

impl Mnemonic {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Nop => "nop",
            Mnemonic::Stop => "stop",
            Mnemonic::Halt => "halt",
            Mnemonic::Jp => "jp",
            Mnemonic::Jr => "jr",
            Mnemonic::Ld => "ld",
            Mnemonic::Ldh => "ldh",
            Mnemonic::Add => "add",
            Mnemonic::Adc => "adc",
            Mnemonic::Sub => "sub",
            Mnemonic::Sbc => "sbc",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
            Mnemonic::Cp => "cp",
            Mnemonic::Rst => "rst",
            Mnemonic::Ret => "ret",
            Mnemonic::Reti => "reti",
            Mnemonic::Call => "call",
            Mnemonic::Inc => "inc",
            Mnemonic::Dec => "dec",
            Mnemonic::Push => "push",
            Mnemonic::Pop => "pop",
            Mnemonic::Ei => "ei",
            Mnemonic::Di => "di",
            Mnemonic::Rlca => "rlca",
            Mnemonic::Rla => "rla",
            Mnemonic::Daa => "daa",
            Mnemonic::Scf => "scf",
            Mnemonic::Rrca => "rrca",
            Mnemonic::Rra => "rra",
            Mnemonic::Cpl => "cpl",
            Mnemonic::Ccf => "ccf",
            Mnemonic::Rlc => "rlc",
            Mnemonic::Rrc => "rrc",
            Mnemonic::Rl => "rl",
            Mnemonic::Rr => "rr",
            Mnemonic::Sla => "sla",
            Mnemonic::Sra => "sra",
            Mnemonic::Swap => "swap",
            Mnemonic::Srl => "srl",
            Mnemonic::Bit => "bit",
            Mnemonic::Res => "res",
            Mnemonic::Set => "set",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
