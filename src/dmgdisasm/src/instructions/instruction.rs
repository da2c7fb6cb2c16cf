/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::addresses::{Addr, Size};

use super::{Condition, DecodeError, MemRef, Mnemonic, Operand, Reg16, Reg8};

/// One decoded instruction.
///
/// Never persisted anywhere: decoding is a pure function of the byte window
/// and the address, so anyone who needs an instruction decodes it again and
/// is guaranteed the same result.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Instruction {
    addr: Addr,
    mnemonic: Mnemonic,
    condition: Option<Condition>,
    operand0: Option<Operand>,
    operand1: Option<Operand>,
    size: Size,
}

/// Sequential operand-byte reader. Mirrors the wire order: opcode first, then
/// immediates little-endian.
struct Reader<'a> {
    bytes: &'a [u8],
    addr: Addr,
    opcode: u8,
    size: u16,
}

impl<'a> Reader<'a> {
    fn u8(&mut self) -> Result<u8, DecodeError> {
        let b = self
            .bytes
            .get(self.size as usize)
            .copied()
            .ok_or(DecodeError::TruncatedWindow {
                addr: self.addr,
                opcode: self.opcode,
            })?;
        self.size += 1;
        Ok(b)
    }

    fn i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.u8()? as i8)
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let lo = self.u8()?;
        let hi = self.u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Target of a relative branch: `addr + len + disp`. If that lands past
    /// the end of the fixed low bank it is folded back into the switchable
    /// window, which is where the surrounding code executes from once it has
    /// been relocated into a banked region.
    fn rel_target(&mut self) -> Result<Addr, DecodeError> {
        let disp = self.i8()? as i32;
        let mut target = self.addr.inner() as i32 + self.size as i32 + disp;
        if target > 0x4000 {
            target = (target & 0x3FFF) | 0x4000;
        }
        Ok(Addr::new(target as u16))
    }
}

/// The `B C D E H L [HL] A` operand column shared by the register-to-register
/// load matrix, the ALU matrix and the whole secondary page.
const fn slot(bits: u8) -> Operand {
    match bits & 0x07 {
        0 => Operand::Reg8(Reg8::B),
        1 => Operand::Reg8(Reg8::C),
        2 => Operand::Reg8(Reg8::D),
        3 => Operand::Reg8(Reg8::E),
        4 => Operand::Reg8(Reg8::H),
        5 => Operand::Reg8(Reg8::L),
        6 => Operand::Mem(MemRef::Hl),
        _ => Operand::Reg8(Reg8::A),
    }
}

const fn slot_bits(operand: &Operand) -> Option<u8> {
    match operand {
        Operand::Reg8(Reg8::B) => Some(0),
        Operand::Reg8(Reg8::C) => Some(1),
        Operand::Reg8(Reg8::D) => Some(2),
        Operand::Reg8(Reg8::E) => Some(3),
        Operand::Reg8(Reg8::H) => Some(4),
        Operand::Reg8(Reg8::L) => Some(5),
        Operand::Mem(MemRef::Hl) => Some(6),
        Operand::Reg8(Reg8::A) => Some(7),
        _ => None,
    }
}

const fn rr_bits(reg: Reg16) -> u8 {
    match reg {
        Reg16::Bc => 0,
        Reg16::De => 1,
        Reg16::Hl => 2,
        // SP in the load/arith encodings, AF in push/pop.
        Reg16::Sp | Reg16::Af => 3,
    }
}

impl Instruction {
    /// Decodes the instruction starting at `bytes[0]`, which must be the byte
    /// at `addr`. Pure and side-effect free.
    pub fn decode(bytes: &[u8], addr: Addr) -> Result<Self, DecodeError> {
        use super::Reg16::*;
        use super::Reg8::A;
        use Condition::*;
        use MemRef as M;
        use Mnemonic::*;
        use Operand::*;

        let opcode = *bytes.first().ok_or(DecodeError::TruncatedWindow {
            addr,
            opcode: 0x00,
        })?;
        let mut r = Reader {
            bytes,
            addr,
            opcode,
            size: 1,
        };

        let (mnemonic, condition, operand0, operand1) = match opcode {
            0x00 => (Nop, None, None, None),
            0x10 => (Stop, None, None, None),
            0x18 => (Jr, None, Some(Target(r.rel_target()?)), None),
            0x20 => (Jr, Some(Nz), Some(Target(r.rel_target()?)), None),
            0x28 => (Jr, Some(Z), Some(Target(r.rel_target()?)), None),
            0x30 => (Jr, Some(Nc), Some(Target(r.rel_target()?)), None),
            0x38 => (Jr, Some(C), Some(Target(r.rel_target()?)), None),

            0x01 => (Ld, None, Some(Reg16(Bc)), Some(Imm16(r.u16()?))),
            0x11 => (Ld, None, Some(Reg16(De)), Some(Imm16(r.u16()?))),
            0x21 => (Ld, None, Some(Reg16(Hl)), Some(Imm16(r.u16()?))),
            0x31 => (Ld, None, Some(Reg16(Sp)), Some(Imm16(r.u16()?))),

            0x02 => (Ld, None, Some(Mem(M::Bc)), Some(Reg8(A))),
            0x12 => (Ld, None, Some(Mem(M::De)), Some(Reg8(A))),
            0x22 => (Ld, None, Some(Mem(M::HlInc)), Some(Reg8(A))),
            0x32 => (Ld, None, Some(Mem(M::HlDec)), Some(Reg8(A))),
            0x0A => (Ld, None, Some(Reg8(A)), Some(Mem(M::Bc))),
            0x1A => (Ld, None, Some(Reg8(A)), Some(Mem(M::De))),
            0x2A => (Ld, None, Some(Reg8(A)), Some(Mem(M::HlInc))),
            0x3A => (Ld, None, Some(Reg8(A)), Some(Mem(M::HlDec))),

            0x03 => (Inc, None, Some(Reg16(Bc)), None),
            0x13 => (Inc, None, Some(Reg16(De)), None),
            0x23 => (Inc, None, Some(Reg16(Hl)), None),
            0x33 => (Inc, None, Some(Reg16(Sp)), None),
            0x0B => (Dec, None, Some(Reg16(Bc)), None),
            0x1B => (Dec, None, Some(Reg16(De)), None),
            0x2B => (Dec, None, Some(Reg16(Hl)), None),
            0x3B => (Dec, None, Some(Reg16(Sp)), None),

            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                (Inc, None, Some(slot(opcode >> 3)), None)
            }
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                (Dec, None, Some(slot(opcode >> 3)), None)
            }
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                (Ld, None, Some(slot(opcode >> 3)), Some(Imm8(r.u8()?)))
            }

            0x07 => (Rlca, None, None, None),
            0x17 => (Rla, None, None, None),
            0x27 => (Daa, None, None, None),
            0x37 => (Scf, None, None, None),
            0x0F => (Rrca, None, None, None),
            0x1F => (Rra, None, None, None),
            0x2F => (Cpl, None, None, None),
            0x3F => (Ccf, None, None, None),

            0x08 => (
                Ld,
                None,
                Some(Mem(M::Abs(Addr::new(r.u16()?)))),
                Some(Reg16(Sp)),
            ),

            0x09 => (Add, None, Some(Reg16(Hl)), Some(Reg16(Bc))),
            0x19 => (Add, None, Some(Reg16(Hl)), Some(Reg16(De))),
            0x29 => (Add, None, Some(Reg16(Hl)), Some(Reg16(Hl))),
            0x39 => (Add, None, Some(Reg16(Hl)), Some(Reg16(Sp))),

            0x76 => (Halt, None, None, None),
            0x40..=0x7F => (Ld, None, Some(slot(opcode >> 3)), Some(slot(opcode))),

            0x80..=0xBF => {
                let mnemonic = match (opcode >> 3) & 0x07 {
                    0 => Add,
                    1 => Adc,
                    2 => Sub,
                    3 => Sbc,
                    4 => And,
                    5 => Xor,
                    6 => Or,
                    _ => Cp,
                };
                (mnemonic, None, Some(Reg8(A)), Some(slot(opcode)))
            }

            0xC0 => (Ret, Some(Nz), None, None),
            0xC8 => (Ret, Some(Z), None, None),
            0xD0 => (Ret, Some(Nc), None, None),
            0xD8 => (Ret, Some(C), None, None),
            0xC9 => (Ret, None, None, None),
            0xD9 => (Reti, None, None, None),

            0xE0 => (Ldh, None, Some(Mem(M::High(r.u8()?))), Some(Reg8(A))),
            0xF0 => (Ldh, None, Some(Reg8(A)), Some(Mem(M::High(r.u8()?)))),
            0xE2 => (Ldh, None, Some(Mem(M::HighC)), Some(Reg8(A))),
            0xF2 => (Ldh, None, Some(Reg8(A)), Some(Mem(M::HighC))),

            0xC1 => (Pop, None, Some(Reg16(Bc)), None),
            0xD1 => (Pop, None, Some(Reg16(De)), None),
            0xE1 => (Pop, None, Some(Reg16(Hl)), None),
            0xF1 => (Pop, None, Some(Reg16(Af)), None),
            0xC5 => (Push, None, Some(Reg16(Bc)), None),
            0xD5 => (Push, None, Some(Reg16(De)), None),
            0xE5 => (Push, None, Some(Reg16(Hl)), None),
            0xF5 => (Push, None, Some(Reg16(Af)), None),

            0xC3 => (Jp, None, Some(Target(Addr::new(r.u16()?))), None),
            0xC2 => (Jp, Some(Nz), Some(Target(Addr::new(r.u16()?))), None),
            0xCA => (Jp, Some(Z), Some(Target(Addr::new(r.u16()?))), None),
            0xD2 => (Jp, Some(Nc), Some(Target(Addr::new(r.u16()?))), None),
            0xDA => (Jp, Some(C), Some(Target(Addr::new(r.u16()?))), None),
            0xE9 => (Jp, None, Some(Reg16(Hl)), None),

            0xCD => (Call, None, Some(Target(Addr::new(r.u16()?))), None),
            0xC4 => (Call, Some(Nz), Some(Target(Addr::new(r.u16()?))), None),
            0xCC => (Call, Some(Z), Some(Target(Addr::new(r.u16()?))), None),
            0xD4 => (Call, Some(Nc), Some(Target(Addr::new(r.u16()?))), None),
            0xDC => (Call, Some(C), Some(Target(Addr::new(r.u16()?))), None),

            0xC6 => (Add, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xD6 => (Sub, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xE6 => (And, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xF6 => (Or, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xCE => (Adc, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xDE => (Sbc, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xEE => (Xor, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),
            0xFE => (Cp, None, Some(Reg8(A)), Some(Imm8(r.u8()?))),

            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => (
                Rst,
                None,
                Some(Target(Addr::new((opcode & 0x38) as u16))),
                None,
            ),

            0xE8 => (Add, None, Some(Reg16(Sp)), Some(Simm8(r.i8()?))),
            0xF8 => (Ld, None, Some(Reg16(Hl)), Some(SpPlus(r.i8()?))),
            0xF9 => (Ld, None, Some(Reg16(Sp)), Some(Reg16(Hl))),

            0xEA => (
                Ld,
                None,
                Some(Mem(M::Abs(Addr::new(r.u16()?)))),
                Some(Reg8(A)),
            ),
            0xFA => (
                Ld,
                None,
                Some(Reg8(A)),
                Some(Mem(M::Abs(Addr::new(r.u16()?)))),
            ),

            0xF3 => (Di, None, None, None),
            0xFB => (Ei, None, None, None),

            0xCB => Self::decode_secondary(r.u8()?),

            // 0xD3 0xDB 0xDD 0xE3 0xE4 0xEB 0xEC 0xED 0xF4 0xFC 0xFD
            _ => return Err(DecodeError::UndefinedOpcode { addr, opcode }),
        };

        Ok(Self {
            addr,
            mnemonic,
            condition,
            operand0,
            operand1,
            size: Size::new(r.size),
        })
    }

    /// The `0xCB` page. Fully regular: the low three bits select the operand
    /// slot, the rest select the operation.
    const fn decode_secondary(
        opcode: u8,
    ) -> (Mnemonic, Option<Condition>, Option<Operand>, Option<Operand>) {
        use Mnemonic::*;

        let operand = slot(opcode);
        if opcode < 0x40 {
            let mnemonic = match (opcode >> 3) & 0x07 {
                0 => Rlc,
                1 => Rrc,
                2 => Rl,
                3 => Rr,
                4 => Sla,
                5 => Sra,
                6 => Swap,
                _ => Srl,
            };
            (mnemonic, None, Some(operand), None)
        } else {
            let mnemonic = match opcode >> 6 {
                1 => Bit,
                2 => Res,
                _ => Set,
            };
            (
                mnemonic,
                None,
                Some(Operand::Bit((opcode >> 3) & 0x07)),
                Some(operand),
            )
        }
    }

    #[must_use]
    pub const fn addr(&self) -> Addr {
        self.addr
    }

    #[must_use]
    pub const fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    #[must_use]
    pub const fn condition(&self) -> Option<Condition> {
        self.condition
    }

    #[must_use]
    pub const fn operand0(&self) -> Option<Operand> {
        self.operand0
    }

    #[must_use]
    pub const fn operand1(&self) -> Option<Operand> {
        self.operand1
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether execution can fall through to the following instruction.
    /// Conditional forms always can.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        match self.mnemonic {
            Mnemonic::Jp | Mnemonic::Jr | Mnemonic::Ret => self.condition.is_some(),
            Mnemonic::Reti => false,
            _ => true,
        }
    }

    /// The statically resolvable branch destination, for `jp`/`jr`/`call`/
    /// `rst` only. `jp hl` has no statically known destination and returns
    /// `None`, as does everything that is not a branch.
    #[must_use]
    pub const fn jump_target(&self) -> Option<Addr> {
        match (self.mnemonic, self.operand0) {
            (
                Mnemonic::Jp | Mnemonic::Jr | Mnemonic::Call | Mnemonic::Rst,
                Some(Operand::Target(target)),
            ) => Some(target),
            _ => None,
        }
    }

    /// Re-emits the exact bytes this instruction was decoded from.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        use super::Reg16::*;
        use super::Reg8::A;
        use MemRef as M;
        use Mnemonic::*;
        use Operand::{Imm8, Mem, Reg16, Reg8, Simm8, Target};

        let cond_bits = |c: Option<Condition>| c.map_or(0, |c| c.encoding_bits() << 3);

        match self.mnemonic {
            Nop => out.push(0x00),
            Stop => out.push(0x10),
            Halt => out.push(0x76),
            Di => out.push(0xF3),
            Ei => out.push(0xFB),
            Rlca => out.push(0x07),
            Rla => out.push(0x17),
            Daa => out.push(0x27),
            Scf => out.push(0x37),
            Rrca => out.push(0x0F),
            Rra => out.push(0x1F),
            Cpl => out.push(0x2F),
            Ccf => out.push(0x3F),
            Reti => out.push(0xD9),

            Ret => match self.condition {
                Some(c) => out.push(0xC0 | (c.encoding_bits() << 3)),
                None => out.push(0xC9),
            },

            Jp => match self.operand0 {
                Some(Reg16(Hl)) => out.push(0xE9),
                Some(Target(target)) => {
                    out.push(if self.condition.is_some() {
                        0xC2 | cond_bits(self.condition)
                    } else {
                        0xC3
                    });
                    out.extend_from_slice(&target.inner().to_le_bytes());
                }
                _ => unreachable!("malformed jp operand: {:?}", self),
            },

            Jr => match self.operand0 {
                Some(Target(target)) => {
                    out.push(if self.condition.is_some() {
                        0x20 | cond_bits(self.condition)
                    } else {
                        0x18
                    });
                    out.push(self.rel_displacement(target) as u8);
                }
                _ => unreachable!("malformed jr operand: {:?}", self),
            },

            Call => match self.operand0 {
                Some(Target(target)) => {
                    out.push(if self.condition.is_some() {
                        0xC4 | cond_bits(self.condition)
                    } else {
                        0xCD
                    });
                    out.extend_from_slice(&target.inner().to_le_bytes());
                }
                _ => unreachable!("malformed call operand: {:?}", self),
            },

            Rst => match self.operand0 {
                Some(Target(vector)) => out.push(0xC7 | (vector.inner() as u8 & 0x38)),
                _ => unreachable!("malformed rst operand: {:?}", self),
            },

            Push | Pop => match self.operand0 {
                Some(Reg16(rr)) => {
                    let base = if self.mnemonic == Push { 0xC5 } else { 0xC1 };
                    out.push(base | (rr_bits(rr) << 4));
                }
                _ => unreachable!("malformed push/pop operand: {:?}", self),
            },

            Inc | Dec => {
                let odd = self.mnemonic == Dec;
                match self.operand0 {
                    Some(Reg16(rr)) => {
                        out.push(if odd { 0x0B } else { 0x03 } | (rr_bits(rr) << 4))
                    }
                    Some(ref operand) => match slot_bits(operand) {
                        Some(bits) => {
                            out.push(if odd { 0x05 } else { 0x04 } | (bits << 3))
                        }
                        None => unreachable!("malformed inc/dec operand: {:?}", self),
                    },
                    None => unreachable!("malformed inc/dec operand: {:?}", self),
                }
            }

            Add | Adc | Sub | Sbc | And | Or | Xor | Cp => {
                let alu_bits = match self.mnemonic {
                    Add => 0,
                    Adc => 1,
                    Sub => 2,
                    Sbc => 3,
                    And => 4,
                    Xor => 5,
                    Or => 6,
                    _ => 7,
                };
                match (self.operand0, self.operand1) {
                    (Some(Reg16(Hl)), Some(Reg16(rr))) => out.push(0x09 | (rr_bits(rr) << 4)),
                    (Some(Reg16(Sp)), Some(Simm8(offset))) => {
                        out.push(0xE8);
                        out.push(offset as u8);
                    }
                    (Some(Reg8(A)), Some(Imm8(imm))) => {
                        out.push(0xC6 | (alu_bits << 3));
                        out.push(imm);
                    }
                    (Some(Reg8(A)), Some(ref src)) => match slot_bits(src) {
                        Some(bits) => out.push(0x80 | (alu_bits << 3) | bits),
                        None => unreachable!("malformed alu operand: {:?}", self),
                    },
                    _ => unreachable!("malformed alu operands: {:?}", self),
                }
            }

            Ldh => match (self.operand0, self.operand1) {
                (Some(Mem(M::High(n))), Some(Reg8(A))) => {
                    out.push(0xE0);
                    out.push(n);
                }
                (Some(Reg8(A)), Some(Mem(M::High(n)))) => {
                    out.push(0xF0);
                    out.push(n);
                }
                (Some(Mem(M::HighC)), Some(Reg8(A))) => out.push(0xE2),
                (Some(Reg8(A)), Some(Mem(M::HighC))) => out.push(0xF2),
                _ => unreachable!("malformed ldh operands: {:?}", self),
            },

            Ld => self.encode_ld(out),

            Rlc | Rrc | Rl | Rr | Sla | Sra | Swap | Srl => {
                let op_bits = match self.mnemonic {
                    Rlc => 0,
                    Rrc => 1,
                    Rl => 2,
                    Rr => 3,
                    Sla => 4,
                    Sra => 5,
                    Swap => 6,
                    _ => 7,
                };
                match self.operand0.as_ref().and_then(slot_bits) {
                    Some(bits) => {
                        out.push(0xCB);
                        out.push((op_bits << 3) | bits);
                    }
                    None => unreachable!("malformed shift operand: {:?}", self),
                }
            }

            Bit | Res | Set => {
                let base = match self.mnemonic {
                    Bit => 0x40,
                    Res => 0x80,
                    _ => 0xC0,
                };
                match (self.operand0, self.operand1.as_ref().and_then(slot_bits)) {
                    (Some(Operand::Bit(index)), Some(bits)) => {
                        out.push(0xCB);
                        out.push(base | (index << 3) | bits);
                    }
                    _ => unreachable!("malformed bit operands: {:?}", self),
                }
            }
        }
    }

    fn encode_ld(&self, out: &mut Vec<u8>) {
        use super::Reg16::*;
        use super::Reg8::A;
        use MemRef as M;
        use Operand::*;

        match (self.operand0, self.operand1) {
            (Some(Reg16(rr)), Some(Imm16(imm))) => {
                out.push(0x01 | (rr_bits(rr) << 4));
                out.extend_from_slice(&imm.to_le_bytes());
            }
            (Some(Mem(M::Bc)), Some(Reg8(A))) => out.push(0x02),
            (Some(Mem(M::De)), Some(Reg8(A))) => out.push(0x12),
            (Some(Mem(M::HlInc)), Some(Reg8(A))) => out.push(0x22),
            (Some(Mem(M::HlDec)), Some(Reg8(A))) => out.push(0x32),
            (Some(Reg8(A)), Some(Mem(M::Bc))) => out.push(0x0A),
            (Some(Reg8(A)), Some(Mem(M::De))) => out.push(0x1A),
            (Some(Reg8(A)), Some(Mem(M::HlInc))) => out.push(0x2A),
            (Some(Reg8(A)), Some(Mem(M::HlDec))) => out.push(0x3A),
            (Some(Mem(M::Abs(target))), Some(Reg16(Sp))) => {
                out.push(0x08);
                out.extend_from_slice(&target.inner().to_le_bytes());
            }
            (Some(Mem(M::Abs(target))), Some(Reg8(A))) => {
                out.push(0xEA);
                out.extend_from_slice(&target.inner().to_le_bytes());
            }
            (Some(Reg8(A)), Some(Mem(M::Abs(target)))) => {
                out.push(0xFA);
                out.extend_from_slice(&target.inner().to_le_bytes());
            }
            (Some(Reg16(Hl)), Some(SpPlus(offset))) => {
                out.push(0xF8);
                out.push(offset as u8);
            }
            (Some(Reg16(Sp)), Some(Reg16(Hl))) => out.push(0xF9),
            (Some(ref dst), Some(Imm8(imm))) => match slot_bits(dst) {
                Some(bits) => {
                    out.push(0x06 | (bits << 3));
                    out.push(imm);
                }
                None => unreachable!("malformed ld operands: {:?}", self),
            },
            (Some(ref dst), Some(ref src)) => {
                match (slot_bits(dst), slot_bits(src)) {
                    (Some(dst_bits), Some(src_bits)) => {
                        out.push(0x40 | (dst_bits << 3) | src_bits)
                    }
                    _ => unreachable!("malformed ld operands: {:?}", self),
                }
            }
            _ => unreachable!("malformed ld operands: {:?}", self),
        }
    }

    /// Recovers the displacement byte of a relative branch. The decoded
    /// target may have been folded into the switchable window, so take the
    /// congruent value mod the bank size.
    fn rel_displacement(&self, target: Addr) -> i8 {
        let next = self.addr.inner() as i32 + self.size.inner() as i32;
        let diff = target.inner() as i32 - next;
        let disp = (diff.rem_euclid(0x4000) + 0x2000) % 0x4000 - 0x2000;
        disp as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_target_folds_into_switchable_window() {
        // jr +4 sitting at the very end of the low bank.
        let instr = Instruction::decode(&[0x18, 0x04], Addr::new(0x3FFE)).unwrap();
        assert_eq!(instr.jump_target(), Some(Addr::new(0x4004)));

        // Crossing the top of the switchable window folds back to its base.
        let instr = Instruction::decode(&[0x18, 0x04], Addr::new(0x7FFE)).unwrap();
        assert_eq!(instr.jump_target(), Some(Addr::new(0x4004)));

        let mut out = Vec::new();
        instr.encode_into(&mut out);
        assert_eq!(out, [0x18, 0x04]);
    }

    #[test]
    fn undefined_opcodes_refuse_to_decode() {
        for opcode in [
            0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
        ] {
            let err = Instruction::decode(&[opcode, 0x00, 0x00], Addr::new(0x0150)).unwrap_err();
            assert_eq!(
                err,
                DecodeError::UndefinedOpcode {
                    addr: Addr::new(0x0150),
                    opcode
                }
            );
        }
    }

    #[test]
    fn truncated_window_is_an_error() {
        let err = Instruction::decode(&[0xC3, 0x50], Addr::new(0x0100)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedWindow {
                addr: Addr::new(0x0100),
                opcode: 0xC3
            }
        );
    }

    #[test]
    fn fall_through() {
        let ret = Instruction::decode(&[0xC9], Addr::new(0x0000)).unwrap();
        assert!(!ret.has_next());
        let ret_nz = Instruction::decode(&[0xC0], Addr::new(0x0000)).unwrap();
        assert!(ret_nz.has_next());
        let reti = Instruction::decode(&[0xD9], Addr::new(0x0000)).unwrap();
        assert!(!reti.has_next());
        let jp_hl = Instruction::decode(&[0xE9], Addr::new(0x0000)).unwrap();
        assert!(!jp_hl.has_next());
        assert_eq!(jp_hl.jump_target(), None);
        let call = Instruction::decode(&[0xCD, 0x00, 0x40], Addr::new(0x0000)).unwrap();
        assert!(call.has_next());
        assert_eq!(call.jump_target(), Some(Addr::new(0x4000)));
    }
}
