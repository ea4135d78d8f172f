//! Declarative decode table for the documented NMOS 6502 instruction set.
//!
//! `cycles` is the full base cost of the instruction, opcode fetch included.
//! `page_penalty` marks read instructions that pay one more cycle when an
//! indexed address crosses a page. Branch penalties are added by the branch
//! itself. Nothing else charges cycles.

use super::addressing::AddressingMode;
use crate::bus::AccessType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = format!("{:?}", self).to_ascii_uppercase();
        f.pad(&name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u8,
    pub page_penalty: bool,
}

impl Opcode {
    /// Permissions attached to the bus once the operand has been fetched.
    ///
    /// Stack, vector and jump traffic may only touch RAM and ROM; data
    /// instructions with a memory operand may reach device registers.
    /// Register-only instructions do not touch the bus at all after the
    /// fetch.
    pub fn access(&self) -> AccessType {
        use Mnemonic::*;
        match self.mnemonic {
            Brk | Jsr | Rts | Rti | Jmp | Pha | Pla | Php | Plp => AccessType::FETCH,
            _ if self.mode.is_memory() => AccessType::DATA,
            _ => AccessType::NONE,
        }
    }
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
    }
}

/// Same as `op`, plus one cycle on a page crossing.
const fn opp(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
    }
}

use AddressingMode::{
    Absolute as Abs, AbsoluteX as AbsX, AbsoluteY as AbsY, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, IndexedIndirect as IndX, Indirect as Ind, IndirectIndexed as IndY,
    Relative as Rel, ZeroPage as Zp, ZeroPageX as ZpX, ZeroPageY as ZpY,
};
use Mnemonic::*;

const ENTRIES: &[(u8, Opcode)] = &[
    // Loads
    (0xA9, op(Lda, Imm, 2)),
    (0xA5, op(Lda, Zp, 3)),
    (0xB5, op(Lda, ZpX, 4)),
    (0xAD, op(Lda, Abs, 4)),
    (0xBD, opp(Lda, AbsX, 4)),
    (0xB9, opp(Lda, AbsY, 4)),
    (0xA1, op(Lda, IndX, 6)),
    (0xB1, opp(Lda, IndY, 5)),
    (0xA2, op(Ldx, Imm, 2)),
    (0xA6, op(Ldx, Zp, 3)),
    (0xB6, op(Ldx, ZpY, 4)),
    (0xAE, op(Ldx, Abs, 4)),
    (0xBE, opp(Ldx, AbsY, 4)),
    (0xA0, op(Ldy, Imm, 2)),
    (0xA4, op(Ldy, Zp, 3)),
    (0xB4, op(Ldy, ZpX, 4)),
    (0xAC, op(Ldy, Abs, 4)),
    (0xBC, opp(Ldy, AbsX, 4)),
    // Stores pay the indexed cost unconditionally
    (0x85, op(Sta, Zp, 3)),
    (0x95, op(Sta, ZpX, 4)),
    (0x8D, op(Sta, Abs, 4)),
    (0x9D, op(Sta, AbsX, 5)),
    (0x99, op(Sta, AbsY, 5)),
    (0x81, op(Sta, IndX, 6)),
    (0x91, op(Sta, IndY, 6)),
    (0x86, op(Stx, Zp, 3)),
    (0x96, op(Stx, ZpY, 4)),
    (0x8E, op(Stx, Abs, 4)),
    (0x84, op(Sty, Zp, 3)),
    (0x94, op(Sty, ZpX, 4)),
    (0x8C, op(Sty, Abs, 4)),
    // Arithmetic
    (0x69, op(Adc, Imm, 2)),
    (0x65, op(Adc, Zp, 3)),
    (0x75, op(Adc, ZpX, 4)),
    (0x6D, op(Adc, Abs, 4)),
    (0x7D, opp(Adc, AbsX, 4)),
    (0x79, opp(Adc, AbsY, 4)),
    (0x61, op(Adc, IndX, 6)),
    (0x71, opp(Adc, IndY, 5)),
    (0xE9, op(Sbc, Imm, 2)),
    (0xE5, op(Sbc, Zp, 3)),
    (0xF5, op(Sbc, ZpX, 4)),
    (0xED, op(Sbc, Abs, 4)),
    (0xFD, opp(Sbc, AbsX, 4)),
    (0xF9, opp(Sbc, AbsY, 4)),
    (0xE1, op(Sbc, IndX, 6)),
    (0xF1, opp(Sbc, IndY, 5)),
    // Logic
    (0x29, op(And, Imm, 2)),
    (0x25, op(And, Zp, 3)),
    (0x35, op(And, ZpX, 4)),
    (0x2D, op(And, Abs, 4)),
    (0x3D, opp(And, AbsX, 4)),
    (0x39, opp(And, AbsY, 4)),
    (0x21, op(And, IndX, 6)),
    (0x31, opp(And, IndY, 5)),
    (0x09, op(Ora, Imm, 2)),
    (0x05, op(Ora, Zp, 3)),
    (0x15, op(Ora, ZpX, 4)),
    (0x0D, op(Ora, Abs, 4)),
    (0x1D, opp(Ora, AbsX, 4)),
    (0x19, opp(Ora, AbsY, 4)),
    (0x01, op(Ora, IndX, 6)),
    (0x11, opp(Ora, IndY, 5)),
    (0x49, op(Eor, Imm, 2)),
    (0x45, op(Eor, Zp, 3)),
    (0x55, op(Eor, ZpX, 4)),
    (0x4D, op(Eor, Abs, 4)),
    (0x5D, opp(Eor, AbsX, 4)),
    (0x59, opp(Eor, AbsY, 4)),
    (0x41, op(Eor, IndX, 6)),
    (0x51, opp(Eor, IndY, 5)),
    (0x24, op(Bit, Zp, 3)),
    (0x2C, op(Bit, Abs, 4)),
    // Compare
    (0xC9, op(Cmp, Imm, 2)),
    (0xC5, op(Cmp, Zp, 3)),
    (0xD5, op(Cmp, ZpX, 4)),
    (0xCD, op(Cmp, Abs, 4)),
    (0xDD, opp(Cmp, AbsX, 4)),
    (0xD9, opp(Cmp, AbsY, 4)),
    (0xC1, op(Cmp, IndX, 6)),
    (0xD1, opp(Cmp, IndY, 5)),
    (0xE0, op(Cpx, Imm, 2)),
    (0xE4, op(Cpx, Zp, 3)),
    (0xEC, op(Cpx, Abs, 4)),
    (0xC0, op(Cpy, Imm, 2)),
    (0xC4, op(Cpy, Zp, 3)),
    (0xCC, op(Cpy, Abs, 4)),
    // Shifts and rotates
    (0x0A, op(Asl, Acc, 2)),
    (0x06, op(Asl, Zp, 5)),
    (0x16, op(Asl, ZpX, 6)),
    (0x0E, op(Asl, Abs, 6)),
    (0x1E, op(Asl, AbsX, 7)),
    (0x4A, op(Lsr, Acc, 2)),
    (0x46, op(Lsr, Zp, 5)),
    (0x56, op(Lsr, ZpX, 6)),
    (0x4E, op(Lsr, Abs, 6)),
    (0x5E, op(Lsr, AbsX, 7)),
    (0x2A, op(Rol, Acc, 2)),
    (0x26, op(Rol, Zp, 5)),
    (0x36, op(Rol, ZpX, 6)),
    (0x2E, op(Rol, Abs, 6)),
    (0x3E, op(Rol, AbsX, 7)),
    (0x6A, op(Ror, Acc, 2)),
    (0x66, op(Ror, Zp, 5)),
    (0x76, op(Ror, ZpX, 6)),
    (0x6E, op(Ror, Abs, 6)),
    (0x7E, op(Ror, AbsX, 7)),
    // Increment / decrement
    (0xE6, op(Inc, Zp, 5)),
    (0xF6, op(Inc, ZpX, 6)),
    (0xEE, op(Inc, Abs, 6)),
    (0xFE, op(Inc, AbsX, 7)),
    (0xC6, op(Dec, Zp, 5)),
    (0xD6, op(Dec, ZpX, 6)),
    (0xCE, op(Dec, Abs, 6)),
    (0xDE, op(Dec, AbsX, 7)),
    (0xE8, op(Inx, Imp, 2)),
    (0xC8, op(Iny, Imp, 2)),
    (0xCA, op(Dex, Imp, 2)),
    (0x88, op(Dey, Imp, 2)),
    // Branches
    (0x90, op(Bcc, Rel, 2)),
    (0xB0, op(Bcs, Rel, 2)),
    (0xF0, op(Beq, Rel, 2)),
    (0xD0, op(Bne, Rel, 2)),
    (0x30, op(Bmi, Rel, 2)),
    (0x10, op(Bpl, Rel, 2)),
    (0x50, op(Bvc, Rel, 2)),
    (0x70, op(Bvs, Rel, 2)),
    // Jumps, subroutines and interrupts
    (0x4C, op(Jmp, Abs, 3)),
    (0x6C, op(Jmp, Ind, 5)),
    (0x20, op(Jsr, Abs, 6)),
    (0x60, op(Rts, Imp, 6)),
    (0x40, op(Rti, Imp, 6)),
    (0x00, op(Brk, Imp, 7)),
    // Stack
    (0x48, op(Pha, Imp, 3)),
    (0x08, op(Php, Imp, 3)),
    (0x68, op(Pla, Imp, 4)),
    (0x28, op(Plp, Imp, 4)),
    // Transfers
    (0xAA, op(Tax, Imp, 2)),
    (0xA8, op(Tay, Imp, 2)),
    (0x8A, op(Txa, Imp, 2)),
    (0x98, op(Tya, Imp, 2)),
    (0xBA, op(Tsx, Imp, 2)),
    (0x9A, op(Txs, Imp, 2)),
    // Flags
    (0x18, op(Clc, Imp, 2)),
    (0x38, op(Sec, Imp, 2)),
    (0x58, op(Cli, Imp, 2)),
    (0x78, op(Sei, Imp, 2)),
    (0xB8, op(Clv, Imp, 2)),
    (0xD8, op(Cld, Imp, 2)),
    (0xF8, op(Sed, Imp, 2)),
    (0xEA, op(Nop, Imp, 2)),
];

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < ENTRIES.len() {
        let (code, opcode) = ENTRIES[i];
        table[code as usize] = Some(opcode);
        i += 1;
    }
    table
}

pub static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

pub fn decode(opcode: u8) -> Option<&'static Opcode> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
