//! Instruction semantics, grouped by family. Each handler receives an
//! already resolved operand and returns any cycles beyond the table cost.

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use super::addressing::Operand;
use super::opcodes::Mnemonic;
use super::Cpu;
use crate::cpu_bus::CpuBus;

impl Cpu {
    pub(super) fn execute(
        &mut self,
        bus: &mut dyn CpuBus,
        mnemonic: Mnemonic,
        operand: Operand,
    ) -> u32 {
        use Mnemonic::*;
        match mnemonic {
            Lda => self.lda(bus, operand),
            Ldx => self.ldx(bus, operand),
            Ldy => self.ldy(bus, operand),
            Sta => self.store(bus, operand, self.a),
            Stx => self.store(bus, operand, self.x),
            Sty => self.store(bus, operand, self.y),

            Adc => self.adc(bus, operand),
            Sbc => self.sbc(bus, operand),
            And => self.and(bus, operand),
            Ora => self.ora(bus, operand),
            Eor => self.eor(bus, operand),
            Bit => self.bit(bus, operand),
            Cmp => self.compare(bus, operand, self.a),
            Cpx => self.compare(bus, operand, self.x),
            Cpy => self.compare(bus, operand, self.y),

            Asl => self.asl(bus, operand),
            Lsr => self.lsr(bus, operand),
            Rol => self.rol(bus, operand),
            Ror => self.ror(bus, operand),

            Inc => self.inc(bus, operand),
            Dec => self.dec(bus, operand),
            Inx => self.inx(),
            Iny => self.iny(),
            Dex => self.dex(),
            Dey => self.dey(),

            Bcc => return self.branch(operand, !self.status.carry()),
            Bcs => return self.branch(operand, self.status.carry()),
            Beq => return self.branch(operand, self.status.zero()),
            Bne => return self.branch(operand, !self.status.zero()),
            Bmi => return self.branch(operand, self.status.negative()),
            Bpl => return self.branch(operand, !self.status.negative()),
            Bvc => return self.branch(operand, !self.status.overflow()),
            Bvs => return self.branch(operand, self.status.overflow()),

            Jmp => self.jmp(operand),
            Jsr => self.jsr(bus, operand),
            Rts => self.rts(bus),
            Rti => self.rti(bus),
            Brk => self.brk(bus),

            Pha => self.pha(bus),
            Php => self.php(bus),
            Pla => self.pla(bus),
            Plp => self.plp(bus),

            Tax => self.tax(),
            Tay => self.tay(),
            Txa => self.txa(),
            Tya => self.tya(),
            Tsx => self.tsx(),
            Txs => self.txs(),

            Clc => self.status.set_carry(false),
            Sec => self.status.set_carry(true),
            Cli => self.status.set_interrupt_disable(false),
            Sei => self.status.set_interrupt_disable(true),
            Clv => self.status.set_overflow(false),
            Cld => self.status.set_decimal(false),
            Sed => self.sed(),
            Nop => {}
        }
        0
    }

    /// Value of a read-class operand.
    fn read_operand(&mut self, bus: &mut dyn CpuBus, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Memory { addr, .. } => bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied | Operand::Relative(_) => {
                unreachable!("{:?} has no value", operand)
            }
        }
    }

    fn operand_address(operand: Operand) -> u16 {
        match operand {
            Operand::Memory { addr, .. } => addr,
            _ => unreachable!("{:?} has no address", operand),
        }
    }

    /// Apply `f` to the accumulator or a memory cell, write the result back
    /// to the same place, and set Z/N from what was written.
    fn read_modify_write(
        &mut self,
        bus: &mut dyn CpuBus,
        operand: Operand,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) {
        let result = match operand {
            Operand::Accumulator => {
                let a = self.a;
                let result = f(self, a);
                self.a = result;
                result
            }
            _ => {
                let addr = Self::operand_address(operand);
                let value = bus.read(addr);
                let result = f(self, value);
                bus.write(addr, result);
                result
            }
        };
        self.set_zero_negative_flags(result);
    }
}
