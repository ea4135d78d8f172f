use super::super::addressing::Operand;
use super::super::status::StatusFlags;
use super::super::{Cpu, Halt, IRQ_VECTOR};
use crate::cpu_bus::CpuBus;

impl Cpu {
    pub(super) fn jmp(&mut self, operand: Operand) {
        self.pc = Self::operand_address(operand);
    }

    /// Pushes the address of the last byte of the JSR; RTS adds one back.
    pub(super) fn jsr(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let target = Self::operand_address(operand);
        self.push_word(bus, self.pc.wrapping_sub(1));
        self.pc = target;
    }

    pub(super) fn rts(&mut self, bus: &mut dyn CpuBus) {
        self.pc = self.pull_word(bus).wrapping_add(1);
    }

    pub(super) fn rti(&mut self, bus: &mut dyn CpuBus) {
        let value = self.pull(bus);
        self.status = StatusFlags::from_stack_byte(value);
        self.pc = self.pull_word(bus);
    }

    /// PC already points one past the opcode; the pushed return address
    /// skips the padding byte as well.
    pub(super) fn brk(&mut self, bus: &mut dyn CpuBus) {
        let pc = self.pc.wrapping_sub(1);
        self.push_word(bus, pc.wrapping_add(2));
        self.push(bus, self.status.to_stack_byte());
        self.status.set_interrupt_disable(true);
        self.pc = bus.read_u16(IRQ_VECTOR);
        if self.halt_on_brk {
            log::info!("BRK at ${:04X}, halting", pc);
            self.halt = Some(Halt::Break);
        }
    }
}
