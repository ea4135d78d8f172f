use super::super::addressing::Operand;
use super::super::Cpu;
use crate::cpu_bus::CpuBus;

// Z and N always come from the value written back, accumulator or memory.

impl Cpu {
    pub(super) fn asl(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |cpu, value| {
            cpu.status.set_carry(value & 0x80 != 0);
            value << 1
        });
    }

    pub(super) fn lsr(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |cpu, value| {
            cpu.status.set_carry(value & 0x01 != 0);
            value >> 1
        });
    }

    pub(super) fn rol(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |cpu, value| {
            let carry_in = cpu.status.carry() as u8;
            cpu.status.set_carry(value & 0x80 != 0);
            (value << 1) | carry_in
        });
    }

    pub(super) fn ror(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |cpu, value| {
            let carry_in = (cpu.status.carry() as u8) << 7;
            cpu.status.set_carry(value & 0x01 != 0);
            (value >> 1) | carry_in
        });
    }
}
