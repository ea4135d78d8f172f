use super::super::addressing::Operand;
use super::super::Cpu;
use crate::cpu_bus::CpuBus;

impl Cpu {
    pub(super) fn lda(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.a = self.read_operand(bus, operand);
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn ldx(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.x = self.read_operand(bus, operand);
        self.set_zero_negative_flags(self.x);
    }

    pub(super) fn ldy(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.y = self.read_operand(bus, operand);
        self.set_zero_negative_flags(self.y);
    }

    /// STA/STX/STY. Flags are untouched.
    pub(super) fn store(&mut self, bus: &mut dyn CpuBus, operand: Operand, value: u8) {
        bus.write(Self::operand_address(operand), value);
    }
}
