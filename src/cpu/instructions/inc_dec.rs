use super::super::addressing::Operand;
use super::super::Cpu;
use crate::cpu_bus::CpuBus;

impl Cpu {
    pub(super) fn inc(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |_, value| value.wrapping_add(1));
    }

    pub(super) fn dec(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        self.read_modify_write(bus, operand, |_, value| value.wrapping_sub(1));
    }

    pub(super) fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.set_zero_negative_flags(self.x);
    }

    pub(super) fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.set_zero_negative_flags(self.y);
    }

    pub(super) fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.set_zero_negative_flags(self.x);
    }

    pub(super) fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.set_zero_negative_flags(self.y);
    }
}
