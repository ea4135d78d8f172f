use super::super::addressing::Operand;
use super::super::Cpu;
use crate::cpu_bus::CpuBus;

impl Cpu {
    /// Binary add with carry. The D flag is not consulted.
    fn add_with_carry(&mut self, value: u8) {
        let carry = self.status.carry() as u16;
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;
        self.status.set_carry(sum > 0xFF);
        self.status
            .set_overflow((!(self.a ^ value) & (self.a ^ result) & 0x80) != 0);
        self.a = result;
        self.set_zero_negative_flags(result);
    }

    pub(super) fn adc(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.add_with_carry(value);
    }

    pub(super) fn sbc(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.add_with_carry(!value);
    }

    pub(super) fn and(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.a &= value;
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn ora(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.a |= value;
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn eor(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.a ^= value;
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn bit(&mut self, bus: &mut dyn CpuBus, operand: Operand) {
        let value = self.read_operand(bus, operand);
        self.status.set_zero(self.a & value == 0);
        self.status.set_negative(value & 0x80 != 0);
        self.status.set_overflow(value & 0x40 != 0);
    }

    /// CMP/CPX/CPY against `register`, which is left unchanged.
    pub(super) fn compare(&mut self, bus: &mut dyn CpuBus, operand: Operand, register: u8) {
        let value = self.read_operand(bus, operand);
        let result = register.wrapping_sub(value);
        self.status.set_carry(register >= value);
        self.status.set_zero(register == value);
        self.status.set_negative(result & 0x80 != 0);
    }
}
