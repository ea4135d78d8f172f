use super::super::status::StatusFlags;
use super::super::Cpu;
use crate::cpu_bus::CpuBus;

impl Cpu {
    pub(super) fn pha(&mut self, bus: &mut dyn CpuBus) {
        self.push(bus, self.a);
    }

    pub(super) fn pla(&mut self, bus: &mut dyn CpuBus) {
        self.a = self.pull(bus);
        self.set_zero_negative_flags(self.a);
    }

    /// The pushed copy always has B and the unused bit set.
    pub(super) fn php(&mut self, bus: &mut dyn CpuBus) {
        self.push(bus, self.status.to_stack_byte());
    }

    pub(super) fn plp(&mut self, bus: &mut dyn CpuBus) {
        let value = self.pull(bus);
        self.status = StatusFlags::from_stack_byte(value);
    }
}
