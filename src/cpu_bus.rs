//! Trait representing the minimal bus interface required by the 6502 core.

use crate::bus::AccessType;

pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    fn write_u16(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Attach the access permissions of the instruction about to touch the bus.
    /// Buses without permission checks can ignore it.
    fn set_access(&mut self, _access: AccessType) {}

    /// Edge-triggered; returning true acknowledges the request.
    fn poll_nmi(&mut self) -> bool {
        false
    }

    /// Level-triggered; the CPU masks it with the I flag.
    fn poll_irq(&mut self) -> bool {
        false
    }

    /// Exit code requested by a device (see the `exit` MMIO handler).
    fn poll_exit(&mut self) -> Option<u8> {
        None
    }
}
