use super::Cpu;
use crate::cpu_bus::CpuBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed
            | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Modes whose operand lives somewhere on the bus.
    pub fn is_memory(self) -> bool {
        use AddressingMode::*;
        matches!(
            self,
            ZeroPage
                | ZeroPageX
                | ZeroPageY
                | Absolute
                | AbsoluteX
                | AbsoluteY
                | Indirect
                | IndexedIndirect
                | IndirectIndexed
        )
    }
}

/// A resolved operand, ready for an instruction to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Memory { addr: u16, page_crossed: bool },
    Relative(i8),
}

impl Operand {
    fn at(addr: u16) -> Self {
        Operand::Memory {
            addr,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Operand::Memory {
            addr,
            page_crossed: (base & 0xFF00) != (addr & 0xFF00),
        }
    }

    pub fn page_crossed(&self) -> bool {
        matches!(
            self,
            Operand::Memory {
                page_crossed: true,
                ..
            }
        )
    }
}

impl Cpu {
    /// Fetch the operand bytes for `mode` and compute the effective address.
    /// Leaves PC on the next instruction.
    pub(super) fn resolve(&mut self, bus: &mut dyn CpuBus, mode: AddressingMode) -> Operand {
        match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch_byte(bus)),
            AddressingMode::ZeroPage => Operand::at(self.fetch_byte(bus) as u16),
            AddressingMode::ZeroPageX => {
                Operand::at(self.fetch_byte(bus).wrapping_add(self.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                Operand::at(self.fetch_byte(bus).wrapping_add(self.y) as u16)
            }
            AddressingMode::Absolute => Operand::at(self.fetch_word(bus)),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                Operand::indexed(base, self.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                Operand::indexed(base, self.y)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word(bus);
                // The high byte never carries into the next page.
                let hi_ptr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = bus.read(ptr) as u16;
                let hi = bus.read(hi_ptr) as u16;
                Operand::at((hi << 8) | lo)
            }
            AddressingMode::IndexedIndirect => {
                let zp = self.fetch_byte(bus).wrapping_add(self.x);
                Operand::at(read_zero_page_word(bus, zp))
            }
            AddressingMode::IndirectIndexed => {
                let zp = self.fetch_byte(bus);
                let base = read_zero_page_word(bus, zp);
                Operand::indexed(base, self.y)
            }
            AddressingMode::Relative => Operand::Relative(self.fetch_byte(bus) as i8),
        }
    }
}

/// Pointer read that wraps inside the zero page.
fn read_zero_page_word(bus: &mut dyn CpuBus, zp: u8) -> u16 {
    let lo = bus.read(zp as u16) as u16;
    let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
