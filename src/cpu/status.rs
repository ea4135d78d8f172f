use bitflags::bitflags;

bitflags! {
    /// Processor status register (PS). One byte; every flag accessor below
    /// reads and writes the same bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        const BREAK = 0b00010000;
        const UNUSED = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

impl StatusFlags {
    /// Bits that only exist on the stack copy of the register.
    pub const STACK_ONLY: Self = Self::BREAK.union(Self::UNUSED);

    pub fn carry(self) -> bool {
        self.contains(Self::CARRY)
    }

    pub fn zero(self) -> bool {
        self.contains(Self::ZERO)
    }

    pub fn interrupt_disable(self) -> bool {
        self.contains(Self::INTERRUPT_DISABLE)
    }

    pub fn decimal(self) -> bool {
        self.contains(Self::DECIMAL)
    }

    pub fn overflow(self) -> bool {
        self.contains(Self::OVERFLOW)
    }

    pub fn negative(self) -> bool {
        self.contains(Self::NEGATIVE)
    }

    pub fn set_carry(&mut self, on: bool) {
        self.set(Self::CARRY, on);
    }

    pub fn set_zero(&mut self, on: bool) {
        self.set(Self::ZERO, on);
    }

    pub fn set_interrupt_disable(&mut self, on: bool) {
        self.set(Self::INTERRUPT_DISABLE, on);
    }

    pub fn set_decimal(&mut self, on: bool) {
        self.set(Self::DECIMAL, on);
    }

    pub fn set_overflow(&mut self, on: bool) {
        self.set(Self::OVERFLOW, on);
    }

    pub fn set_negative(&mut self, on: bool) {
        self.set(Self::NEGATIVE, on);
    }

    /// Value pushed by PHP and BRK.
    pub fn to_stack_byte(self) -> u8 {
        (self | Self::STACK_ONLY).bits()
    }

    /// Value restored by PLP and RTI; B and the unused bit are dropped.
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate(value) - Self::STACK_ONLY
    }
}

impl std::fmt::Display for StatusFlags {
    /// `NV-BDIZC`, upper case for set flags.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const NAMES: [(StatusFlags, char); 8] = [
            (StatusFlags::NEGATIVE, 'N'),
            (StatusFlags::OVERFLOW, 'V'),
            (StatusFlags::UNUSED, '-'),
            (StatusFlags::BREAK, 'B'),
            (StatusFlags::DECIMAL, 'D'),
            (StatusFlags::INTERRUPT_DISABLE, 'I'),
            (StatusFlags::ZERO, 'Z'),
            (StatusFlags::CARRY, 'C'),
        ];
        for (flag, c) in NAMES {
            let shown = if self.contains(flag) {
                c
            } else {
                c.to_ascii_lowercase()
            };
            write!(f, "{}", shown)?;
        }
        Ok(())
    }
}
