use bitflags::bitflags;

bitflags! {
    /// Regions an instruction is allowed to touch. Derived from the opcode
    /// and attached to the bus before the instruction's first data access.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessType: u8 {
        const RAM = 0b0000_0001;
        const ROM = 0b0000_0010;
        const MMIO = 0b0000_0100;
    }
}

impl AccessType {
    pub const NONE: Self = Self::empty();
    /// Instruction stream, stack and vectors.
    pub const FETCH: Self = Self::RAM.union(Self::ROM);
    /// Instructions whose operand may be a device register.
    pub const DATA: Self = Self::RAM.union(Self::ROM).union(Self::MMIO);
}

impl Default for AccessType {
    fn default() -> Self {
        Self::all()
    }
}
