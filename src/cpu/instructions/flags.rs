use super::super::Cpu;

impl Cpu {
    /// Decimal arithmetic is not implemented; D is stored and nothing more.
    pub(super) fn sed(&mut self) {
        log::warn!(
            "SED at ${:04X}: decimal mode is unsupported, ADC/SBC stay binary",
            self.pc.wrapping_sub(1)
        );
        self.status.set_decimal(true);
    }
}
