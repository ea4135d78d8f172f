use super::super::Cpu;

impl Cpu {
    pub(super) fn tax(&mut self) {
        self.x = self.a;
        self.set_zero_negative_flags(self.x);
    }

    pub(super) fn tay(&mut self) {
        self.y = self.a;
        self.set_zero_negative_flags(self.y);
    }

    pub(super) fn txa(&mut self) {
        self.a = self.x;
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn tya(&mut self) {
        self.a = self.y;
        self.set_zero_negative_flags(self.a);
    }

    pub(super) fn tsx(&mut self) {
        self.x = self.sp;
        self.set_zero_negative_flags(self.x);
    }

    // TXS is the only transfer that leaves the flags alone.
    pub(super) fn txs(&mut self) {
        self.sp = self.x;
    }
}
