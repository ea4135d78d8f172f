use super::super::addressing::Operand;
use super::super::Cpu;

impl Cpu {
    /// Returns the extra cycles: one when taken, one more when the target
    /// is on a different page from the next instruction.
    pub(super) fn branch(&mut self, operand: Operand, condition: bool) -> u32 {
        let offset = match operand {
            Operand::Relative(offset) => offset,
            _ => unreachable!("branch without a relative operand: {:?}", operand),
        };
        if !condition {
            return 0;
        }
        let next = self.pc;
        let target = next.wrapping_add(offset as i16 as u16);
        self.pc = target;
        if (next & 0xFF00) != (target & 0xFF00) {
            2
        } else {
            1
        }
    }
}
