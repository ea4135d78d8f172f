pub mod addressing;
mod instructions;
pub mod opcodes;
mod status;


pub use addressing::{AddressingMode, Operand};
pub use opcodes::{Mnemonic, Opcode};
pub use status::StatusFlags;

use crate::bus::AccessType;
use crate::cpu_bus::CpuBus;
use crate::savestate::CpuSaveState;
use crate::timing::Pacer;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;
pub const STACK_BASE: u16 = 0x0100;
pub const RESET_SP: u8 = 0xFD;

/// Cost of taking an NMI or IRQ.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Why the CPU stopped. Latched until `reset` or `resume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Break,
    IllegalOpcode(u8),
    ExitRequested(u8),
}

impl std::fmt::Display for Halt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Halt::Break => write!(f, "BRK"),
            Halt::IllegalOpcode(op) => write!(f, "illegal opcode ${:02X}", op),
            Halt::ExitRequested(code) => write!(f, "exit requested with code {}", code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    IllegalOpcode { opcode: u8, pc: u16 },
}

impl std::fmt::Display for CpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CpuError::IllegalOpcode { opcode, pc } => {
                write!(f, "illegal opcode ${:02X} at ${:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    BudgetExhausted,
    Halted(Halt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Cycles spent by this call; may overshoot the budget by part of one
    /// instruction.
    pub cycles: u64,
    pub exit: RunExit,
}

pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: StatusFlags,
    /// Total cycles since reset.
    pub cycles: u64,
    /// Treat BRK as a halt once it has pushed state and loaded the vector.
    pub halt_on_brk: bool,
    halt: Option<Halt>,
    trace: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0,
            status: StatusFlags::empty(),
            cycles: 0,
            halt_on_brk: true,
            halt: None,
            trace: crate::debug_flags::trace(),
        }
    }

    pub fn reset(&mut self, bus: &mut dyn CpuBus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.status = StatusFlags::empty();
        bus.set_access(AccessType::FETCH);
        self.pc = bus.read_u16(RESET_VECTOR);
        self.cycles = 0;
        self.halt = None;
        log::debug!("reset: PC=${:04X}", self.pc);
    }

    /// Packed status byte.
    pub fn ps(&self) -> u8 {
        self.status.bits()
    }

    pub fn set_ps(&mut self, value: u8) {
        self.status = StatusFlags::from_bits_truncate(value);
    }

    pub fn halted(&self) -> Option<Halt> {
        self.halt
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Clear a latched halt so `run` continues from the current PC.
    pub fn resume(&mut self) {
        self.halt = None;
    }

    pub fn set_trace(&mut self, on: bool) {
        self.trace = on;
    }

    /// Execute one instruction, or take one pending interrupt. Returns the
    /// cycles consumed.
    pub fn step(&mut self, bus: &mut dyn CpuBus) -> Result<u32, CpuError> {
        if bus.poll_nmi() {
            self.nmi(bus);
            return Ok(INTERRUPT_CYCLES);
        }
        if !self.status.interrupt_disable() && bus.poll_irq() {
            self.irq(bus);
            return Ok(INTERRUPT_CYCLES);
        }

        let pc = self.pc;
        bus.set_access(AccessType::FETCH);
        let code = self.fetch_byte(bus);
        let opcode = match opcodes::decode(code) {
            Some(opcode) => *opcode,
            None => {
                self.cycles += 1;
                self.halt = Some(Halt::IllegalOpcode(code));
                log::error!("illegal opcode ${:02X} at ${:04X}", code, pc);
                return Err(CpuError::IllegalOpcode { opcode: code, pc });
            }
        };

        let operand = self.resolve(bus, opcode.mode);
        if self.trace {
            log::debug!(
                "{:04X}  {:02X}  {:<4}{:?}  {}",
                pc,
                code,
                opcode.mnemonic,
                operand,
                self
            );
        }

        bus.set_access(opcode.access());
        let mut cycles = opcode.cycles as u32;
        if opcode.page_penalty && operand.page_crossed() {
            cycles += 1;
        }
        cycles += self.execute(bus, opcode.mnemonic, operand);
        self.cycles += cycles as u64;

        if let Some(code) = bus.poll_exit() {
            log::info!("exit requested by device: code {}", code);
            self.halt = Some(Halt::ExitRequested(code));
        }
        Ok(cycles)
    }

    /// Run until `budget` cycles have been spent or the CPU halts. Every
    /// instruction's cost is reported to `pacer`.
    pub fn run(&mut self, bus: &mut dyn CpuBus, budget: u64, pacer: &mut dyn Pacer) -> RunOutcome {
        let mut spent = 0u64;
        loop {
            if let Some(halt) = self.halt {
                return RunOutcome {
                    cycles: spent,
                    exit: RunExit::Halted(halt),
                };
            }
            if spent >= budget {
                return RunOutcome {
                    cycles: spent,
                    exit: RunExit::BudgetExhausted,
                };
            }
            // An illegal opcode has already latched its halt and costs one cycle.
            let cycles = self.step(bus).unwrap_or(1) as u64;
            spent += cycles;
            pacer.advance(cycles);
        }
    }

    pub fn nmi(&mut self, bus: &mut dyn CpuBus) {
        self.interrupt(bus, NMI_VECTOR);
    }

    /// Ignored while I is set.
    pub fn irq(&mut self, bus: &mut dyn CpuBus) {
        if self.status.interrupt_disable() {
            return;
        }
        self.interrupt(bus, IRQ_VECTOR);
    }

    fn interrupt(&mut self, bus: &mut dyn CpuBus, vector: u16) {
        bus.set_access(AccessType::FETCH);
        self.push_word(bus, self.pc);
        let pushed = (self.status - StatusFlags::BREAK) | StatusFlags::UNUSED;
        self.push(bus, pushed.bits());
        self.status.set_interrupt_disable(true);
        self.pc = bus.read_u16(vector);
        self.cycles += INTERRUPT_CYCLES as u64;
    }

    pub fn save_state(&self) -> CpuSaveState {
        CpuSaveState {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            p: self.ps(),
            cycles: self.cycles,
            halt_on_brk: self.halt_on_brk,
        }
    }

    pub fn load_state(&mut self, state: &CpuSaveState) {
        self.a = state.a;
        self.x = state.x;
        self.y = state.y;
        self.sp = state.sp;
        self.pc = state.pc;
        self.set_ps(state.p);
        self.cycles = state.cycles;
        self.halt_on_brk = state.halt_on_brk;
        self.halt = None;
    }

    fn fetch_byte(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch_word(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let lo = self.fetch_byte(bus) as u16;
        let hi = self.fetch_byte(bus) as u16;
        (hi << 8) | lo
    }

    fn push(&mut self, bus: &mut dyn CpuBus, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    fn push_word(&mut self, bus: &mut dyn CpuBus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    fn pull_word(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }

    fn set_zero_negative_flags(&mut self, value: u8) {
        self.status.set_zero(value == 0);
        self.status.set_negative(value & 0x80 != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} PC:{:04X} P:{} CYC:{}",
            self.a, self.x, self.y, self.sp, self.pc, self.status, self.cycles
        )
    }
}
