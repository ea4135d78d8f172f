//! A 6502 instruction-set emulator with a permission-checked memory bus.
//!
//! The usual embedding is:
//!
//! ```no_run
//! use emu6502::{loader, Bus, Cpu, Unpaced};
//!
//! let mut bus = Bus::new();
//! loader::load_image(&mut bus, "program.bin", 0x8000).unwrap();
//! loader::set_reset_vector(&mut bus, 0x8000);
//!
//! let mut cpu = Cpu::new();
//! cpu.reset(&mut bus);
//! let outcome = cpu.run(&mut bus, 1_000_000, &mut Unpaced::new());
//! println!("{:?} after {} cycles", outcome.exit, outcome.cycles);
//! ```

pub mod bus;
pub mod cpu;
pub mod cpu_bus;
pub mod debug_flags;
pub mod loader;
pub mod memory;
pub mod mmio;
pub mod savestate;
pub mod shutdown;
pub mod timing;
pub mod viewer;

pub use bus::{AccessType, Bus, BusError, BusStats, MemoryMap};
pub use cpu::{Cpu, CpuError, Halt, RunExit, RunOutcome, StatusFlags};
pub use cpu_bus::CpuBus;
pub use timing::{Pacer, RealTimePacer, Unpaced};
