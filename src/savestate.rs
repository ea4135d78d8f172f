use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::memory::MEMORY_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSaveState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub p: u8,
    pub cycles: u64,
    pub halt_on_brk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub cpu: CpuSaveState,
    /// Full 64 KiB image, ROM and device windows included.
    pub memory: Vec<u8>,
}

impl SaveState {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn capture(cpu: &Cpu, bus: &Bus) -> Self {
        SaveState {
            version: Self::CURRENT_VERSION,
            cpu: cpu.save_state(),
            memory: bus.memory_image(),
        }
    }

    /// Device registrations are configuration, not state, and stay as they are.
    pub fn restore(&self, cpu: &mut Cpu, bus: &mut Bus) {
        cpu.load_state(&self.cpu);
        bus.restore_memory_image(&self.memory);
    }

    pub fn save_to_file(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        let data = bincode::serialize(self)?;
        std::fs::write(filename, data)?;
        log::info!("Save state written to: {}", filename);
        Ok(())
    }

    pub fn load_from_file(filename: &str) -> Result<SaveState, Box<dyn std::error::Error>> {
        let data = std::fs::read(filename)?;
        let save_state: SaveState = bincode::deserialize(&data)?;
        if save_state.version > Self::CURRENT_VERSION {
            return Err(format!(
                "Save state version {} is not supported (current: {})",
                save_state.version,
                Self::CURRENT_VERSION
            )
            .into());
        }
        if save_state.memory.len() != MEMORY_SIZE {
            return Err(format!(
                "Save state memory image is {} bytes, expected {}",
                save_state.memory.len(),
                MEMORY_SIZE
            )
            .into());
        }
        log::info!("Save state loaded from: {}", filename);
        Ok(save_state)
    }
}
