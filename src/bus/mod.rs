//! The single arbiter for every CPU memory access.
//!
//! Addresses are routed through a [`MemoryMap`] to RAM, write-protected ROM,
//! or the MMIO device table. MMIO accesses are gated by the [`AccessType`]
//! of the instruction currently executing; a denied read yields
//! [`MMIO_DENIED_READ`] and a denied write is dropped. Neither is fatal.

mod access;
pub mod memory_map;


pub use access::AccessType;
pub use memory_map::{MemoryMap, Region};

use crate::cpu_bus::CpuBus;
use crate::memory::Memory;
use crate::mmio::{MmioRegistry, ReadFn, WriteFn};
use std::ops::RangeInclusive;

/// Value returned by an MMIO read the current instruction may not perform.
pub const MMIO_DENIED_READ: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// One bus access, rebuilt for every read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusTransaction {
    pub address: u16,
    pub data: u8,
    pub direction: Direction,
}

/// Counters for every access and every locally recovered fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    pub reads: u64,
    pub writes: u64,
    pub rom_writes_ignored: u64,
    pub mmio_reads_denied: u64,
    pub mmio_writes_denied: u64,
    pub mmio_default_reads: u64,
    pub mmio_default_writes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A region would cover the zero page or the stack page.
    ReservedRegion { region: Region, start: u16 },
    RegionOverlap {
        mmio: RangeInclusive<u16>,
        rom: RangeInclusive<u16>,
    },
    InvertedRange { start: u16, end: u16 },
    DeviceOutsideMmio { name: String, start: u16, end: u16 },
    DeviceOverlap {
        name: String,
        existing: String,
        start: u16,
        end: u16,
    },
    TooManyDevices { limit: usize },
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BusError::ReservedRegion { region, start } => write!(
                f,
                "{} region starting at ${:04X} overlaps the zero page or stack page",
                region, start
            ),
            BusError::RegionOverlap { mmio, rom } => write!(
                f,
                "MMIO region ${:04X}-${:04X} overlaps ROM region ${:04X}-${:04X}",
                mmio.start(),
                mmio.end(),
                rom.start(),
                rom.end()
            ),
            BusError::InvertedRange { start, end } => {
                write!(f, "range start ${:04X} is above its end ${:04X}", start, end)
            }
            BusError::DeviceOutsideMmio { name, start, end } => write!(
                f,
                "device '{}' at ${:04X}-${:04X} is outside the MMIO window",
                name, start, end
            ),
            BusError::DeviceOverlap {
                name,
                existing,
                start,
                end,
            } => write!(
                f,
                "device '{}' at ${:04X}-${:04X} overlaps device '{}'",
                name, start, end, existing
            ),
            BusError::TooManyDevices { limit } => {
                write!(f, "MMIO device table is full ({} devices)", limit)
            }
        }
    }
}

impl std::error::Error for BusError {}

pub struct Bus {
    memory: Memory,
    map: MemoryMap,
    mmio: MmioRegistry,
    access: AccessType,
    stats: BusStats,
    last: Option<BusTransaction>,
    trace: bool,
    nmi_pending: bool,
    irq_line: bool,
}

impl Bus {
    pub fn new() -> Self {
        Self::with_map(MemoryMap::default())
    }

    pub fn with_map(map: MemoryMap) -> Self {
        Bus {
            memory: Memory::new(),
            map,
            mmio: MmioRegistry::new(),
            access: AccessType::default(),
            stats: BusStats::default(),
            last: None,
            trace: false,
            nmi_pending: false,
            irq_line: false,
        }
    }

    pub fn map(&self) -> &MemoryMap {
        &self.map
    }

    pub fn mmio(&self) -> &MmioRegistry {
        &self.mmio
    }

    /// Add a device to the MMIO table. Must happen before the first reset;
    /// the table is not touched again while the CPU runs.
    pub fn register_device(
        &mut self,
        name: &str,
        range: RangeInclusive<u16>,
        read: Option<ReadFn>,
        write: Option<WriteFn>,
    ) -> Result<(), BusError> {
        let (start, end) = (*range.start(), *range.end());
        if start > end {
            return Err(BusError::InvertedRange { start, end });
        }
        if !self.map.covers_mmio(start, end) {
            return Err(BusError::DeviceOutsideMmio {
                name: name.to_string(),
                start,
                end,
            });
        }
        self.mmio.register(name, range, read, write)?;
        log::info!("[MMIO] Loaded: {:<10} {:04X}-{:04X}", name, start, end);
        Ok(())
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        self.stats.reads += 1;
        let data = match self.map.region(addr) {
            Region::Ram | Region::Rom => self.memory.read(addr),
            Region::Mmio => self.read_mmio(addr),
        };
        self.record(addr, data, Direction::Read);
        data
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.stats.writes += 1;
        match self.map.region(addr) {
            Region::Ram => self.memory.write(addr, data),
            Region::Rom => {
                self.stats.rom_writes_ignored += 1;
                log::warn!("ROM write ignored: ${:04X} <= {:02X}", addr, data);
            }
            Region::Mmio => self.write_mmio(addr, data),
        }
        self.record(addr, data, Direction::Write);
    }

    fn read_mmio(&mut self, addr: u16) -> u8 {
        if !self.access.contains(AccessType::MMIO) {
            self.stats.mmio_reads_denied += 1;
            log::warn!(
                "MMIO read ${:04X} denied (access {:?})",
                addr,
                self.access
            );
            return MMIO_DENIED_READ;
        }
        match self.mmio.read(addr) {
            Some(value) => value,
            None => {
                self.stats.mmio_default_reads += 1;
                log::debug!("[MMIO READ] {:04X} -> default", addr);
                0
            }
        }
    }

    fn write_mmio(&mut self, addr: u16, data: u8) {
        if !self.access.contains(AccessType::MMIO) {
            self.stats.mmio_writes_denied += 1;
            log::warn!(
                "MMIO write ${:04X} <= {:02X} denied (access {:?})",
                addr,
                data,
                self.access
            );
            return;
        }
        if !self.mmio.write(addr, data) {
            self.stats.mmio_default_writes += 1;
            log::debug!("[MMIO WRITE] {:04X} <= {:02X} (default)", addr, data);
        }
    }

    fn record(&mut self, address: u16, data: u8, direction: Direction) {
        let txn = BusTransaction {
            address,
            data,
            direction,
        };
        if self.trace {
            match direction {
                Direction::Read => log::trace!("[READ ] {:04X} => {:02X}", address, data),
                Direction::Write => log::trace!("[WRITE] {:04X} <= {:02X}", address, data),
            }
        }
        self.last = Some(txn);
    }

    /// Raw read: no permission check, no device side effects, not counted.
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Raw write used by loaders before execution; ignores ROM protection.
    pub fn poke(&mut self, addr: u16, data: u8) {
        self.memory.write(addr, data);
    }

    pub fn load(&mut self, start: u16, bytes: &[u8]) -> usize {
        self.memory.load(start, bytes)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_image(&self) -> Vec<u8> {
        self.memory.as_slice().to_vec()
    }

    pub fn restore_memory_image(&mut self, image: &[u8]) {
        self.memory.set_contents(image);
    }

    pub fn access(&self) -> AccessType {
        self.access
    }

    pub fn stats(&self) -> &BusStats {
        &self.stats
    }

    pub fn last_transaction(&self) -> Option<BusTransaction> {
        self.last
    }

    pub fn set_trace(&mut self, on: bool) {
        self.trace = on;
    }

    pub fn raise_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn set_irq_line(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBus for Bus {
    fn read(&mut self, addr: u16) -> u8 {
        Bus::read(self, addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        Bus::write(self, addr, data)
    }

    fn set_access(&mut self, access: AccessType) {
        self.access = access;
    }

    fn poll_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    fn poll_irq(&mut self) -> bool {
        self.irq_line
    }

    fn poll_exit(&mut self) -> Option<u8> {
        self.mmio.exit_signal().take()
    }
}
