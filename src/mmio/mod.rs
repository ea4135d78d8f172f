//! Memory-mapped device table.
//!
//! Devices are registered once at startup and looked up by a linear scan
//! on every MMIO access. Callbacks receive the absolute address. A device
//! without a read or write callback falls back to the bus default handler.

pub mod config;
pub mod handlers;

use crate::bus::BusError;
use std::cell::Cell;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub const MAX_DEVICES: usize = 64;

pub type ReadFn = Box<dyn FnMut(u16) -> u8>;
pub type WriteFn = Box<dyn FnMut(u16, u8)>;

/// Shared slot a device uses to ask the run loop to stop with an exit code.
#[derive(Debug, Clone, Default)]
pub struct ExitSignal(Rc<Cell<Option<u8>>>);

impl ExitSignal {
    pub fn request(&self, code: u8) {
        // First request wins.
        if self.0.get().is_none() {
            self.0.set(Some(code));
        }
    }

    pub fn take(&self) -> Option<u8> {
        self.0.take()
    }

    pub fn is_requested(&self) -> bool {
        self.0.get().is_some()
    }
}

pub struct MmioDevice {
    name: String,
    start: u16,
    end: u16,
    read: Option<ReadFn>,
    write: Option<WriteFn>,
}

impl MmioDevice {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.start && addr <= self.end
    }

    fn overlaps(&self, start: u16, end: u16) -> bool {
        start <= self.end && self.start <= end
    }
}

impl std::fmt::Debug for MmioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MmioDevice")
            .field("name", &self.name)
            .field("start", &format_args!("${:04X}", self.start))
            .field("end", &format_args!("${:04X}", self.end))
            .field("read", &self.read.is_some())
            .field("write", &self.write.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct MmioRegistry {
    devices: Vec<MmioDevice>,
    exit: ExitSignal,
}

impl MmioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
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
        if self.devices.len() >= MAX_DEVICES {
            return Err(BusError::TooManyDevices { limit: MAX_DEVICES });
        }
        if let Some(existing) = self.devices.iter().find(|d| d.overlaps(start, end)) {
            return Err(BusError::DeviceOverlap {
                name: name.to_string(),
                existing: existing.name.clone(),
                start,
                end,
            });
        }
        self.devices.push(MmioDevice {
            name: name.to_string(),
            start,
            end,
            read,
            write,
        });
        Ok(())
    }

    pub fn find(&self, addr: u16) -> Option<&MmioDevice> {
        self.devices.iter().find(|d| d.contains(addr))
    }

    pub fn devices(&self) -> impl Iterator<Item = &MmioDevice> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn exit_signal(&self) -> ExitSignal {
        self.exit.clone()
    }

    /// `None` when no device (or no read callback) claims the address.
    pub(crate) fn read(&mut self, addr: u16) -> Option<u8> {
        let device = self.devices.iter_mut().find(|d| d.contains(addr))?;
        device.read.as_mut().map(|f| f(addr))
    }

    /// `false` when no device (or no write callback) claims the address.
    pub(crate) fn write(&mut self, addr: u16, data: u8) -> bool {
        match self.devices.iter_mut().find(|d| d.contains(addr)) {
            Some(MmioDevice {
                write: Some(f), ..
            }) => {
                f(addr, data);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_dispatch_by_range() {
        let mut reg = MmioRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        reg.register(
            "uart",
            0xD000..=0xD003,
            Some(Box::new(|addr: u16| (addr & 0xFF) as u8)),
            Some(Box::new(move |addr: u16, data: u8| {
                sink.borrow_mut().push((addr, data))
            })),
        )
        .unwrap();

        assert_eq!(reg.read(0xD002), Some(0x02));
        assert!(reg.write(0xD003, 0x41));
        assert_eq!(reg.read(0xD004), None);
        assert!(!reg.write(0xD004, 0x00));
        assert_eq!(*seen.borrow(), vec![(0xD003, 0x41)]);
        assert_eq!(reg.find(0xD001).map(|d| d.name()), Some("uart"));
    }

    #[test]
    fn test_missing_callbacks_fall_through() {
        let mut reg = MmioRegistry::new();
        reg.register("dummy", 0xD100..=0xD1FF, None, None).unwrap();
        assert_eq!(reg.read(0xD100), None);
        assert!(!reg.write(0xD1FF, 1));
        assert!(reg.find(0xD150).is_some());
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut reg = MmioRegistry::new();
        reg.register("a", 0xD000..=0xD00F, None, None).unwrap();
        let err = reg.register("b", 0xD00F..=0xD01F, None, None).unwrap_err();
        assert_eq!(
            err,
            BusError::DeviceOverlap {
                name: "b".into(),
                existing: "a".into(),
                start: 0xD00F,
                end: 0xD01F
            }
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_table_limit() {
        let mut reg = MmioRegistry::new();
        for i in 0..MAX_DEVICES as u16 {
            reg.register(&format!("dev{}", i), 0xD000 + i..=0xD000 + i, None, None)
                .unwrap();
        }
        let err = reg.register("extra", 0xD100..=0xD100, None, None).unwrap_err();
        assert_eq!(err, BusError::TooManyDevices { limit: MAX_DEVICES });
    }

    #[test]
    fn test_exit_signal_keeps_first_code() {
        let reg = MmioRegistry::new();
        let signal = reg.exit_signal();
        signal.request(7);
        signal.request(9);
        assert!(reg.exit_signal().is_requested());
        assert_eq!(reg.exit_signal().take(), Some(7));
        assert_eq!(signal.take(), None);
    }
}
