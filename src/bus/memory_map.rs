use super::BusError;
use std::ops::RangeInclusive;

pub const ZERO_PAGE_START: u16 = 0x0000;
pub const STACK_PAGE_END: u16 = 0x01FF;
pub const RAM_END: u16 = 0xCFFF;
pub const MMIO_START: u16 = 0xD000;
pub const MMIO_END: u16 = 0xDFFF;
pub const ROM_START: u16 = 0xE000;
pub const ROM_END: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Ram,
    Mmio,
    Rom,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Region::Ram => write!(f, "RAM"),
            Region::Mmio => write!(f, "MMIO"),
            Region::Rom => write!(f, "ROM"),
        }
    }
}

/// Partition of the 64 KiB space. Whatever is not MMIO or ROM is RAM; the
/// zero page and the stack page are always RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryMap {
    mmio: Option<(u16, u16)>,
    rom: Option<(u16, u16)>,
}

impl MemoryMap {
    pub fn new(
        mmio: Option<RangeInclusive<u16>>,
        rom: Option<RangeInclusive<u16>>,
    ) -> Result<Self, BusError> {
        let mmio = mmio.map(|r| (*r.start(), *r.end()));
        let rom = rom.map(|r| (*r.start(), *r.end()));

        for (region, bounds) in [(Region::Mmio, mmio), (Region::Rom, rom)] {
            if let Some((start, end)) = bounds {
                if start > end {
                    return Err(BusError::InvertedRange { start, end });
                }
                if start <= STACK_PAGE_END {
                    return Err(BusError::ReservedRegion { region, start });
                }
            }
        }

        if let (Some((ms, me)), Some((rs, re))) = (mmio, rom) {
            if ms <= re && rs <= me {
                return Err(BusError::RegionOverlap {
                    mmio: ms..=me,
                    rom: rs..=re,
                });
            }
        }

        Ok(Self { mmio, rom })
    }

    /// Everything is RAM. Useful for test ROMs that expect writable vectors.
    pub fn flat() -> Self {
        Self {
            mmio: None,
            rom: None,
        }
    }

    pub fn region(&self, addr: u16) -> Region {
        if let Some((start, end)) = self.rom {
            if (start..=end).contains(&addr) {
                return Region::Rom;
            }
        }
        if let Some((start, end)) = self.mmio {
            if (start..=end).contains(&addr) {
                return Region::Mmio;
            }
        }
        Region::Ram
    }

    pub fn mmio_range(&self) -> Option<RangeInclusive<u16>> {
        self.mmio.map(|(s, e)| s..=e)
    }

    pub fn rom_range(&self) -> Option<RangeInclusive<u16>> {
        self.rom.map(|(s, e)| s..=e)
    }

    /// Device ranges must sit entirely inside the MMIO window.
    pub fn covers_mmio(&self, start: u16, end: u16) -> bool {
        match self.mmio {
            Some((ms, me)) => start >= ms && end <= me,
            None => false,
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self {
            mmio: Some((MMIO_START, MMIO_END)),
            rom: Some((ROM_START, ROM_END)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_partition() {
        let map = MemoryMap::default();
        assert_eq!(map.region(ZERO_PAGE_START), Region::Ram);
        assert_eq!(map.region(0x01FF), Region::Ram);
        assert_eq!(map.region(RAM_END), Region::Ram);
        assert_eq!(map.region(MMIO_START), Region::Mmio);
        assert_eq!(map.region(MMIO_END), Region::Mmio);
        assert_eq!(map.region(ROM_START), Region::Rom);
        assert_eq!(map.region(ROM_END), Region::Rom);
    }

    #[test]
    fn test_flat_map_is_all_ram() {
        let map = MemoryMap::flat();
        assert_eq!(map.region(0xD000), Region::Ram);
        assert_eq!(map.region(0xFFFC), Region::Ram);
        assert!(map.mmio_range().is_none());
    }

    #[test]
    fn test_rejects_overlap() {
        let err = MemoryMap::new(Some(0xC000..=0xE000), Some(0xE000..=0xFFFF)).unwrap_err();
        assert!(matches!(err, BusError::RegionOverlap { .. }));
    }

    #[test]
    fn test_rejects_zero_page_and_stack() {
        let err = MemoryMap::new(Some(0x0100..=0x01FF), None).unwrap_err();
        assert_eq!(
            err,
            BusError::ReservedRegion {
                region: Region::Mmio,
                start: 0x0100
            }
        );
        let err = MemoryMap::new(None, Some(0x0000..=0x0FFF)).unwrap_err();
        assert!(matches!(err, BusError::ReservedRegion { region: Region::Rom, .. }));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = MemoryMap::new(Some(0xD0FF..=0xD000), None).unwrap_err();
        assert_eq!(
            err,
            BusError::InvertedRange {
                start: 0xD0FF,
                end: 0xD000
            }
        );
    }

    #[test]
    fn test_adjacent_regions_are_accepted() {
        let map = MemoryMap::new(Some(0x8000..=0x8FFF), Some(0x9000..=0xFFFF)).unwrap();
        assert_eq!(map.region(0x7FFF), Region::Ram);
        assert_eq!(map.region(0x8FFF), Region::Mmio);
        assert_eq!(map.region(0x9000), Region::Rom);
        assert!(map.covers_mmio(0x8000, 0x80FF));
        assert!(!map.covers_mmio(0x8F00, 0x9000));
    }
}
