//! Raw binary images.
//!
//! Images are copied byte for byte through [`Bus::poke`], so they may land in
//! ROM. Nothing here runs once the CPU has started.

use crate::bus::Bus;
use crate::cpu::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::memory::MEMORY_SIZE;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Empty,
    /// The image would run past $FFFF.
    TooLarge { start: u16, len: usize },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read image {}: {}", path.display(), source)
            }
            LoadError::Empty => write!(f, "image is empty"),
            LoadError::TooLarge { start, len } => write!(
                f,
                "image of {} bytes at ${:04X} does not fit below $10000 ({} bytes free)",
                len,
                start,
                MEMORY_SIZE - *start as usize
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Copy `bytes` to `start`. Returns the number of bytes written.
pub fn load_bytes(bus: &mut Bus, bytes: &[u8], start: u16) -> Result<usize, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if start as usize + bytes.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge {
            start,
            len: bytes.len(),
        });
    }
    let written = bus.load(start, bytes);
    log::info!(
        "Loaded {} bytes at ${:04X}-${:04X}",
        written,
        start,
        start as usize + written - 1
    );
    Ok(written)
}

pub fn load_image<P: AsRef<Path>>(bus: &mut Bus, path: P, start: u16) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(bus, &bytes, start)
}

fn write_vector(bus: &mut Bus, vector: u16, target: u16) {
    bus.poke(vector, target as u8);
    bus.poke(vector + 1, (target >> 8) as u8);
}

pub fn set_reset_vector(bus: &mut Bus, target: u16) {
    write_vector(bus, RESET_VECTOR, target);
    log::debug!("reset vector -> ${:04X}", target);
}

/// Point NMI, RESET and IRQ/BRK at the same address.
pub fn alias_vectors(bus: &mut Bus, target: u16) {
    for vector in [NMI_VECTOR, RESET_VECTOR, IRQ_VECTOR] {
        write_vector(bus, vector, target);
    }
    log::debug!("NMI/RESET/IRQ vectors -> ${:04X}", target);
}
