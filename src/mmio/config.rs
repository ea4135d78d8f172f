//! Line-oriented device configuration.
//!
//! One device per line:
//!
//! ```text
//! # name     start  end    handlers
//! keyboard   D000   D000   read=get_key write=0
//! console    D001   D001   read=0       write=print_char
//! ```
//!
//! Addresses are hex, with an optional `0x` or `$` prefix. `read=` and
//! `write=` may appear in any order and default to no callback. Blank lines
//! and lines starting with `#` are skipped.

use super::handlers::{ReadHandler, WriteHandler};
use super::MmioRegistry;
use crate::bus::{Bus, BusError};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    /// 1-based line in the source text.
    pub line: usize,
    pub name: String,
    pub start: u16,
    pub end: u16,
    pub read: ReadHandler,
    pub write: WriteHandler,
}

impl DeviceSpec {
    pub fn range(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

#[derive(Debug)]
pub enum MmioConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingField {
        line: usize,
        field: &'static str,
    },
    BadAddress {
        line: usize,
        text: String,
    },
    UnknownHandler {
        line: usize,
        name: String,
    },
    UnknownKey {
        line: usize,
        key: String,
    },
    Register {
        line: usize,
        source: BusError,
    },
}

impl std::fmt::Display for MmioConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MmioConfigError::Io { path, source } => {
                write!(f, "cannot read MMIO config {}: {}", path.display(), source)
            }
            MmioConfigError::MissingField { line, field } => {
                write!(f, "line {}: missing {}", line, field)
            }
            MmioConfigError::BadAddress { line, text } => {
                write!(f, "line {}: '{}' is not a 16-bit hex address", line, text)
            }
            MmioConfigError::UnknownHandler { line, name } => {
                write!(f, "line {}: unknown handler '{}'", line, name)
            }
            MmioConfigError::UnknownKey { line, key } => {
                write!(f, "line {}: unknown key '{}'", line, key)
            }
            MmioConfigError::Register { line, source } => {
                write!(f, "line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for MmioConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmioConfigError::Io { source, .. } => Some(source),
            MmioConfigError::Register { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn parse_hex(line: usize, text: &str) -> Result<u16, MmioConfigError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|_| MmioConfigError::BadAddress {
        line,
        text: text.to_string(),
    })
}

fn parse_line(line: usize, text: &str) -> Result<DeviceSpec, MmioConfigError> {
    let mut fields = text.split_whitespace();
    let name = fields
        .next()
        .ok_or(MmioConfigError::MissingField { line, field: "name" })?;
    let start = fields
        .next()
        .ok_or(MmioConfigError::MissingField {
            line,
            field: "start address",
        })
        .and_then(|t| parse_hex(line, t))?;
    let end = fields
        .next()
        .ok_or(MmioConfigError::MissingField {
            line,
            field: "end address",
        })
        .and_then(|t| parse_hex(line, t))?;

    let mut read = ReadHandler::Default;
    let mut write = WriteHandler::Default;
    for field in fields {
        let (key, value) = field.split_once('=').ok_or_else(|| MmioConfigError::UnknownKey {
            line,
            key: field.to_string(),
        })?;
        let unknown = || MmioConfigError::UnknownHandler {
            line,
            name: value.to_string(),
        };
        match key {
            "read" => read = ReadHandler::from_name(value).ok_or_else(unknown)?,
            "write" => write = WriteHandler::from_name(value).ok_or_else(unknown)?,
            _ => {
                return Err(MmioConfigError::UnknownKey {
                    line,
                    key: key.to_string(),
                })
            }
        }
    }

    Ok(DeviceSpec {
        line,
        name: name.to_string(),
        start,
        end,
        read,
        write,
    })
}

pub fn parse(text: &str) -> Result<Vec<DeviceSpec>, MmioConfigError> {
    let mut specs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        specs.push(parse_line(idx + 1, trimmed)?);
    }
    Ok(specs)
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<DeviceSpec>, MmioConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MmioConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Register every device or none of them.
///
/// The whole set is first checked against the bus's MMIO window and current
/// table in a scratch registry, so a bad line never leaves the bus half
/// configured.
pub fn install(bus: &mut Bus, specs: &[DeviceSpec]) -> Result<(), MmioConfigError> {
    let mut scratch = MmioRegistry::new();
    for device in bus.mmio().devices() {
        scratch
            .register(device.name(), device.range(), None, None)
            .map_err(|source| MmioConfigError::Register { line: 0, source })?;
    }
    for spec in specs {
        let err = |source| MmioConfigError::Register {
            line: spec.line,
            source,
        };
        if spec.start <= spec.end && !bus.map().covers_mmio(spec.start, spec.end) {
            return Err(err(BusError::DeviceOutsideMmio {
                name: spec.name.clone(),
                start: spec.start,
                end: spec.end,
            }));
        }
        scratch
            .register(&spec.name, spec.range(), None, None)
            .map_err(err)?;
    }

    let exit = bus.mmio().exit_signal();
    for spec in specs {
        bus.register_device(
            &spec.name,
            spec.range(),
            spec.read.into_callback(),
            spec.write.into_callback(&exit),
        )
        .map_err(|source| MmioConfigError::Register {
            line: spec.line,
            source,
        })?;
        log::debug!(
            "[MMIO] {} read={} write={}",
            spec.name,
            spec.read.name(),
            spec.write.name()
        );
    }
    Ok(())
}
