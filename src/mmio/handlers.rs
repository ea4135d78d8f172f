//! Built-in device behaviours that a configuration file can name.

use super::{ExitSignal, ReadFn, WriteFn};
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadHandler {
    /// No callback; the bus default handler answers with 0.
    Default,
    /// Blocks on stdin for one byte. EOF reads as 0.
    GetKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteHandler {
    Default,
    /// Writes the byte to stdout and flushes.
    PrintChar,
    /// Logs the store; there is no framebuffer behind it.
    VramWrite,
    /// Asks the run loop to stop, using the written byte as the exit code.
    Exit,
}

fn is_none_name(name: &str) -> bool {
    matches!(name, "0" | "none" | "default")
}

impl ReadHandler {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "get_key" => Some(ReadHandler::GetKey),
            n if is_none_name(n) => Some(ReadHandler::Default),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReadHandler::Default => "default",
            ReadHandler::GetKey => "get_key",
        }
    }

    pub fn into_callback(self) -> Option<ReadFn> {
        match self {
            ReadHandler::Default => None,
            ReadHandler::GetKey => Some(Box::new(|_addr: u16| {
                let mut buf = [0u8; 1];
                match std::io::stdin().read(&mut buf) {
                    Ok(1) => buf[0],
                    Ok(_) => 0,
                    Err(e) => {
                        log::warn!("get_key: stdin read failed: {}", e);
                        0
                    }
                }
            })),
        }
    }
}

impl WriteHandler {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "print_char" => Some(WriteHandler::PrintChar),
            "vram_write" => Some(WriteHandler::VramWrite),
            "exit" => Some(WriteHandler::Exit),
            n if is_none_name(n) => Some(WriteHandler::Default),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WriteHandler::Default => "default",
            WriteHandler::PrintChar => "print_char",
            WriteHandler::VramWrite => "vram_write",
            WriteHandler::Exit => "exit",
        }
    }

    /// `exit` needs the registry's signal so the request reaches the run loop.
    pub fn into_callback(self, exit: &ExitSignal) -> Option<WriteFn> {
        match self {
            WriteHandler::Default => None,
            WriteHandler::PrintChar => Some(Box::new(|_addr: u16, data: u8| {
                let mut out = std::io::stdout().lock();
                if let Err(e) = out.write_all(&[data]).and_then(|_| out.flush()) {
                    log::warn!("print_char: stdout write failed: {}", e);
                }
            })),
            WriteHandler::VramWrite => Some(Box::new(|addr: u16, data: u8| {
                log::info!("[VRAM] {:04X} <= {:02X}", addr, data);
            })),
            WriteHandler::Exit => {
                let signal = exit.clone();
                Some(Box::new(move |addr: u16, data: u8| {
                    log::info!("[EXIT] {:04X} <= {:02X}", addr, data);
                    signal.request(data);
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve() {
        assert_eq!(ReadHandler::from_name("get_key"), Some(ReadHandler::GetKey));
        assert_eq!(ReadHandler::from_name("0"), Some(ReadHandler::Default));
        assert_eq!(ReadHandler::from_name("print_char"), None);
        assert_eq!(
            WriteHandler::from_name("print_char"),
            Some(WriteHandler::PrintChar)
        );
        assert_eq!(
            WriteHandler::from_name("vram_write"),
            Some(WriteHandler::VramWrite)
        );
        assert_eq!(WriteHandler::from_name("exit"), Some(WriteHandler::Exit));
        assert_eq!(WriteHandler::from_name("none"), Some(WriteHandler::Default));
        assert_eq!(WriteHandler::from_name("get_key"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for h in [
            WriteHandler::Default,
            WriteHandler::PrintChar,
            WriteHandler::VramWrite,
            WriteHandler::Exit,
        ] {
            assert_eq!(WriteHandler::from_name(h.name()), Some(h));
        }
        for h in [ReadHandler::Default, ReadHandler::GetKey] {
            assert_eq!(ReadHandler::from_name(h.name()), Some(h));
        }
    }

    #[test]
    fn test_default_has_no_callback() {
        let exit = ExitSignal::default();
        assert!(ReadHandler::Default.into_callback().is_none());
        assert!(WriteHandler::Default.into_callback(&exit).is_none());
    }

    #[test]
    fn test_exit_callback_requests_code() {
        let exit = ExitSignal::default();
        let mut cb = WriteHandler::Exit.into_callback(&exit).unwrap();
        assert!(!exit.is_requested());
        cb(0xD0FF, 0x2A);
        assert_eq!(exit.take(), Some(0x2A));
    }
}
