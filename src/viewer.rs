//! Plain-text memory dumps for the end of a run.

use std::fmt::Write;

pub const BYTES_PER_ROW: usize = 16;

/// Render `len` bytes of `memory` from `start`, sixteen per row, with an
/// address column and an ASCII gutter. The range is clipped to the slice.
pub fn hex_dump(memory: &[u8], start: u16, len: usize) -> String {
    let first = start as usize;
    let end = first.saturating_add(len).min(memory.len());
    let mut out = String::new();

    out.push_str("ADDR ");
    for col in 0..BYTES_PER_ROW {
        let _ = write!(out, " {:02X}", col);
    }
    out.push('\n');

    if first >= end {
        return out;
    }

    for (row, chunk) in memory[first..end].chunks(BYTES_PER_ROW).enumerate() {
        let addr = first + row * BYTES_PER_ROW;
        let _ = write!(out, "{:04X}:", addr);
        for byte in chunk {
            let _ = write!(out, " {:02X}", byte);
        }
        for _ in chunk.len()..BYTES_PER_ROW {
            out.push_str("   ");
        }
        out.push_str("  |");
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }
    out
}
