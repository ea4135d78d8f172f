pub const MEMORY_SIZE: usize = 0x10000;

/// Flat 64 KiB store. Every `u16` indexes it, so there is no out-of-range access.
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            data: vec![0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }

    /// Copy `bytes` starting at `start`. Returns how many bytes fit before $FFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) -> usize {
        let start = start as usize;
        let count = bytes.len().min(MEMORY_SIZE - start);
        self.data[start..start + count].copy_from_slice(&bytes[..count]);
        count
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    // Save state methods
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn set_contents(&mut self, image: &[u8]) {
        let count = image.len().min(MEMORY_SIZE);
        self.data[..count].copy_from_slice(&image[..count]);
        self.data[count..].fill(0);
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
