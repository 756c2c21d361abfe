use rv32jit_core::io::Io;
use std::cell::RefCell;
use std::rc::Rc;

/// Flat little-endian RAM starting at address zero.
///
/// Clones share the same storage, so a test can keep one handle after
/// giving another to the CPU. Accesses outside the RAM read as zero and
/// writes there are dropped.
#[derive(Clone, Debug)]
pub struct FlatMemory {
    data: Rc<RefCell<Vec<u8>>>,
}

impl FlatMemory {
    pub fn new(size: usize) -> Self {
        Self {
            data: Rc::new(RefCell::new(vec![0; size])),
        }
    }

    pub fn size(&self) -> usize {
        self.data.borrow().len()
    }

    /// Store `instructions` back to back starting at `addr`.
    pub fn load_words(&self, addr: u32, instructions: &[u32]) {
        for (i, inst) in instructions.iter().enumerate() {
            self.store(addr + (i as u32) * 4, &inst.to_le_bytes());
        }
    }

    pub fn word(&self, addr: u32) -> u32 {
        let mut bytes = [0u8; 4];
        self.load(addr, &mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn load(&self, addr: u32, out: &mut [u8]) {
        let data = self.data.borrow();
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = data.get(addr as usize + i).copied().unwrap_or(0);
        }
    }

    fn store(&self, addr: u32, bytes: &[u8]) {
        let mut data = self.data.borrow_mut();
        for (i, byte) in bytes.iter().enumerate() {
            if let Some(slot) = data.get_mut(addr as usize + i) {
                *slot = *byte;
            }
        }
    }
}

impl Io for FlatMemory {
    fn fetch_u32(&mut self, addr: u32) -> u32 {
        self.word(addr)
    }

    fn read_u32(&mut self, addr: u32) -> u32 {
        self.word(addr)
    }

    fn read_u16(&mut self, addr: u32) -> u16 {
        let mut bytes = [0u8; 2];
        self.load(addr, &mut bytes);
        u16::from_le_bytes(bytes)
    }

    fn read_u8(&mut self, addr: u32) -> u8 {
        let mut bytes = [0u8; 1];
        self.load(addr, &mut bytes);
        bytes[0]
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        self.store(addr, &val.to_le_bytes());
    }

    fn write_u16(&mut self, addr: u32, val: u16) {
        self.store(addr, &val.to_le_bytes());
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        self.store(addr, &[val]);
    }
}
