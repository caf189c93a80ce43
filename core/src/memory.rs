use log::info;

use crate::constants::{MEMORY_SIZE, PROGRAM_START, ROM_CAPACITY, SPRITE_SHEET};
use crate::error::{Error, Fault, Result};
use crate::opcode::Opcode;

/// # Memory
/// 4096 bytes, addressed 0x000..=0xFFF.
///
/// ```text
/// 0x000-0x04F  font glyphs
/// 0x050-0x1FF  unused
/// 0x200-0xFFF  program and scratch space
/// ```
///
/// Accessors are bounds checked and return a `Fault` rather than panicking,
/// so an instruction can validate every address before it mutates anything.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a raw ROM image to 0x200.
    ///
    /// Oversized ROMs are rejected outright; nothing is truncated or written.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > ROM_CAPACITY {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                capacity: ROM_CAPACITY,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// The opcode at `pc`, or `None` if it would run off the end of memory.
    pub fn fetch(&self, pc: u16) -> Option<Opcode> {
        let pc = pc as usize;
        match self.bytes.get(pc..pc + 2) {
            Some(&[high, low]) => Some(Opcode::from_bytes(high, low)),
            _ => None,
        }
    }

    pub fn read(&self, address: usize) -> std::result::Result<u8, Fault> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Fault::AddressOutOfBounds { address })
    }

    /// `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> std::result::Result<&[u8], Fault> {
        let end = Self::end_of(address, len)?;
        Ok(&self.bytes[address..end])
    }

    pub fn slice_mut(
        &mut self,
        address: usize,
        len: usize,
    ) -> std::result::Result<&mut [u8], Fault> {
        let end = Self::end_of(address, len)?;
        Ok(&mut self.bytes[address..end])
    }

    // reports the first address that falls outside memory
    fn end_of(address: usize, len: usize) -> std::result::Result<usize, Fault> {
        let end = address + len;
        if end > MEMORY_SIZE {
            Err(Fault::AddressOutOfBounds {
                address: address.max(MEMORY_SIZE),
            })
        } else {
            Ok(end)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
