//! Flat byte-addressed memory owned by the machine.

use std::fmt;

use crate::config::MEMORY_SIZE;
use crate::warn;
use crate::error::*;

pub struct Memory {
    cells: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn fill(&mut self, marker: u8) {
        self.cells.fill(marker);
    }

    /// Copies `image` to address 0. Nothing is written if it does not fit.
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > self.capacity() {
            warn!("program image of {} bytes exceeds memory of {} bytes", image.len(), self.capacity());
            return Err(Error::ProgramTooLarge(image.len(), self.capacity()));
        }
        self.cells[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Addresses wrap modulo the capacity.
    pub fn read_u8(&self, addr: u16) -> u8 {
        self.cells[addr as usize % self.cells.len()]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
