//! The machine: register state plus the memory it executes from.

use crate::config::FILL_BYTE;
use crate::cpu;
use crate::debug;
use crate::error::*;
use crate::memory::Memory;
use crate::state::State;
use crate::trace::StepRecord;

#[derive(Debug, Default)]
pub struct Machine {
    state: State,
    memory: Memory,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset, fill memory with [`FILL_BYTE`] and load `program`.
    pub fn with_program(program: &[u8]) -> Result<Self> {
        let mut machine = Self::new();
        machine.reset();
        machine.fill_memory(FILL_BYTE);
        machine.load_program(program)?;
        Ok(machine)
    }

    pub fn reset(&mut self) {
        self.state = State::RESET;
    }

    pub fn fill_memory(&mut self, marker: u8) {
        self.memory.fill(marker);
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(program)?;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory.read_u8(addr)
    }

    pub fn step(&mut self) -> StepRecord {
        cpu::step(&mut self.state, &self.memory)
    }

    pub fn halted(&self) -> bool {
        self.state.halted()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }
}
