//! Per-step observation hook.
//!
//! The core never formats output itself; a [`Tracer`] installed on the
//! emulator receives a record of every executed instruction.

use std::fmt::Debug;

use crate::insn::Instruction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    /// Address the instruction was fetched from
    pub addr: u16,
    pub insn: Instruction,
    /// Program counter after the step
    pub pc: u16,
    pub halted: bool,
}

impl StepRecord {
    /// Value of the instruction register after the step
    pub fn ir(&self) -> u8 {
        self.insn.raw
    }
}

pub trait Tracer: Debug {
    fn on_step(&mut self, record: &StepRecord);

    fn on_halt(&mut self, _steps: u64) {}
}
