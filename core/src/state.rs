//! Current state of the CPU, including registers and flags.
//!
//! Fields are only writable from inside the crate; instruction handlers are
//! the sole code that mutates them while a program runs.

use bitflags::bitflags;

use crate::config::{FILL_BYTE, STACK_POINTER_INIT, STACK_SIZE};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// Last loaded value was zero
        const ZERO = 1 << 0;
        const CARRY = 1 << 1;
        /// Run-control latch, never cleared once set
        const HALT = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub(crate) pc: u16,
    pub(crate) sp: u8,
    /// Opcode byte of the most recently fetched instruction
    pub(crate) ir: u8,
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) flags: Flags,
    pub(crate) stack: [u8; STACK_SIZE],
}

impl State {
    pub const RESET: Self = Self {
        pc: 0,
        sp: STACK_POINTER_INIT,
        ir: 0,
        a: 0,
        x: 0,
        y: 0,
        flags: Flags::ZERO,
        stack: [FILL_BYTE; STACK_SIZE],
    };

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn ir(&self) -> u8 {
        self.ir
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn zero(&self) -> bool {
        self.flags.contains(Flags::ZERO)
    }

    pub fn carry(&self) -> bool {
        self.flags.contains(Flags::CARRY)
    }

    pub fn halted(&self) -> bool {
        self.flags.contains(Flags::HALT)
    }

    pub fn stack(&self) -> &[u8; STACK_SIZE] {
        &self.stack
    }

    /// Zero follows the result; Carry is left alone so branches can still
    /// test the carry of an earlier increment.
    pub(crate) fn update_zero(&mut self, value: u8) {
        self.flags.set(Flags::ZERO, value == 0);
    }

    pub(crate) fn set_carry(&mut self, carry: bool) {
        self.flags.set(Flags::CARRY, carry);
    }

    pub(crate) fn halt(&mut self) {
        self.flags.insert(Flags::HALT);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let state = State::default();
        assert_eq!(state.pc(), 0);
        assert_eq!(state.sp(), 0xFF);
        assert_eq!((state.a(), state.x(), state.y()), (0, 0, 0));
        assert!(state.zero());
        assert!(!state.carry());
        assert!(!state.halted());
    }

    #[test]
    fn test_update_zero_keeps_carry() {
        let mut state = State::default();
        state.set_carry(true);
        state.update_zero(7);
        assert!(!state.zero());
        assert!(state.carry());
        state.update_zero(0);
        assert!(state.zero());
        assert!(state.carry());
    }
}
