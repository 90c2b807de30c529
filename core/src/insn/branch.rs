//! Conditional branches.
//!
//! The operand is a signed displacement from the instruction that follows
//! the branch: `target = pc + 2 + disp`, wrapping at 16 bits.

use crate::insn::{Control, Operand};
use crate::state::State;

/// Target of a taken branch located at `pc`.
pub fn branch_target(pc: u16, disp: i8) -> u16 {
    pc.wrapping_add(2).wrapping_add_signed(disp as i16)
}

fn branch_if(state: &State, taken: bool, operand: Operand) -> Control {
    if !taken {
        return Control::Next;
    }
    Control::Jump(branch_target(state.pc, operand.byte() as i8))
}

pub fn beq(state: &mut State, operand: Operand) -> Control {
    branch_if(state, state.zero(), operand)
}

pub fn bne(state: &mut State, operand: Operand) -> Control {
    branch_if(state, !state.zero(), operand)
}

pub fn bcs(state: &mut State, operand: Operand) -> Control {
    branch_if(state, state.carry(), operand)
}

pub fn bcc(state: &mut State, operand: Operand) -> Control {
    branch_if(state, !state.carry(), operand)
}
