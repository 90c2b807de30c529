//! Run control and flag instructions.

use crate::insn::{Control, Operand};
use crate::state::State;

pub fn halt(state: &mut State, _: Operand) -> Control {
    state.halt();
    Control::Stop
}

pub fn noop(_: &mut State, _: Operand) -> Control {
    Control::Next
}

pub fn clc(state: &mut State, _: Operand) -> Control {
    state.set_carry(false);
    Control::Next
}

pub fn sec(state: &mut State, _: Operand) -> Control {
    state.set_carry(true);
    Control::Next
}
