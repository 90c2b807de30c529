//! Immediate loads. Each updates Zero from the loaded value.

use crate::insn::{Control, Operand};
use crate::state::State;

pub fn lda(state: &mut State, operand: Operand) -> Control {
    state.a = operand.byte();
    state.update_zero(state.a);
    Control::Next
}

pub fn ldx(state: &mut State, operand: Operand) -> Control {
    state.x = operand.byte();
    state.update_zero(state.x);
    Control::Next
}

pub fn ldy(state: &mut State, operand: Operand) -> Control {
    state.y = operand.byte();
    state.update_zero(state.y);
    Control::Next
}
