//! Register transfers. None of them touch the flags.

use crate::insn::{Control, Operand};
use crate::state::State;

pub fn tax(state: &mut State, _: Operand) -> Control {
    state.x = state.a;
    Control::Next
}

pub fn tay(state: &mut State, _: Operand) -> Control {
    state.y = state.a;
    Control::Next
}

pub fn tya(state: &mut State, _: Operand) -> Control {
    state.a = state.y;
    Control::Next
}

pub fn txa(state: &mut State, _: Operand) -> Control {
    state.a = state.x;
    Control::Next
}

pub fn txs(state: &mut State, _: Operand) -> Control {
    state.sp = state.x;
    Control::Next
}

pub fn tys(state: &mut State, _: Operand) -> Control {
    state.sp = state.y;
    Control::Next
}

pub fn tsx(state: &mut State, _: Operand) -> Control {
    state.x = state.sp;
    Control::Next
}

pub fn tsy(state: &mut State, _: Operand) -> Control {
    state.y = state.sp;
    Control::Next
}
