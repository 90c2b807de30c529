//! Index register increment and decrement.
//!
//! Increments wrap and report the wrap in Carry. Decrements stop at zero.

use crate::insn::{Control, Operand};
use crate::state::State;

fn increment(state: &mut State, value: u8) -> u8 {
    let (result, wrapped) = value.overflowing_add(1);
    if wrapped {
        state.set_carry(true);
    }
    result
}

pub fn inx(state: &mut State, _: Operand) -> Control {
    let x = state.x;
    state.x = increment(state, x);
    Control::Next
}

pub fn iny(state: &mut State, _: Operand) -> Control {
    let y = state.y;
    state.y = increment(state, y);
    Control::Next
}

pub fn dex(state: &mut State, _: Operand) -> Control {
    state.x = state.x.saturating_sub(1);
    Control::Next
}

pub fn dey(state: &mut State, _: Operand) -> Control {
    state.y = state.y.saturating_sub(1);
    Control::Next
}
