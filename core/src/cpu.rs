//! The fetch-decode-execute step.

use crate::insn::{self, Control};
use crate::memory::Memory;
use crate::state::State;
use crate::trace::StepRecord;
use crate::trace;

/// Executes the instruction at `state.pc`.
///
/// A halted state is never modified; the returned record then describes the
/// instruction the machine is parked on.
pub fn step(state: &mut State, memory: &Memory) -> StepRecord {
    let addr = state.pc;
    let raw = memory.read_u8(addr);
    let (insn, executor) = insn::decode(raw, memory.read_u8(addr.wrapping_add(1)));

    if state.halted() {
        return StepRecord { addr, insn, pc: addr, halted: true };
    }

    state.ir = raw;
    trace!("pc@{:#06x}: executing {}", addr, insn);
    match executor(state, insn.operand) {
        Control::Next => state.pc = addr.wrapping_add(insn.step_size()),
        Control::Jump(target) => {
            trace!("branch taken to {:#06x}", target);
            state.pc = target;
        }
        Control::Stop => {}
    }

    StepRecord {
        addr,
        insn,
        pc: state.pc,
        halted: state.halted(),
    }
}
