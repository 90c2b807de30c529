//! Interface for users to interact with the emulator.
//! Loading programs, running them and inspecting the machine are provided here.

use std::collections::BTreeSet;

use crate::config::FILL_BYTE;
use crate::error::*;
use crate::insn;
use crate::machine::Machine;
use crate::trace::{StepRecord, Tracer};
use crate::{debug, warn};

/// Accepts `fill` only if it executes as NOOP, so a program that runs off
/// its end keeps advancing one byte at a time.
pub fn check_fill_byte(fill: u8) -> Result<u8> {
    if !insn::is_noop(fill) {
        warn!("fill byte {:#04x} does not decode as NOOP", fill);
        return Err(Error::InvalidFillByte(fill));
    }
    Ok(fill)
}

/// Why [`Emulator::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The program executed HALT; carries the total step count.
    Halted(u64),
    /// The program counter reached a breakpoint. The instruction there has not run yet.
    Breakpoint(u16),
    /// The configured step limit was used up.
    StepLimit(u64),
}

#[derive(Debug)]
pub struct EmulatorBuilder {
    fill_byte: u8,
    step_limit: Option<u64>,
    tracer: Option<Box<dyn Tracer>>,
    breakpoints: Vec<u16>,
}

impl EmulatorBuilder {
    pub fn fill_byte(mut self, fill_byte: u8) -> Self {
        self.fill_byte = fill_byte;
        self
    }

    pub fn step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn tracer(mut self, tracer: Box<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn breakpoint(mut self, addr: u16) -> Self {
        self.breakpoints.push(addr);
        self
    }

    pub fn build(self) -> Result<Emulator> {
        check_fill_byte(self.fill_byte)?;

        let mut machine = Machine::new();
        machine.reset();
        machine.fill_memory(self.fill_byte);

        let mut emulator = Emulator {
            machine,
            fill_byte: self.fill_byte,
            step_limit: self.step_limit,
            tracer: self.tracer,
            breakpoints: BTreeSet::new(),
            resume_from: None,
            steps: 0,
        };
        for addr in self.breakpoints {
            emulator.set_breakpoint(addr)?;
        }
        Ok(emulator)
    }
}

#[derive(Debug)]
pub struct Emulator {
    machine: Machine,
    fill_byte: u8,
    step_limit: Option<u64>,
    tracer: Option<Box<dyn Tracer>>,
    pub(crate) breakpoints: BTreeSet<u16>,
    /// Breakpoint the last run stopped on; the next run steps over it.
    resume_from: Option<u16>,
    steps: u64,
}

impl Emulator {
    pub fn new() -> EmulatorBuilder {
        EmulatorBuilder {
            fill_byte: FILL_BYTE,
            step_limit: None,
            tracer: None,
            breakpoints: vec![],
        }
    }

    /// Replaces the machine with a freshly reset one holding `program`.
    /// On error the current machine is kept as it was.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let mut machine = Machine::new();
        machine.reset();
        machine.fill_memory(self.fill_byte);
        machine.load_program(program)?;

        self.machine = machine;
        self.steps = 0;
        self.resume_from = None;
        Ok(())
    }

    /// Executes one instruction. Steps on a halted machine are not counted
    /// and not traced.
    pub fn step(&mut self) -> StepRecord {
        if self.machine.halted() {
            return self.machine.step();
        }

        let record = self.machine.step();
        self.steps += 1;
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.on_step(&record);
            if record.halted {
                tracer.on_halt(self.steps);
            }
        }
        record
    }

    pub fn run(&mut self) -> Stop {
        let mut resume_from = self.resume_from.take();
        loop {
            if self.machine.halted() {
                debug!("halted after {} steps", self.steps);
                return Stop::Halted(self.steps);
            }

            let pc = self.machine.state().pc();
            if resume_from != Some(pc) && self.breakpoints.contains(&pc) {
                debug!("breakpoint hit at {:#06x}", pc);
                self.resume_from = Some(pc);
                return Stop::Breakpoint(pc);
            }

            if let Some(limit) = self.step_limit {
                if self.steps >= limit {
                    warn!("step limit of {} reached at {:#06x}", limit, pc);
                    return Stop::StepLimit(self.steps);
                }
            }

            self.step();
            resume_from = None;
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Instructions executed since the program was loaded
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::MEMORY_SIZE;
    use crate::log;

    #[derive(Debug, Default)]
    struct Recorder {
        records: Rc<RefCell<Vec<StepRecord>>>,
        halted_after: Rc<RefCell<Option<u64>>>,
    }

    impl Tracer for Recorder {
        fn on_step(&mut self, record: &StepRecord) {
            self.records.borrow_mut().push(*record);
        }

        fn on_halt(&mut self, steps: u64) {
            *self.halted_after.borrow_mut() = Some(steps);
        }
    }

    #[test]
    fn test_run_to_halt() {
        log::log_init(log::Level::Off);

        let mut emulator = Emulator::new().build().expect("build failed");
        emulator.load_program(&[0xA9, 0x05, 0xAA, 0x00]).expect("load failed");
        assert_eq!(emulator.run(), Stop::Halted(3));
        assert_eq!(emulator.steps(), 3);
        assert_eq!(emulator.machine().state().x(), 5);

        // Running a halted machine again changes nothing
        assert_eq!(emulator.run(), Stop::Halted(3));
        emulator.step();
        assert_eq!(emulator.steps(), 3);
    }

    #[test]
    fn test_tracer_sees_every_step() {
        let recorder = Recorder::default();
        let records = recorder.records.clone();
        let halted_after = recorder.halted_after.clone();

        let mut emulator = Emulator::new()
            .tracer(Box::new(recorder))
            .build()
            .expect("build failed");
        emulator.load_program(&[0xFF, 0xFF, 0x00]).expect("load failed");
        emulator.run();
        emulator.step();

        let records = records.borrow();
        let summary: Vec<(bool, u8, u16)> = records.iter().map(|r| (r.halted, r.ir(), r.pc)).collect();
        assert_eq!(summary, vec![(false, 0xFF, 1), (false, 0xFF, 2), (true, 0x00, 2)]);
        assert_eq!(*halted_after.borrow(), Some(3));
    }

    #[test]
    fn test_step_limit_stops_endless_loop() {
        // LDA #1; BNE -2 (branches onto itself forever)
        let mut emulator = Emulator::new().step_limit(50).build().expect("build failed");
        emulator.load_program(&[0xA9, 0x01, 0xD0, 0xFE]).expect("load failed");
        assert_eq!(emulator.run(), Stop::StepLimit(50));
        assert_eq!(emulator.machine().state().pc(), 2);
        assert!(!emulator.machine().halted());
    }

    #[test]
    fn test_breakpoint_then_resume() {
        let mut emulator = Emulator::new()
            .breakpoint(2)
            .build()
            .expect("build failed");
        emulator.load_program(&[0xA9, 0x05, 0xAA, 0x00]).expect("load failed");

        assert_eq!(emulator.run(), Stop::Breakpoint(2));
        assert_eq!(emulator.steps(), 1);
        assert_eq!(emulator.machine().state().x(), 0);

        assert_eq!(emulator.run(), Stop::Halted(3));
        assert_eq!(emulator.machine().state().x(), 5);
    }

    #[test]
    fn test_breakpoint_at_entry() {
        let mut emulator = Emulator::new().breakpoint(0).build().expect("build failed");
        emulator.load_program(&[0x00]).expect("load failed");
        assert_eq!(emulator.run(), Stop::Breakpoint(0));
        assert_eq!(emulator.steps(), 0);
        assert_eq!(emulator.run(), Stop::Halted(1));
    }

    #[test]
    fn test_breakpoint_in_loop_hits_every_pass() {
        // LDX #$FE; INX; BCC -3; HALT
        let mut emulator = Emulator::new().breakpoint(2).build().expect("build failed");
        emulator.load_program(&[0xA2, 0xFE, 0xE8, 0x90, 0xFD, 0x00]).expect("load failed");
        assert_eq!(emulator.run(), Stop::Breakpoint(2));
        assert_eq!(emulator.run(), Stop::Breakpoint(2));
        assert_eq!(emulator.machine().state().x(), 0xFF);
        assert_eq!(emulator.run(), Stop::Halted(6));
    }

    #[test]
    fn test_duplicate_breakpoint_rejected() {
        let result = Emulator::new().breakpoint(4).breakpoint(4).build();
        assert!(matches!(result, Err(Error::RepeatedBreakpoint(4))));
    }

    #[test]
    fn test_failed_load_keeps_machine() {
        let mut emulator = Emulator::new().build().expect("build failed");
        emulator.load_program(&[0x38, 0x00]).expect("load failed");
        emulator.run();

        let image = vec![0xFF; MEMORY_SIZE + 1];
        assert!(matches!(emulator.load_program(&image), Err(Error::ProgramTooLarge(..))));
        assert!(emulator.machine().halted());
        assert_eq!(emulator.machine().read_byte(0), 0x38);
    }

    #[test]
    fn test_executable_fill_byte_rejected() {
        for fill in [0x00, 0xA9, 0xD0, 0xE8] {
            let result = Emulator::new().fill_byte(fill).build();
            assert!(matches!(result, Err(Error::InvalidFillByte(b)) if b == fill));
        }
        assert!(matches!(check_fill_byte(0xA9), Err(Error::InvalidFillByte(0xA9))));
    }

    #[test]
    fn test_unassigned_fill_byte_runs_as_noop() {
        let mut emulator = Emulator::new()
            .fill_byte(0x01)
            .step_limit(2)
            .build()
            .expect("build failed");
        emulator.load_program(&[0xFF]).expect("load failed");
        assert_eq!(emulator.run(), Stop::StepLimit(2));
        assert_eq!(emulator.machine().state().pc(), 2);
        assert_eq!(emulator.machine().state().a(), 0);
        assert_eq!(emulator.peek(1), 0x01);
        assert_eq!(check_fill_byte(0x01).expect("fill rejected"), 0x01);
    }
}
