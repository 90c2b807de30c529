//! Breakpoints and memory inspection for a stopped emulator.

use crate::emulator::*;
use crate::error::*;

impl Emulator {
    pub fn peek(&self, addr: u16) -> u8 {
        self.machine().read_byte(addr)
    }

    pub fn set_breakpoint(&mut self, addr: u16) -> Result<()> {
        if !self.breakpoints.insert(addr) {
            return Err(Error::RepeatedBreakpoint(addr));
        }
        Ok(())
    }

    pub fn rm_breakpoint(&mut self, addr: u16) -> Result<()> {
        if !self.breakpoints.remove(&addr) {
            return Err(Error::BreakpointNotFound(addr));
        }
        Ok(())
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = u16> + '_ {
        self.breakpoints.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_remove() {
        let mut emulator = Emulator::new().build().expect("build failed");
        emulator.set_breakpoint(0x10).expect("set failed");
        emulator.set_breakpoint(0x04).expect("set failed");
        assert!(matches!(emulator.set_breakpoint(0x10), Err(Error::RepeatedBreakpoint(0x10))));
        assert_eq!(emulator.breakpoints().collect::<Vec<_>>(), vec![0x04, 0x10]);

        emulator.rm_breakpoint(0x10).expect("remove failed");
        assert!(matches!(emulator.rm_breakpoint(0x10), Err(Error::BreakpointNotFound(0x10))));
        assert_eq!(emulator.breakpoints().collect::<Vec<_>>(), vec![0x04]);
    }

    #[test]
    fn test_removed_breakpoint_no_longer_stops() {
        let mut emulator = Emulator::new().breakpoint(1).build().expect("build failed");
        emulator.load_program(&[0xFF, 0xFF, 0x00]).expect("load failed");
        emulator.rm_breakpoint(1).expect("remove failed");
        assert_eq!(emulator.run(), Stop::Halted(3));
    }

    #[test]
    fn test_peek() {
        let mut emulator = Emulator::new().build().expect("build failed");
        emulator.load_program(&[0xA9, 0x42]).expect("load failed");
        assert_eq!(emulator.peek(1), 0x42);
        assert_eq!(emulator.peek(2), 0xFF);
    }
}
