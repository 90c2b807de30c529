// mini65 is a small byte-code virtual machine with a 65xx-flavoured instruction set.

pub mod log;
pub mod config;
pub mod error;
pub mod state;
pub mod memory;
pub mod insn;
pub mod cpu;
pub mod machine;
pub mod trace;
pub mod emulator;
pub mod debug;
pub mod disasm;
pub mod utils;

pub use error::{
    Error,
    Result,
};
