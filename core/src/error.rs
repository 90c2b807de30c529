use std::error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// (image length, memory capacity)
    ProgramTooLarge(usize, usize),
    /// Program text that is not a sequence of hex bytes
    InvalidProgram(String),
    IoError(std::io::Error, String),
    /// Fill byte that would not execute as NOOP
    InvalidFillByte(u8),
    /// Raised by drivers that treat hitting the step limit as fatal
    StepLimitExceeded(u64),

    // Debug
    RepeatedBreakpoint(u16),
    BreakpointNotFound(u16),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ProgramTooLarge(len, capacity) => {
                write!(f, "Program too large: {} bytes, memory holds {}", len, capacity)
            }
            Error::InvalidProgram(msg) => write!(f, "Invalid program: {}", msg),
            Error::InvalidFillByte(byte) => {
                write!(f, "Invalid fill byte {:#04x}: it does not decode as NOOP", byte)
            }
            Error::StepLimitExceeded(limit) => {
                write!(f, "Program did not halt within {} steps", limit)
            }
            Error::RepeatedBreakpoint(addr) => write!(f, "Repeated breakpoint at {:#06x}", addr),
            Error::BreakpointNotFound(addr) => write!(f, "Breakpoint not found at {:#06x}", addr),
            Error::IoError(err, path) => {
                let msg = err.to_string();
                if path.is_empty() {
                    write!(f, "I/O error: {}", msg)
                } else {
                    write!(f, "I/O error on '{}': {}", path, msg)
                }
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IoError(err, _) => Some(err),
            _ => None,
        }
    }
}
