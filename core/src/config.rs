/// Addressable memory, covering the whole 16-bit address space.
pub const MEMORY_SIZE: usize = 0x10000; // 64 KiB

pub const STACK_SIZE: usize = 0x100;

/// Stack pointer value of an empty stack
pub const STACK_POINTER_INIT: u8 = 0xFF;

/// Memory is filled with this byte before a program is loaded.
/// It decodes as NOOP, so running off the end of a program is harmless.
pub const FILL_BYTE: u8 = 0xFF;

/// Instructions the cli runner executes before giving up on a program
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;
