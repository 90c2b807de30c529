//! Instruction decoding.
//!
//! Every byte decodes to something: bytes without an opcode of their own
//! decode as `NOOP`, so execution through unused memory is well defined.

use std::fmt;

use crate::state::State;

pub mod arith;
pub mod branch;
pub mod load;
pub mod system;
pub mod transfer;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Halt = 0x00,
    Clc = 0x18,
    Sec = 0x38,
    Dey = 0x88,
    Txa = 0x8A,
    Bcc = 0x90,
    Tys = 0x91,
    Tsy = 0x92,
    Tya = 0x98,
    Txs = 0x9A,
    Ldy = 0xA0,
    Ldx = 0xA2,
    Tay = 0xA8,
    Lda = 0xA9,
    Tax = 0xAA,
    Bcs = 0xB0,
    Tsx = 0xBA,
    Iny = 0xC8,
    Dex = 0xCA,
    Bne = 0xD0,
    Inx = 0xE8,
    Beq = 0xF0,
    Noop = 0xFF,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Inherent,
    Immediate,
    Relative,
}

impl AddrMode {
    pub fn operand_bytes(&self) -> u16 {
        match self {
            AddrMode::Inherent => 0,
            AddrMode::Immediate | AddrMode::Relative => 1,
        }
    }
}

impl Opcode {
    pub const ALL: [Opcode; 23] = [
        Opcode::Halt, Opcode::Clc, Opcode::Sec, Opcode::Dey, Opcode::Txa,
        Opcode::Bcc, Opcode::Tys, Opcode::Tsy, Opcode::Tya, Opcode::Txs,
        Opcode::Ldy, Opcode::Ldx, Opcode::Tay, Opcode::Lda, Opcode::Tax,
        Opcode::Bcs, Opcode::Tsx, Opcode::Iny, Opcode::Dex, Opcode::Bne,
        Opcode::Inx, Opcode::Beq, Opcode::Noop,
    ];

    pub fn from_byte(raw: u8) -> Option<Opcode> {
        use Opcode::*;
        let opcode = match raw {
            0x00 => Halt,
            0x18 => Clc,
            0x38 => Sec,
            0x88 => Dey,
            0x8A => Txa,
            0x90 => Bcc,
            0x91 => Tys,
            0x92 => Tsy,
            0x98 => Tya,
            0x9A => Txs,
            0xA0 => Ldy,
            0xA2 => Ldx,
            0xA8 => Tay,
            0xA9 => Lda,
            0xAA => Tax,
            0xB0 => Bcs,
            0xBA => Tsx,
            0xC8 => Iny,
            0xCA => Dex,
            0xD0 => Bne,
            0xE8 => Inx,
            0xF0 => Beq,
            0xFF => Noop,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Halt => "HALT",
            Clc => "CLC",
            Sec => "SEC",
            Dey => "DEY",
            Txa => "TXA",
            Bcc => "BCC",
            Tys => "TYS",
            Tsy => "TSY",
            Tya => "TYA",
            Txs => "TXS",
            Ldy => "LDY",
            Ldx => "LDX",
            Tay => "TAY",
            Lda => "LDA",
            Tax => "TAX",
            Bcs => "BCS",
            Tsx => "TSX",
            Iny => "INY",
            Dex => "DEX",
            Bne => "BNE",
            Inx => "INX",
            Beq => "BEQ",
            Noop => "NOOP",
        }
    }

    pub fn mode(&self) -> AddrMode {
        use Opcode::*;
        match self {
            Lda | Ldx | Ldy => AddrMode::Immediate,
            Beq | Bne | Bcs | Bcc => AddrMode::Relative,
            _ => AddrMode::Inherent,
        }
    }
}

/// Mnemonics that have an opcode reserved for them but no implementation.
/// They execute as NOOP.
pub fn reserved_mnemonic(raw: u8) -> Option<&'static str> {
    let name = match raw {
        0x09 => "ORA",
        0x29 => "AND",
        0x2A => "ROL",
        0x48 => "PHA",
        0x49 => "EOR",
        0x4C => "JMP",
        0x68 => "PLA",
        0x69 => "ADC",
        0x6A => "ROR",
        0xC0 => "CPY",
        0xC9 => "CMP",
        0xE0 => "CPX",
        // 0xE8 belongs to INX
        0xE9 => "SBC",
        _ => return None,
    };
    Some(name)
}

/// True if `raw` executes as NOOP: the NOOP opcode or any unassigned byte.
pub fn is_noop(raw: u8) -> bool {
    !matches!(Opcode::from_byte(raw), Some(opcode) if opcode != Opcode::Noop)
}

/// Decoded operand, handed to the executor by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Immediate(u8),
    Displacement(i8),
}

impl Operand {
    pub fn byte(&self) -> u8 {
        match *self {
            Operand::None => 0,
            Operand::Immediate(value) => value,
            Operand::Displacement(disp) => disp as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Operand,
    /// The fetched byte; differs from `opcode` for unassigned bytes.
    pub raw: u8,
}

impl Instruction {
    pub fn step_size(&self) -> u16 {
        1 + self.opcode.mode().operand_bytes()
    }

    pub fn is_unassigned(&self) -> bool {
        self.raw != self.opcode as u8
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode.mnemonic())?;
        match self.operand {
            Operand::None => {}
            Operand::Immediate(value) => write!(f, " #${:02X}", value)?,
            Operand::Displacement(disp) => write!(f, " {:+}", disp)?,
        }
        if self.is_unassigned() {
            match reserved_mnemonic(self.raw) {
                Some(name) => write!(f, " ; ${:02X} {} (reserved)", self.raw, name)?,
                None => write!(f, " ; ${:02X}", self.raw)?,
            }
        }
        Ok(())
    }
}

/// What the engine does with the program counter after an executor ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Move past the instruction and its operand
    Next,
    Jump(u16),
    /// Leave the program counter where it is
    Stop,
}

pub type Executor = fn(&mut State, Operand) -> Control;

/// Decodes `raw`, taking `next` as its operand byte if it has one.
pub fn decode(raw: u8, next: u8) -> (Instruction, Executor) {
    use Opcode::*;

    let opcode = Opcode::from_byte(raw).unwrap_or(Noop);
    let operand = match opcode.mode() {
        AddrMode::Inherent => Operand::None,
        AddrMode::Immediate => Operand::Immediate(next),
        AddrMode::Relative => Operand::Displacement(next as i8),
    };

    let executor: Executor = match opcode {
        Halt => system::halt,
        Noop => system::noop,
        Clc => system::clc,
        Sec => system::sec,
        Lda => load::lda,
        Ldx => load::ldx,
        Ldy => load::ldy,
        Tax => transfer::tax,
        Tay => transfer::tay,
        Tya => transfer::tya,
        Txa => transfer::txa,
        Txs => transfer::txs,
        Tys => transfer::tys,
        Tsx => transfer::tsx,
        Tsy => transfer::tsy,
        Iny => arith::iny,
        Inx => arith::inx,
        Dey => arith::dey,
        Dex => arith::dex,
        Beq => branch::beq,
        Bne => branch::bne,
        Bcs => branch::bcs,
        Bcc => branch::bcc,
    };

    (Instruction { opcode, operand, raw }, executor)
}
