//! Human readable listing of a program image.

use crate::config::FILL_BYTE;
use crate::insn::branch::branch_target;
use crate::insn::{decode, Operand};

/// Disassembles `image` as if loaded at `origin`, one instruction per line.
///
/// An operand cut off by the end of the image is read as [`FILL_BYTE`],
/// which is what the machine would see after loading the image.
pub fn disassemble(image: &[u8], origin: u16) -> String {
    let mut out = String::new();
    let mut offset = 0usize;
    while offset < image.len() {
        let next = image.get(offset + 1).copied().unwrap_or(FILL_BYTE);
        let (insn, _) = decode(image[offset], next);
        let size = (insn.step_size() as usize).min(image.len() - offset);
        let addr = origin.wrapping_add(offset as u16);

        let hex = image[offset..offset + size]
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let text = match insn.operand {
            Operand::Displacement(disp) => {
                format!("{} ${:04X}", insn.opcode.mnemonic(), branch_target(addr, disp))
            }
            _ => insn.to_string(),
        };

        out.push_str(&format!("{addr:04X}: {hex:<6} {text}\n"));
        offset += size;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing() {
        let listing = disassemble(&[0xA9, 0x05, 0xAA, 0xD0, 0xFB, 0x00], 0);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines, vec![
            "0000: A9 05  LDA #$05",
            "0002: AA     TAX",
            "0003: D0 FB  BNE $0000",
            "0005: 00     HALT",
        ]);
    }

    #[test]
    fn test_unassigned_and_truncated() {
        let listing = disassemble(&[0x4C, 0xA2], 0x0200);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines, vec![
            "0200: 4C     NOOP ; $4C JMP (reserved)",
            "0201: A2     LDX #$FF",
        ]);
    }

    #[test]
    fn test_empty_image() {
        assert!(disassemble(&[], 0).is_empty());
    }
}
