//! Parsing helpers for program text and numeric arguments.

use crate::error::*;

fn strip_hex_prefix(token: &str) -> Option<&str> {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('$'))
}

/// Parses `0x1f`, `$1f` or decimal `31`.
pub fn parse_number(text: &str) -> Result<u32> {
    let text = text.trim();
    let parsed = match strip_hex_prefix(text) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|_| Error::InvalidProgram(format!("not a number: '{}'", text)))
}

pub fn parse_u8(text: &str) -> Result<u8> {
    let value = parse_number(text)?;
    u8::try_from(value).map_err(|_| Error::InvalidProgram(format!("{:#x} does not fit in a byte", value)))
}

pub fn parse_u16(text: &str) -> Result<u16> {
    let value = parse_number(text)?;
    u16::try_from(value).map_err(|_| Error::InvalidProgram(format!("{:#x} is not a 16-bit address", value)))
}

/// Parses program text into bytes.
///
/// Bytes are hex, separated by whitespace or commas, with an optional `0x`
/// or `$` prefix. A `;` starts a comment running to the end of the line.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for line in text.lines() {
        let code = line.split(';').next().unwrap_or("");
        for token in code.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }
            let digits = strip_hex_prefix(token).unwrap_or(token);
            if digits.is_empty() || digits.len() > 2 {
                return Err(Error::InvalidProgram(format!("bad byte '{}'", token)));
            }
            let byte = u8::from_str_radix(digits, 16)
                .map_err(|_| Error::InvalidProgram(format!("bad byte '{}'", token)))?;
            bytes.push(byte);
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let bytes = parse_hex("a9 05, $AA 0x00").expect("parse failed");
        assert_eq!(bytes, vec![0xA9, 0x05, 0xAA, 0x00]);
    }

    #[test]
    fn test_parse_hex_comments() {
        let text = "; count to five\nA9 05 ; LDA #5\n\nAA    ; TAX\n00\n";
        assert_eq!(parse_hex(text).expect("parse failed"), vec![0xA9, 0x05, 0xAA, 0x00]);
        assert_eq!(parse_hex("  ").expect("parse failed"), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(parse_hex("A9 0G"), Err(Error::InvalidProgram(_))));
        assert!(matches!(parse_hex("123"), Err(Error::InvalidProgram(_))));
        assert!(matches!(parse_hex("$"), Err(Error::InvalidProgram(_))));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_u16("0x1234").expect("parse failed"), 0x1234);
        assert_eq!(parse_u16("$ff").expect("parse failed"), 0xFF);
        assert_eq!(parse_u16("42").expect("parse failed"), 42);
        assert_eq!(parse_u8("0xff").expect("parse failed"), 0xFF);
        assert!(parse_u8("256").is_err());
        assert!(parse_u16("0x10000").is_err());
        assert!(parse_number("abc").is_err());
    }
}
