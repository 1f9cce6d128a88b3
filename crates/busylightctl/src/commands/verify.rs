//! `verify`: check the trailing checksum of a captured buffer.

use anyhow::Result;
use busylight_hid_protocol::{BUFFER_LEN, CHECKSUM_OFFSET, checksum_of, verify_checksum};

use crate::error::CliError;
use crate::output;

pub fn execute(hex: &str, json: bool) -> Result<()> {
    let buffer = parse_hex_buffer(hex)?;
    let (body, trailer) = buffer.split_at(CHECKSUM_OFFSET);
    let computed = checksum_of(body);

    if verify_checksum(&buffer) {
        output::print_verified(computed, json);
        Ok(())
    } else {
        let stored = match trailer {
            [msb, lsb] => u16::from_be_bytes([*msb, *lsb]),
            _ => 0,
        };
        Err(CliError::ChecksumMismatch { stored, computed }.into())
    }
}

/// Parse 64 bytes of hex. Whitespace between digits is ignored.
pub fn parse_hex_buffer(input: &str) -> Result<[u8; BUFFER_LEN], CliError> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() != BUFFER_LEN * 2 {
        return Err(CliError::ValidationError(format!(
            "expected {} hex digits, found {}",
            BUFFER_LEN * 2,
            digits.len()
        )));
    }

    let mut buffer = [0u8; BUFFER_LEN];
    for (i, (byte, pair)) in buffer.iter_mut().zip(digits.chunks_exact(2)).enumerate() {
        *byte = Some(pair)
            .filter(|p| p.iter().all(u8::is_ascii_hexdigit))
            .and_then(|p| std::str::from_utf8(p).ok())
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| {
                CliError::ValidationError(format!("invalid hex byte at position {i}"))
            })?;
    }
    Ok(buffer)
}
