//! # CRC-8/DVB-S2
//!
//! Checksum trailing every serial frame.
//!
//! **Polynomial**: 0xD5, **Initial Value**: 0x00, no reflection, no final XOR.

/// CRC-8/DVB-S2 polynomial
const POLY: u8 = 0xD5;

/// Lookup table built at compile time
const TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;

        while bit < 8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
            bit += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Computes the CRC-8/DVB-S2 checksum of `data`.
///
/// # Examples
///
/// ```
/// use teleop_joystick::transport::crc::crc8;
///
/// assert_eq!(crc8(b"123456789"), 0xBC);
/// ```
#[must_use]
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0, |crc, &byte| TABLE[(crc ^ byte) as usize])
}
