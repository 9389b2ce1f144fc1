//! CRC-16 checks used to accept device responses.
//!
//! The device uses CRC-16/ARC (polynomial 0x8005 reflected, init 0) and
//! transmits the complement of the register, least significant byte first.
//! That gives two equivalent ways to accept a response: recompute and
//! complement, or run the register over the whole frame including the
//! transmitted CRC and compare with the fixed residue.

use crc::{Crc, CRC_16_ARC};

pub const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// Register value after running over a frame and its complemented CRC.
pub const GOOD_RESIDUE: u16 = 0xB001;

/// Complemented CRC-16 of a block, as the device transmits it.
pub fn complement(bytes: &[u8]) -> u16 {
    !CRC16.checksum(bytes)
}

/// CRC-16 accumulated one byte at a time.
pub fn running(bytes: &[u8]) -> u16 {
    let mut digest = CRC16.digest();
    for &byte in bytes {
        digest.update(&[byte]);
    }
    digest.finalize()
}

/// Little endian CRC as it appears on the wire.
pub const fn embedded(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        // CRC-16/ARC check value for "123456789"
        assert_eq!(CRC16.checksum(b"123456789"), 0xBB3D);
        assert_eq!(running(b"123456789"), 0xBB3D);
    }

    #[test]
    fn residue_after_complemented_crc() {
        let body = [0xAA, 0x07, 0x00, 0x5F];
        let [lo, hi] = complement(&body).to_le_bytes();
        let frame = [body[0], body[1], body[2], body[3], lo, hi];
        assert_eq!(running(&frame), GOOD_RESIDUE);
    }

    #[test]
    fn corrupted_byte_breaks_residue() {
        let body = [0x55, 0x07, 0x00, 0x3F];
        let [lo, hi] = complement(&body).to_le_bytes();
        let frame = [body[0], body[1], body[2], body[3] ^ 0x40, lo, hi];
        assert_ne!(running(&frame), GOOD_RESIDUE);
    }

    #[test]
    fn embedded_is_little_endian() {
        assert_eq!(embedded(0x01, 0xB0), 0xB001);
    }
}
