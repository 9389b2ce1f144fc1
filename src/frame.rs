//! Command frames.
//!
//! Each frame owns one buffer holding the command bytes followed by the
//! response bytes, since both acceptance checks run over the two together.
//! Frames are built fresh for every operation.

use crate::crc;
use crate::status::OutputState;

pub const READ_STATUS: u8 = 0xAA;
pub const WRITE_STATUS: u8 = 0x55;
pub const CHANNEL_ACCESS: u8 = 0xF5;

/// Written after a validated status write to make it take effect.
pub const COMMIT: u8 = 0xFF;

/// Address of the status byte in status memory.
pub const STATUS_ADDRESS: u16 = 7;

/// Channel control byte sent by the deployed driver.
///
/// Its source literal `0xb01000101` is hexadecimal and truncates to 0x01,
/// not the binary pattern 0x45 (PIO-A, CRC after every byte) it resembles.
pub const DEFAULT_CHANNEL_CONTROL: u8 = 0x01;

/// Second channel control byte, reserved bits.
pub const CHANNEL_CONTROL_2: u8 = 0xFF;

/// Result of a checksum comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    pub expected: u16,
    pub computed: u16,
}

impl Checksum {
    pub const fn is_valid(&self) -> bool {
        self.expected == self.computed
    }
}

pub trait Frame {
    /// Bytes to put on the bus after selecting the device.
    fn command(&self) -> &[u8];

    /// Space for the device's answer.
    fn response_mut(&mut self) -> &mut [u8];

    fn checksum(&self) -> Checksum;
}

/// Channel access: 3 bytes out, info byte, data byte and complemented CRC in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRead {
    bytes: [u8; 7],
}

impl ChannelRead {
    pub const COMMAND_LEN: usize = 3;
    pub const RESPONSE_LEN: usize = 4;

    pub const fn new(control: u8) -> Self {
        Self {
            bytes: [CHANNEL_ACCESS, control, CHANNEL_CONTROL_2, 0, 0, 0, 0],
        }
    }

    /// Channel info byte, see [`ChannelState`](crate::ChannelState).
    pub const fn info(&self) -> u8 {
        self.bytes[3]
    }
}

impl Frame for ChannelRead {
    fn command(&self) -> &[u8] {
        &self.bytes[..Self::COMMAND_LEN]
    }

    fn response_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[Self::COMMAND_LEN..]
    }

    // complement mode, CRC embedded at response offset 2..4
    fn checksum(&self) -> Checksum {
        Checksum {
            expected: crc::embedded(self.bytes[5], self.bytes[6]),
            computed: crc::complement(&self.bytes[..5]),
        }
    }
}

/// Read of the status byte: 3 bytes out, status byte and complemented CRC in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRead {
    bytes: [u8; 6],
}

impl StatusRead {
    pub const COMMAND_LEN: usize = 3;
    pub const RESPONSE_LEN: usize = 3;

    pub const fn new() -> Self {
        let [lo, hi] = STATUS_ADDRESS.to_le_bytes();
        Self {
            bytes: [READ_STATUS, lo, hi, 0, 0, 0],
        }
    }

    pub const fn status(&self) -> u8 {
        self.bytes[3]
    }
}

impl Default for StatusRead {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame for StatusRead {
    fn command(&self) -> &[u8] {
        &self.bytes[..Self::COMMAND_LEN]
    }

    fn response_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[Self::COMMAND_LEN..]
    }

    fn checksum(&self) -> Checksum {
        Checksum {
            expected: crc::GOOD_RESIDUE,
            computed: crc::running(&self.bytes),
        }
    }
}

/// Write of the status byte: 4 bytes out, complemented CRC in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWrite {
    bytes: [u8; 6],
}

impl StatusWrite {
    pub const COMMAND_LEN: usize = 4;
    pub const RESPONSE_LEN: usize = 2;

    pub const fn new(output: OutputState) -> Self {
        let [lo, hi] = STATUS_ADDRESS.to_le_bytes();
        Self {
            bytes: [WRITE_STATUS, lo, hi, output.encode(), 0, 0],
        }
    }

    pub const fn output_byte(&self) -> u8 {
        self.bytes[3]
    }
}

impl Frame for StatusWrite {
    fn command(&self) -> &[u8] {
        &self.bytes[..Self::COMMAND_LEN]
    }

    fn response_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[Self::COMMAND_LEN..]
    }

    fn checksum(&self) -> Checksum {
        Checksum {
            expected: crc::GOOD_RESIDUE,
            computed: crc::running(&self.bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(frame: &mut impl Frame, response: &[u8]) {
        frame.response_mut().copy_from_slice(response);
    }

    #[test]
    fn command_layouts() {
        assert_eq!(ChannelRead::new(DEFAULT_CHANNEL_CONTROL).command(), &[0xF5, 0x01, 0xFF]);
        assert_eq!(StatusRead::new().command(), &[0xAA, 0x07, 0x00]);
        let write = StatusWrite::new(OutputState::from_low_bits(2));
        assert_eq!(write.command(), &[0x55, 0x07, 0x00, 0x5F]);
        assert_eq!(write.output_byte(), 0x5F);
    }

    #[test]
    fn response_lengths() {
        assert_eq!(ChannelRead::new(0).response_mut().len(), ChannelRead::RESPONSE_LEN);
        assert_eq!(StatusRead::new().response_mut().len(), StatusRead::RESPONSE_LEN);
        let mut write = StatusWrite::new(OutputState::from_low_bits(0));
        assert_eq!(write.response_mut().len(), StatusWrite::RESPONSE_LEN);
    }

    #[test]
    fn channel_read_accepts_complemented_crc() {
        let mut frame = ChannelRead::new(DEFAULT_CHANNEL_CONTROL);
        let [lo, hi] = crc::complement(&[0xF5, 0x01, 0xFF, 0x5A, 0x00]).to_le_bytes();
        fill(&mut frame, &[0x5A, 0x00, lo, hi]);
        assert!(frame.checksum().is_valid());
        assert_eq!(frame.info(), 0x5A);

        fill(&mut frame, &[0x5B, 0x00, lo, hi]);
        assert!(!frame.checksum().is_valid());
    }

    #[test]
    fn status_read_accepts_residue() {
        let mut frame = StatusRead::new();
        let [lo, hi] = crc::complement(&[0xAA, 0x07, 0x00, 0x3F]).to_le_bytes();
        fill(&mut frame, &[0x3F, lo, hi]);
        let checksum = frame.checksum();
        assert!(checksum.is_valid());
        assert_eq!(checksum.computed, crc::GOOD_RESIDUE);
        assert_eq!(frame.status(), 0x3F);
    }

    #[test]
    fn status_write_rejects_idle_bus() {
        // nothing answering leaves the line high
        let mut frame = StatusWrite::new(OutputState::from_low_bits(1));
        fill(&mut frame, &[0xFF, 0xFF]);
        assert!(!frame.checksum().is_valid());
    }
}
