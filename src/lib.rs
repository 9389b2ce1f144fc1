#![no_std]
//! Protocol core for the DS2406 dual channel addressable switch.
//!
//! Everything here is shared between the bus master (`master`) and the
//! simulated device (`servant`): command frames, the CRC-16 acceptance
//! checks, status byte interpretation and the transport seam.

#[cfg(test)]
extern crate std;

use core::fmt;

pub mod bus;
pub mod crc;
pub mod frame;
pub mod status;

pub use bus::{BusError, BusTransport};
pub use frame::{Checksum, Frame};
pub use status::{ChannelState, Flag, FlagTest, OutputState};

/// 1-Wire family code of the DS2406.
pub const FAMILY_CODE: u8 = 0x12;

/// 64-bit ROM registration number of a device on the bus.
///
/// Family code in the low byte, 48-bit serial above it, ROM CRC in the top byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

impl DeviceId {
    pub const fn family(&self) -> u8 {
        self.0 as u8
    }

    pub const fn serial(&self) -> u64 {
        (self.0 >> 8) & 0xFFFF_FFFF_FFFF
    }

    pub const fn is_ds2406(&self) -> bool {
        self.family() == FAMILY_CODE
    }
}

// same naming as the kernel uses for slave directories, e.g. `12-00000a1b2c3d`
impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}-{:012x}", self.family(), self.serial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn device_id_parts() {
        let id = DeviceId(0xA5_00000A1B2C3D_12);
        assert_eq!(id.family(), FAMILY_CODE);
        assert!(id.is_ds2406());
        assert_eq!(id.serial(), 0x0000_0A1B_2C3D);
        assert_eq!(id.to_string(), "12-00000a1b2c3d");
    }

    #[test]
    fn other_family_is_not_ds2406() {
        assert!(!DeviceId(0x3A).is_ds2406());
    }
}
