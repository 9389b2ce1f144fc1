//! Error types for the bus master.

use ds2406::{BusError, DeviceId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong offset, wrong input length, missing buffer or wrong access.
    /// Raised before the bus is touched.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("device {device} did not answer reset/select")]
    Selection {
        device: DeviceId,
        #[source]
        source: BusError,
    },

    #[error("crc error on {device}: computed {computed:#06x}, expected {expected:#06x}")]
    ChecksumMismatch {
        device: DeviceId,
        expected: u16,
        computed: u16,
    },

    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    #[error("failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    /// Failures of the bus exchange itself, what a host reports as EIO.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Selection { .. } | Error::ChecksumMismatch { .. } | Error::Bus(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: DeviceId = DeviceId(0x12);

    #[test]
    fn display_checksum_mismatch() {
        let e = Error::ChecksumMismatch {
            device: DEVICE,
            expected: 0xB001,
            computed: 0x1234,
        };
        assert_eq!(
            e.to_string(),
            "crc error on 12-000000000000: computed 0x1234, expected 0xb001"
        );
        assert!(e.is_io());
    }

    #[test]
    fn display_selection() {
        let e = Error::Selection {
            device: DEVICE,
            source: BusError::NoPresence,
        };
        assert_eq!(e.to_string(), "device 12-000000000000 did not answer reset/select");
        assert!(e.is_io());
    }

    #[test]
    fn parameter_is_not_io() {
        let e = Error::InvalidParameter("offset must be 0");
        assert_eq!(e.to_string(), "invalid parameter: offset must be 0");
        assert!(!e.is_io());
    }
}
