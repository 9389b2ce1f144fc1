//! Seam towards the bus master hardware.
//!
//! Reset pulses, ROM addressing, bit timing and the strong pull-up are the
//! transport's business. The protocol code only sees bytes.

use crate::DeviceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// No device answered the reset pulse, or addressing failed.
    #[error("no presence pulse")]
    NoPresence,
    #[error("bus transfer failed")]
    Io,
}

/// Byte level access to one bus.
///
/// Implementations report failures and never retry on their own. Callers
/// hold exclusive access to the bus for a whole command sequence.
pub trait BusTransport {
    /// Reset the bus and address `device`.
    fn select_and_reset(&mut self, device: DeviceId) -> Result<(), BusError>;

    fn write_bytes(&mut self, device: DeviceId, bytes: &[u8]) -> Result<(), BusError>;

    /// Fill `buf` with bytes read from the bus.
    fn read_bytes(&mut self, device: DeviceId, buf: &mut [u8]) -> Result<(), BusError>;

    /// Arm a strong pull-up of `duration_ms` after the next write.
    fn request_pullup(&mut self, device: DeviceId, duration_ms: u32);

    fn write_byte(&mut self, device: DeviceId, byte: u8) -> Result<(), BusError> {
        self.write_bytes(device, &[byte])
    }
}
