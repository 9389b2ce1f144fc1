//! A DS2406 on a simulated bus.
//!
//! [`SimulatedSwitch`] sits behind [`BusTransport`] and answers command
//! frames the way the device does, complemented CRC included. Faults can be
//! injected to exercise the master's retry and rejection paths.

use std::collections::VecDeque;

use ds2406::frame::{CHANNEL_ACCESS, COMMIT, READ_STATUS, STATUS_ADDRESS, WRITE_STATUS};
use ds2406::{crc, BusError, BusTransport, DeviceId};
use tracing::trace;

// what the master reads when nobody drives the line
const IDLE: u8 = 0xFF;
// supply indication, read-only in the status byte
const STATUS_READ_ONLY: u8 = 0x80;

#[derive(Debug)]
pub struct SimulatedSwitch {
    device: DeviceId,
    status: u8,
    channel_info: u8,
    channel_data: u8,

    selected: bool,
    received: Vec<u8>,
    response: VecDeque<u8>,
    pending_status: Option<u8>,

    fail_selects: usize,
    corrupt_responses: usize,

    selections: usize,
    commits: usize,
    pullups: Vec<u32>,
}

impl SimulatedSwitch {
    pub fn new(device: DeviceId) -> Self {
        Self {
            device,
            // both outputs off, low bits set
            status: 0x7F,
            channel_info: 0,
            channel_data: 0,
            selected: false,
            received: Vec::new(),
            response: VecDeque::new(),
            pending_status: None,
            fail_selects: 0,
            corrupt_responses: 0,
            selections: 0,
            commits: 0,
            pullups: Vec::new(),
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Info byte answered to a channel access.
    pub fn set_channel_info(&mut self, info: u8) {
        self.channel_info = info;
    }

    /// Data byte following the info byte.
    pub fn set_channel_data(&mut self, data: u8) {
        self.channel_data = data;
    }

    /// Miss the presence pulse on the next `count` resets.
    pub fn fail_next_selects(&mut self, count: usize) {
        self.fail_selects = count;
    }

    /// Flip a CRC bit in the next `count` responses.
    pub fn corrupt_next_responses(&mut self, count: usize) {
        self.corrupt_responses = count;
    }

    /// Resets that reached the device, failed ones included.
    pub fn selections(&self) -> usize {
        self.selections
    }

    /// Status writes that took effect.
    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn pullups(&self) -> &[u32] {
        &self.pullups
    }

    fn receive(&mut self, byte: u8) {
        if self.pending_status.is_some() && self.response.is_empty() && byte == COMMIT {
            if let Some(status) = self.pending_status.take() {
                self.status = (status & !STATUS_READ_ONLY) | (self.status & STATUS_READ_ONLY);
                self.commits += 1;
                trace!(status = self.status, "status committed");
            }
            return;
        }

        self.received.push(byte);
        match self.received[..] {
            [CHANNEL_ACCESS, _, _] => {
                let info = self.channel_info;
                let data = self.channel_data;
                self.received.extend([info, data]);
                self.respond(&[info, data]);
            }
            [READ_STATUS, lo, hi] if u16::from_le_bytes([lo, hi]) == STATUS_ADDRESS => {
                let status = self.status;
                self.received.push(status);
                self.respond(&[status]);
            }
            [WRITE_STATUS, lo, hi, data] if u16::from_le_bytes([lo, hi]) == STATUS_ADDRESS => {
                self.pending_status = Some(data);
                self.respond(&[]);
            }
            _ => {}
        }
    }

    // queue `payload` and the complemented CRC over everything seen so far
    fn respond(&mut self, payload: &[u8]) {
        let mut crc = crc::complement(&self.received);
        if self.corrupt_responses > 0 {
            self.corrupt_responses -= 1;
            crc ^= 0x0100;
            trace!("corrupting response");
        }
        self.response.extend(payload);
        self.response.extend(crc.to_le_bytes());
    }
}

impl BusTransport for SimulatedSwitch {
    fn select_and_reset(&mut self, device: DeviceId) -> Result<(), BusError> {
        self.selected = false;
        self.received.clear();
        self.response.clear();
        self.pending_status = None;
        self.selections += 1;

        if self.fail_selects > 0 {
            self.fail_selects -= 1;
            return Err(BusError::NoPresence);
        }
        if device != self.device {
            return Err(BusError::NoPresence);
        }
        self.selected = true;
        Ok(())
    }

    fn write_bytes(&mut self, _device: DeviceId, bytes: &[u8]) -> Result<(), BusError> {
        if !self.selected {
            return Err(BusError::Io);
        }
        trace!(?bytes, "write");
        for &byte in bytes {
            self.receive(byte);
        }
        Ok(())
    }

    fn read_bytes(&mut self, _device: DeviceId, buf: &mut [u8]) -> Result<(), BusError> {
        if !self.selected {
            return Err(BusError::Io);
        }
        for byte in buf.iter_mut() {
            *byte = self.response.pop_front().unwrap_or(IDLE);
        }
        trace!(?buf, "read");
        Ok(())
    }

    fn request_pullup(&mut self, _device: DeviceId, duration_ms: u32) {
        self.pullups.push(duration_ms);
    }
}
