//! Shared test doubles.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use ds2406::frame::{CHANNEL_ACCESS, DEFAULT_CHANNEL_CONTROL, READ_STATUS, WRITE_STATUS};
use ds2406::{crc, BusError, BusTransport, DeviceId};
use master::{Bus, Delay, Switch};

pub const DEVICE: DeviceId = DeviceId(0x0000_0000_0042_0112);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Select,
    Pullup(u32),
    Write(Vec<u8>),
    Read(usize),
}

/// Transport replaying scripted answers and logging every call.
///
/// Selections succeed unless a failure was queued. Each read consumes
/// the next queued response; running out is a bus error.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    selects: VecDeque<Result<(), BusError>>,
    responses: VecDeque<Vec<u8>>,
    calls: Vec<Call>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_select(mut self) -> Self {
        self.selects.push_back(Err(BusError::NoPresence));
        self
    }

    pub fn pass_select(mut self) -> Self {
        self.selects.push_back(Ok(()));
        self
    }

    pub fn respond(mut self, bytes: &[u8]) -> Self {
        self.responses.push_back(bytes.to_vec());
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl BusTransport for RecordingTransport {
    fn select_and_reset(&mut self, _device: DeviceId) -> Result<(), BusError> {
        self.calls.push(Call::Select);
        self.selects.pop_front().unwrap_or(Ok(()))
    }

    fn write_bytes(&mut self, _device: DeviceId, bytes: &[u8]) -> Result<(), BusError> {
        self.calls.push(Call::Write(bytes.to_vec()));
        Ok(())
    }

    fn read_bytes(&mut self, _device: DeviceId, buf: &mut [u8]) -> Result<(), BusError> {
        self.calls.push(Call::Read(buf.len()));
        let response = self.responses.pop_front().ok_or(BusError::Io)?;
        assert_eq!(response.len(), buf.len(), "scripted response length");
        buf.copy_from_slice(&response);
        Ok(())
    }

    fn request_pullup(&mut self, _device: DeviceId, duration_ms: u32) {
        self.calls.push(Call::Pullup(duration_ms));
    }
}

/// Records waits instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits: Vec<u32>,
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
    }
}

pub fn switch<T: BusTransport>(transport: T) -> Switch<T, RecordingDelay> {
    let bus = Arc::new(Bus::with_delay(transport, RecordingDelay::default()));
    Switch::new(bus, DEVICE)
}

/// Info byte, data byte and the CRC the device would send.
pub fn channel_response(info: u8) -> Vec<u8> {
    let [lo, hi] = crc::complement(&[CHANNEL_ACCESS, DEFAULT_CHANNEL_CONTROL, 0xFF, info, 0]).to_le_bytes();
    vec![info, 0, lo, hi]
}

pub fn status_response(status: u8) -> Vec<u8> {
    let [lo, hi] = crc::complement(&[READ_STATUS, 0x07, 0x00, status]).to_le_bytes();
    vec![status, lo, hi]
}

pub fn write_response(output_byte: u8) -> Vec<u8> {
    crc::complement(&[WRITE_STATUS, 0x07, 0x00, output_byte])
        .to_le_bytes()
        .to_vec()
}

pub fn corrupt(mut response: Vec<u8>) -> Vec<u8> {
    if let Some(last) = response.last_mut() {
        *last ^= 0x80;
    }
    response
}
