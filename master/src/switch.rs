//! Command sequences for one DS2406 on a shared bus.
//!
//! Each public operation takes the bus lock, then runs
//! select → write → (delay) → read → validate. Only a response whose CRC
//! checks out is decoded or acted on. Channel reads retry a bounded number
//! of times; status reads and writes get exactly one attempt.

use std::sync::Arc;

use ds2406::frame::{ChannelRead, StatusRead, StatusWrite, COMMIT};
use ds2406::{BusTransport, ChannelState, Checksum, DeviceId, Frame, OutputState};
use tracing::{debug, info, warn};

use crate::bus::Bus;
use crate::config::DriverConfig;
use crate::delay::{Delay, StdDelay};
use crate::error::{Error, Result};

const CHANNEL_READ_ATTEMPTS: usize = 3;
// strong pull-up powering the device through the channel access
const CHANNEL_PULLUP_MS: u32 = 5;
// time for the device to sample its channels
const CHANNEL_RESPONSE_DELAY_MS: u32 = 5;
const CHANNEL_RETRY_DELAY_MS: u32 = 40;

/// Driver handle for one device.
#[derive(Debug)]
pub struct Switch<T, D = StdDelay> {
    bus: Arc<Bus<T, D>>,
    device: DeviceId,
    config: DriverConfig,
}

impl<T, D> Clone for Switch<T, D> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
            device: self.device,
            config: self.config,
        }
    }
}

impl<T: BusTransport, D: Delay> Switch<T, D> {
    pub fn new(bus: Arc<Bus<T, D>>, device: DeviceId) -> Self {
        Self::with_config(bus, device, DriverConfig::default())
    }

    pub fn with_config(bus: Arc<Bus<T, D>>, device: DeviceId, config: DriverConfig) -> Self {
        if !device.is_ds2406() {
            warn!(%device, "family code is not 0x12");
        }
        Self { bus, device, config }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<Bus<T, D>> {
        &self.bus
    }

    /// Read the channel info byte.
    ///
    /// Up to three attempts; a failed selection or a bad CRC costs one
    /// attempt and a 40 ms pause. The last error is returned once all are
    /// used up.
    pub fn read_channels(&self) -> Result<ChannelState> {
        let mut line = self.bus.lock();
        let line = &mut *line;

        let mut attempt = 1;
        loop {
            match self.try_read_channels(&mut line.transport, &mut line.delay) {
                Ok(state) => return Ok(state),
                Err(err) if attempt < CHANNEL_READ_ATTEMPTS => {
                    debug!(device = %self.device, attempt, %err, "channel read failed, retrying");
                }
                Err(err) => {
                    warn!(device = %self.device, %err, "channel read failed {} times", attempt);
                    return Err(err);
                }
            }
            line.delay.delay_ms(CHANNEL_RETRY_DELAY_MS);
            attempt += 1;
        }
    }

    fn try_read_channels(&self, transport: &mut T, delay: &mut D) -> Result<ChannelState> {
        self.select(transport)?;
        transport.request_pullup(self.device, CHANNEL_PULLUP_MS);

        let mut frame = ChannelRead::new(self.config.channel_control);
        transport.write_bytes(self.device, frame.command())?;
        delay.delay_ms(CHANNEL_RESPONSE_DELAY_MS);
        transport.read_bytes(self.device, frame.response_mut())?;

        self.validate(frame.checksum())?;
        debug!(device = %self.device, info = frame.info(), "channel info");
        Ok(ChannelState::decode_with(frame.info(), self.config.flag_test))
    }

    /// Read the output field of the status byte. Single attempt.
    pub fn read_state(&self) -> Result<OutputState> {
        let mut line = self.bus.lock();
        let transport = &mut line.transport;

        self.select(transport)?;
        let mut frame = StatusRead::new();
        transport.write_bytes(self.device, frame.command())?;
        transport.read_bytes(self.device, frame.response_mut())?;

        debug!(device = %self.device, status = frame.status(), "status byte");
        self.validate(frame.checksum())?;
        Ok(OutputState::from_status(frame.status()))
    }

    /// Write the output field of the status byte. Single attempt.
    ///
    /// The commit byte is only sent once the device has echoed a valid CRC,
    /// so a failed call leaves the device untouched.
    pub fn write_output(&self, output: OutputState) -> Result<()> {
        let mut line = self.bus.lock();
        let transport = &mut line.transport;

        self.select(transport)?;
        let mut frame = StatusWrite::new(output);
        transport.write_bytes(self.device, frame.command())?;
        transport.read_bytes(self.device, frame.response_mut())?;

        self.validate(frame.checksum())?;
        transport.write_byte(self.device, COMMIT)?;
        debug!(device = %self.device, output = output.value(), "output written");
        Ok(())
    }

    fn select(&self, transport: &mut T) -> Result<()> {
        transport
            .select_and_reset(self.device)
            .map_err(|source| Error::Selection {
                device: self.device,
                source,
            })
    }

    fn validate(&self, checksum: Checksum) -> Result<()> {
        if checksum.is_valid() {
            return Ok(());
        }
        info!(
            device = %self.device,
            "crc err: {:04x} != {:04x}",
            checksum.computed,
            checksum.expected
        );
        Err(Error::ChecksumMismatch {
            device: self.device,
            expected: checksum.expected,
            computed: checksum.computed,
        })
    }
}
