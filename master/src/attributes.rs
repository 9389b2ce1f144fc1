//! File-like endpoints for a host to expose.
//!
//! A host surfaces each [`Endpoint`] however it likes (sysfs binary
//! attributes, a FUSE tree, an RPC) and forwards reads and writes with
//! their offset. The offset and length rules are the ones a binary
//! attribute file has.

use ds2406::status::CHANNEL_TEXT_LEN;
use ds2406::{BusTransport, OutputState};

use crate::delay::Delay;
use crate::error::{Error, Result};
use crate::switch::Switch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Output field as one ASCII digit.
    State,
    /// Channel flags as eight ASCII digits and a newline.
    Channel,
    /// One byte, low 2 bits select the output.
    Output,
}

impl Endpoint {
    /// Registration order.
    pub const ALL: [Endpoint; 3] = [Endpoint::State, Endpoint::Channel, Endpoint::Output];

    pub const fn name(self) -> &'static str {
        match self {
            Endpoint::State => "state",
            Endpoint::Channel => "channel",
            Endpoint::Output => "output",
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Endpoint::State | Endpoint::Channel => Access::ReadOnly,
            Endpoint::Output => Access::WriteOnly,
        }
    }

    pub const fn size(self) -> usize {
        match self {
            Endpoint::State | Endpoint::Output => 1,
            Endpoint::Channel => CHANNEL_TEXT_LEN,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.name() == name)
    }
}

/// Host side registry the endpoints get published in.
pub trait AttributeRegistry {
    type Error;

    fn add(&mut self, endpoint: Endpoint) -> std::result::Result<(), Self::Error>;

    fn remove(&mut self, endpoint: Endpoint);
}

/// Publish all endpoints. On failure the ones already added are removed
/// again, newest first.
pub fn register_endpoints<R: AttributeRegistry>(registry: &mut R) -> std::result::Result<(), R::Error> {
    for (added, endpoint) in Endpoint::ALL.into_iter().enumerate() {
        if let Err(err) = registry.add(endpoint) {
            for endpoint in Endpoint::ALL[..added].iter().rev() {
                registry.remove(*endpoint);
            }
            return Err(err);
        }
    }
    Ok(())
}

pub fn unregister_endpoints<R: AttributeRegistry>(registry: &mut R) {
    for endpoint in Endpoint::ALL.into_iter().rev() {
        registry.remove(endpoint);
    }
}

impl<T: BusTransport, D: Delay> Switch<T, D> {
    /// Read `endpoint` into `buf`, returning the number of bytes produced.
    ///
    /// A nonzero offset is end of file: `Ok(0)` without touching the bus.
    pub fn read_endpoint(&self, endpoint: Endpoint, offset: u64, buf: Option<&mut [u8]>) -> Result<usize> {
        if endpoint.access() != Access::ReadOnly {
            return Err(Error::InvalidParameter("endpoint is write-only"));
        }
        if offset != 0 {
            return Ok(0);
        }
        let buf = buf.ok_or(Error::InvalidParameter("no destination buffer"))?;
        if buf.len() < endpoint.size() {
            return Err(Error::InvalidParameter("destination buffer too small"));
        }

        match endpoint {
            Endpoint::State => {
                buf[0] = self.read_state()?.to_ascii();
                Ok(1)
            }
            Endpoint::Channel => {
                buf[..CHANNEL_TEXT_LEN].copy_from_slice(&self.read_channels()?.to_text());
                Ok(CHANNEL_TEXT_LEN)
            }
            Endpoint::Output => Err(Error::InvalidParameter("endpoint is write-only")),
        }
    }

    /// Write `data` to `endpoint`. Exactly one byte at offset 0.
    pub fn write_endpoint(&self, endpoint: Endpoint, offset: u64, data: &[u8]) -> Result<usize> {
        if endpoint.access() != Access::WriteOnly {
            return Err(Error::InvalidParameter("endpoint is read-only"));
        }
        let [byte] = data else {
            return Err(Error::InvalidParameter("expected exactly one byte"));
        };
        if offset != 0 {
            return Err(Error::InvalidParameter("offset must be 0"));
        }

        self.write_output(OutputState::from_low_bits(*byte))?;
        Ok(1)
    }
}
