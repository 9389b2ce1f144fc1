//! Interpretation of channel info and status bytes.

use serde_derive::{Deserialize, Serialize};

/// One flag of the channel info byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    SupplyIndication,
    ChannelCount,
    PiobLatch,
    PioaLatch,
    PiobSensed,
    PioaSensed,
    PiobFlipFlop,
    PioaFlipFlop,
}

impl Flag {
    /// Flags in the order they are printed.
    pub const TEXT_ORDER: [Flag; 8] = [
        Flag::SupplyIndication,
        Flag::ChannelCount,
        Flag::PioaSensed,
        Flag::PioaLatch,
        Flag::PioaFlipFlop,
        Flag::PiobSensed,
        Flag::PiobLatch,
        Flag::PiobFlipFlop,
    ];

    /// Bit mask within the info byte.
    ///
    /// `ChannelCount` spans two bits and overlaps both latch flags.
    pub const fn mask(self) -> u8 {
        match self {
            Flag::SupplyIndication => 0x40,
            Flag::ChannelCount => 0x30,
            Flag::PiobLatch => 0x20,
            Flag::PioaLatch => 0x10,
            Flag::PiobSensed => 0x08,
            Flag::PioaSensed => 0x04,
            Flag::PiobFlipFlop => 0x02,
            Flag::PioaFlipFlop => 0x01,
        }
    }
}

/// How a masked bit is turned into a flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagTest {
    /// Flag is set when any masked bit is set.
    #[default]
    NonZero,
    /// `(byte & mask) > 1`, as the deployed driver tests it. The 0x01 flag
    /// can never read true under this test.
    Legacy,
}

impl FlagTest {
    pub const fn test(self, byte: u8, mask: u8) -> bool {
        match self {
            FlagTest::NonZero => byte & mask != 0,
            FlagTest::Legacy => byte & mask > 1,
        }
    }
}

pub const CHANNEL_TEXT_LEN: usize = 9;

/// Decoded channel info byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelState {
    pub supply_indication: bool,
    pub channel_count: bool,
    pub pioa_sensed: bool,
    pub pioa_latch: bool,
    pub pioa_flip_flop: bool,
    pub piob_sensed: bool,
    pub piob_latch: bool,
    pub piob_flip_flop: bool,
}

impl ChannelState {
    pub fn decode(byte: u8) -> Self {
        Self::decode_with(byte, FlagTest::NonZero)
    }

    pub fn decode_with(byte: u8, test: FlagTest) -> Self {
        let bit = |flag: Flag| test.test(byte, flag.mask());
        Self {
            supply_indication: bit(Flag::SupplyIndication),
            channel_count: bit(Flag::ChannelCount),
            pioa_sensed: bit(Flag::PioaSensed),
            pioa_latch: bit(Flag::PioaLatch),
            pioa_flip_flop: bit(Flag::PioaFlipFlop),
            piob_sensed: bit(Flag::PiobSensed),
            piob_latch: bit(Flag::PiobLatch),
            piob_flip_flop: bit(Flag::PiobFlipFlop),
        }
    }

    pub const fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::SupplyIndication => self.supply_indication,
            Flag::ChannelCount => self.channel_count,
            Flag::PiobLatch => self.piob_latch,
            Flag::PioaLatch => self.pioa_latch,
            Flag::PiobSensed => self.piob_sensed,
            Flag::PioaSensed => self.pioa_sensed,
            Flag::PiobFlipFlop => self.piob_flip_flop,
            Flag::PioaFlipFlop => self.pioa_flip_flop,
        }
    }

    /// Eight ASCII digits followed by a newline.
    pub fn to_text(&self) -> [u8; CHANNEL_TEXT_LEN] {
        let mut text = [b'\n'; CHANNEL_TEXT_LEN];
        for (slot, flag) in text.iter_mut().zip(Flag::TEXT_ORDER) {
            *slot = if self.flag(flag) { b'1' } else { b'0' };
        }
        text
    }
}

/// Output configuration of the two PIO drivers, 0..=3.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutputState(u8);

impl OutputState {
    pub const MAX: u8 = 3;

    const SHIFT: u8 = 5;
    // status bits 0..=4 are written high
    const FILL: u8 = 0x1F;
    // marks a validated value in the state text
    const ASCII_TAG: u8 = 0x30;

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Takes the low 2 bits, ignoring the rest, so `b'2'` means 2.
    pub const fn from_low_bits(byte: u8) -> Self {
        Self(byte & Self::MAX)
    }

    /// Output field (bits 5 and 6) of a status byte.
    pub const fn from_status(status: u8) -> Self {
        Self((status >> Self::SHIFT) & Self::MAX)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Status byte to write for this output.
    pub const fn encode(self) -> u8 {
        (self.0 << Self::SHIFT) | Self::FILL
    }

    /// `b'0'..=b'3'`
    pub const fn to_ascii(self) -> u8 {
        self.0 | Self::ASCII_TAG
    }
}
