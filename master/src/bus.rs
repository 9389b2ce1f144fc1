//! Exclusive access to one bus.
//!
//! Every device on a bus shares one [`Bus`]. A command sequence holds the
//! lock from reset to the last byte, waits included, so frames for
//! different devices never interleave on the wire.

use parking_lot::{Mutex, MutexGuard};

use crate::delay::{Delay, StdDelay};

/// What a lock holder gets to drive.
#[derive(Debug)]
pub struct Line<T, D> {
    pub transport: T,
    pub delay: D,
}

#[derive(Debug)]
pub struct Bus<T, D = StdDelay> {
    line: Mutex<Line<T, D>>,
}

impl<T> Bus<T> {
    pub fn new(transport: T) -> Self {
        Self::with_delay(transport, StdDelay)
    }
}

impl<T, D: Delay> Bus<T, D> {
    pub fn with_delay(transport: T, delay: D) -> Self {
        Self {
            line: Mutex::new(Line { transport, delay }),
        }
    }

    /// Blocks until no other command sequence is running on this bus.
    pub fn lock(&self) -> MutexGuard<'_, Line<T, D>> {
        self.line.lock()
    }

    pub fn into_inner(self) -> Line<T, D> {
        self.line.into_inner()
    }
}
