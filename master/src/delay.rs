use std::time::Duration;

/// Blocking wait used between bus steps.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}
