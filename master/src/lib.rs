//! Bus master side of the DS2406 driver.
//!
//! ```no_run
//! use std::sync::Arc;
//! use master::{Bus, Switch};
//! # fn transport() -> servant::SimulatedSwitch { unimplemented!() }
//!
//! let bus = Arc::new(Bus::new(transport()));
//! let switch = Switch::new(bus, ds2406::DeviceId(0x12));
//! let channels = switch.read_channels()?;
//! println!("{}", String::from_utf8_lossy(&channels.to_text()));
//! # Ok::<(), master::Error>(())
//! ```

pub mod attributes;
pub mod bus;
pub mod config;
pub mod delay;
pub mod error;
pub mod switch;

pub use attributes::{register_endpoints, unregister_endpoints, Access, AttributeRegistry, Endpoint};
pub use bus::{Bus, Line};
pub use config::DriverConfig;
pub use delay::{Delay, StdDelay};
pub use error::{Error, Result};
pub use switch::Switch;
