// simulated_bus.rs
//
// Drives a simulated DS2406 through the host endpoints.
//
// cd master
// RUST_LOG=debug cargo run --example simulated_bus [config.toml]

use std::sync::Arc;

use ds2406::DeviceId;
use master::{Bus, DriverConfig, Endpoint, Switch};
use servant::SimulatedSwitch;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), master::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };

    let device = DeviceId(0x0000_0000_0042_0112);
    let mut simulated = SimulatedSwitch::new(device);
    simulated.set_channel_info(0x5A);
    // first channel access comes back garbled
    simulated.corrupt_next_responses(1);

    let bus = Arc::new(Bus::new(simulated));
    let switch = Switch::with_config(bus, device, config);
    println!("device {}", switch.device());

    let mut channel = [0u8; 9];
    let n = switch.read_endpoint(Endpoint::Channel, 0, Some(&mut channel))?;
    print!("channel {}", String::from_utf8_lossy(&channel[..n]));

    for digit in *b"20" {
        switch.write_endpoint(Endpoint::Output, 0, &[digit])?;
        let mut state = [0u8; 1];
        switch.read_endpoint(Endpoint::State, 0, Some(&mut state))?;
        println!("output {} -> state {}", digit as char, state[0] as char);
    }
    Ok(())
}
