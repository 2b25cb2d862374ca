use remote_gpio::transport::NullTransport;
use remote_gpio::{EndpointSession, GpioLevel, GpioPin, PortConfig, PortDevice, Result};
use std::sync::Arc;
use std::{thread, time::Duration};

// Pin 18 on the peer's port 0
const BLINK_PIN_NUM: u8 = 18;

fn main() -> Result<()> {
    env_logger::init();

    // A real integration hands in the platform's IPC transport here; the
    // null transport binds immediately and swallows every packet, so the
    // demo runs anywhere. Run with RUST_LOG=trace to watch the frames.
    let transport = Arc::new(NullTransport::new());
    let session = Arc::new(EndpointSession::new(transport));

    println!("Opening endpoint session (blocks until the peer binds)...");
    session.open()?;
    println!("Endpoint bound.");

    let port = PortDevice::new(session, PortConfig::new(0, u32::MAX));
    let blink_pin = GpioPin::new(BLINK_PIN_NUM)?;

    println!("Configuring pin {} as an output...", blink_pin.number());
    port.configure_output(blink_pin, GpioLevel::Low)?;

    println!("Blinking pin {} ten times...", blink_pin.number());
    for _ in 0..10 {
        port.write_pin(blink_pin, GpioLevel::High)?;
        thread::sleep(Duration::from_millis(250));
        port.write_pin(blink_pin, GpioLevel::Low)?;
        thread::sleep(Duration::from_millis(250));
    }

    println!("Done. Each write was one fire-and-forget command packet.");
    Ok(())
}
