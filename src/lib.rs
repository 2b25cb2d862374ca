//! # remote-gpio
//!
//! A Rust crate for controlling GPIO ports that belong to another processor
//! core, over an asynchronous message-based IPC channel.
//!
//! On asymmetric multi-core devices one core owns the pin hardware while the
//! application logic runs elsewhere. This crate implements the command side
//! of that split: it encodes pin operations into fixed-layout packets and
//! hands them to a platform-provided transport. The peer core decodes the
//! packets and touches the actual hardware. There are no replies; a command
//! that was accepted by the transport is considered dispatched.
//!
//! ## Features
//!
//! *   Endpoint lifecycle on a shared transport instance (`EndpointSession`):
//!     open, register, block until the peer binds.
//! *   Strongly-typed `GpioPin` struct (0-31) with per-port validity checks.
//! *   Port-wide raw operations (`set_bits`, `clear_bits`, `toggle_bits`,
//!     `set_masked`) transmitting caller masks verbatim.
//! *   Single-pin conveniences (`configure_input`, `configure_output`,
//!     `set_pin`, `clear_pin`, `toggle_pin`, `write_pin`).
//! *   Pin configuration flags forwarded opaquely to the peer (see [`flags`]).
//! *   Pluggable transports via the [`transport::IpcTransport`] trait, with a
//!     [`transport::NullTransport`] for running without a peer.
//!
//! ## Wire format
//!
//! Every command is one 10-byte little-endian frame:
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0      | 1    | opcode (Configure=1, Set=2, Clear=3, Toggle=4) |
//! | 1      | 4    | pin_mask       |
//! | 5      | 1    | port_id        |
//! | 6      | 4    | config_flags   |
//!
//! Fields an opcode does not use are zero. See [`CommandPacket`].
//!
//! ## Basic Usage
//!
//! ```
//! use remote_gpio::transport::NullTransport;
//! use remote_gpio::{EndpointSession, GpioLevel, GpioPin, PortConfig, PortDevice, Result};
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     // The platform owns the real transport; NullTransport stands in here.
//!     let transport = Arc::new(NullTransport::new());
//!     let session = Arc::new(EndpointSession::new(transport));
//!
//!     // Blocks until the peer confirms the binding (immediate for NullTransport).
//!     session.open()?;
//!
//!     // One session can carry several ports; this one is port 0, all pins wired.
//!     let port = PortDevice::new(Arc::clone(&session), PortConfig::new(0, u32::MAX));
//!
//!     let led = GpioPin::new(4)?;
//!     port.configure_output(led, GpioLevel::Low)?;
//!     port.write_pin(led, GpioLevel::High)?;
//!
//!     // Drive pins 1-2 to the pattern 0b01: one Set packet, then one Clear packet.
//!     port.set_masked(0b0110, 0b0010)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Command channel semantics
//!
//! *   **Fire-and-forget.** `Ok` means the local transport queued the frame.
//!     The peer sends no acknowledgements and this crate reads no pin state.
//! *   **No bind timeout.** `EndpointSession::open` blocks until the peer
//!     acknowledges the endpoint, indefinitely if it never does.
//! *   **Masked writes are two packets.** `set_masked` always sends Set then
//!     Clear; a failed Set aborts the pair with no rollback.
//! *   **Threading.** Sessions and port devices are `Send + Sync`. Ordering
//!     between concurrent callers is whatever order their sends reach the
//!     transport.
//!
//! ## License
//!
//! Licensed under either of the MIT license or the Apache License 2.0, at
//! your option.

use log::warn;

// Make internal modules private, re-export public types
mod consts;
mod error;
pub mod gpio; // Keep gpio public for its enums/structs
mod packet;
mod port;
mod session;
pub mod transport; // Keep transport public: platforms implement the trait

pub use consts::{PACKET_SIZE, PORT_PIN_COUNT};
pub use error::{Error, Result};
pub use gpio::{GpioDirection, GpioLevel, GpioPin, GpioPull};
pub use packet::{CommandPacket, Opcode};
pub use port::{PortConfig, PortDevice};
pub use session::EndpointSession;

// --- Re-export necessary constants for public API use ---
/// Publicly accessible flag bits for [`PortDevice::configure_pin`].
pub mod flags {
    pub use crate::consts::config_flags::*;
}

/// Decodes every whole packet in an inbound buffer, for peers and traffic
/// inspectors built on this crate's packet types.
///
/// Buffers are expected to carry whole packets back to back. A trailing
/// fragment shorter than one packet is logged and dropped; an undecodable
/// packet fails the whole call.
pub fn decode_frames(buffer: &[u8]) -> Result<Vec<CommandPacket>> {
    let mut packets = Vec::with_capacity(buffer.len() / PACKET_SIZE);
    let mut chunks = buffer.chunks_exact(PACKET_SIZE);
    for chunk in chunks.by_ref() {
        packets.push(CommandPacket::from_wire(chunk)?);
    }
    let trailing = chunks.remainder();
    if !trailing.is_empty() {
        warn!(
            "Dropping {} trailing bytes after {} whole packets",
            trailing.len(),
            packets.len()
        );
    }
    Ok(packets)
}
