use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur when driving remote GPIO ports.
///
/// This enum covers endpoint lifecycle failures, command dispatch failures
/// reported by the IPC transport, and argument validation on the typed pin
/// API. Success never implies the peer applied a command, only that the
/// local transport accepted the frame.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reported by the underlying IPC transport layer.
    #[error("IPC transport error: {0}")]
    Transport(#[from] TransportError),
    /// A command was issued before the peer confirmed the endpoint binding.
    #[error("Endpoint is not bound; open the session and wait for the peer before sending")]
    NotBound,
    /// GPIO pin number is outside the addressable range of a port.
    #[error("GPIO pin {pin} argument out of range (0-31): {message}")]
    PinArgumentOutOfRange {
        /// The invalid pin number that was specified.
        pin: u8,
        /// Detailed error message explaining the constraint.
        message: String,
    },
    /// The pin is not part of the port's configured valid-pin set.
    #[error("Pin {pin} is not wired on port {port_id} (valid mask 0x{valid_mask:08X})")]
    PinNotInPort {
        /// The pin number that was requested.
        pin: u8,
        /// The logical port the request addressed.
        port_id: u8,
        /// The port's valid-pin mask from its static configuration.
        valid_mask: u32,
    },
    /// An inbound buffer is too short to hold a command packet.
    #[error("Command packet too short ({len} bytes)")]
    PacketTooShort {
        /// Actual length of the buffer.
        len: usize,
    },
    /// The leading byte of an inbound buffer matches no known command.
    #[error("Unknown command opcode byte 0x{value:02X}")]
    UnknownOpcode {
        /// The opcode byte that was received.
        value: u8,
    },
}

/// Result type alias for remote GPIO operations.
///
/// This is a convenience alias for `std::result::Result<T, Error>` used
/// throughout the crate to reduce boilerplate.
pub type Result<T> = std::result::Result<T, Error>;

// Helpers for the recurring pin validation errors
pub(crate) fn pin_out_of_range(pin: u8) -> Error {
    Error::PinArgumentOutOfRange {
        pin,
        message: "Pin number must be 0-31".to_string(),
    }
}
pub(crate) fn pin_not_in_port(pin: u8, port_id: u8, valid_mask: u32) -> Error {
    Error::PinNotInPort {
        pin,
        port_id,
        valid_mask,
    }
}
