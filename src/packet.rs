//! Command packet layout and codec.
//!
//! Every primitive GPIO operation travels as one fixed-size frame:
//!
//! | Offset | Size | Field          | Notes                          |
//! |--------|------|----------------|--------------------------------|
//! | 0      | 1    | `opcode`       | See [`Opcode`]                 |
//! | 1      | 4    | `pin_mask`     | Little-endian                  |
//! | 5      | 1    | `port_id`      |                                |
//! | 6      | 4    | `config_flags` | Little-endian, `Configure` only|
//!
//! The layout is a cross-core ABI. Both sides compile against the same field
//! order, widths and byte order; any change is a protocol version bump.

use crate::consts::PACKET_SIZE;
use crate::error::{Error, Result};

/// Operation tag of a command packet.
///
/// Closed set; the numeric values are part of the cross-core contract.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Apply `config_flags` to the pins selected by `pin_mask`.
    Configure = 1,
    /// Drive the pins selected by `pin_mask` high.
    Set = 2,
    /// Drive the pins selected by `pin_mask` low.
    Clear = 3,
    /// Invert the pins selected by `pin_mask`.
    Toggle = 4,
}

impl Opcode {
    /// Decodes the wire byte, if it names a known operation.
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            1 => Some(Opcode::Configure),
            2 => Some(Opcode::Set),
            3 => Some(Opcode::Clear),
            4 => Some(Opcode::Toggle),
            _ => None,
        }
    }
}

/// One GPIO command in its in-memory form.
///
/// Packets are built on the stack per operation, serialized with
/// [`to_wire`](Self::to_wire) and discarded; nothing retains them after the
/// send. Every packet occupies exactly [`PACKET_SIZE`] bytes on the wire
/// regardless of opcode; fields an opcode does not use stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket {
    /// Which operation the peer should perform.
    pub opcode: Opcode,
    /// Bitset of target pins within the port.
    pub pin_mask: u32,
    /// Logical port index on the peer core.
    pub port_id: u8,
    /// Direction/pull/drive flags; meaningful only for [`Opcode::Configure`].
    pub config_flags: u32,
}

impl CommandPacket {
    /// A Set/Clear/Toggle packet for the given port and pins.
    ///
    /// `config_flags` is zero, as for every non-Configure opcode.
    pub fn port_op(opcode: Opcode, port_id: u8, pin_mask: u32) -> Self {
        Self {
            opcode,
            pin_mask,
            port_id,
            config_flags: 0,
        }
    }

    /// A Configure packet carrying `config_flags` for the selected pins.
    pub fn configure(port_id: u8, pin_mask: u32, config_flags: u32) -> Self {
        Self {
            opcode: Opcode::Configure,
            pin_mask,
            port_id,
            config_flags,
        }
    }

    /// Serializes to the fixed little-endian wire layout.
    pub fn to_wire(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = self.opcode as u8;
        buf[1..5].copy_from_slice(&self.pin_mask.to_le_bytes());
        buf[5] = self.port_id;
        buf[6..10].copy_from_slice(&self.config_flags.to_le_bytes());
        buf
    }

    /// Parses one packet from the start of `bytes`.
    ///
    /// Trailing bytes beyond [`PACKET_SIZE`] are ignored so that a newer
    /// peer may append fields without breaking older decoders. Fails on a
    /// buffer shorter than one packet or on an unknown opcode byte.
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PACKET_SIZE {
            return Err(Error::PacketTooShort { len: bytes.len() });
        }
        let opcode =
            Opcode::from_byte(bytes[0]).ok_or(Error::UnknownOpcode { value: bytes[0] })?;
        let pin_mask = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        let port_id = bytes[5];
        let config_flags = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        Ok(Self {
            opcode,
            pin_mask,
            port_id,
            config_flags,
        })
    }
}
