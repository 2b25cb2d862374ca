//! Port devices and the command dispatch surface.

use std::sync::Arc;

use log::{debug, trace};

use crate::consts::config_flags;
use crate::error::{self, Result};
use crate::gpio::{GpioDirection, GpioLevel, GpioPin, GpioPull};
use crate::packet::{CommandPacket, Opcode};
use crate::session::EndpointSession;

/// Static description of one remote port: the port index the peer knows it
/// by, and which of its 32 pin positions are actually wired.
///
/// Comes from the platform's topology description at integration time and is
/// never renegotiated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    /// Logical port index on the peer core.
    pub port_id: u8,
    /// Bitset of the valid pins within the port.
    pub pin_mask: u32,
}

impl PortConfig {
    /// Creates a port description.
    pub const fn new(port_id: u8, pin_mask: u32) -> Self {
        Self { port_id, pin_mask }
    }
}

/// A logical GPIO port whose pins live on the peer core.
///
/// Every operation encodes into one or more fixed-layout command packets
/// handed to the shared [`EndpointSession`]. Success means the local
/// transport accepted the frames, never that the peer applied them. Several
/// port devices can share one session; packets are multiplexed by `port_id`.
///
/// The dispatcher keeps no local image of pin state: masked writes derive
/// both halves purely from the caller's arguments. Callers needing ordering
/// across calls must serialize their own access; the only ordering this API
/// guarantees is Set before Clear inside one [`set_masked`](Self::set_masked).
#[derive(Debug, Clone)]
pub struct PortDevice {
    session: Arc<EndpointSession>,
    config: PortConfig,
}

impl PortDevice {
    /// Creates a port device dispatching over an endpoint session.
    ///
    /// Operations fail with [`Error::NotBound`](crate::Error::NotBound)
    /// until the session has been [`open`](EndpointSession::open)ed.
    pub fn new(session: Arc<EndpointSession>, config: PortConfig) -> Self {
        Self { session, config }
    }

    /// The peer-side port index this device addresses.
    pub fn port_id(&self) -> u8 {
        self.config.port_id
    }

    /// The valid-pin mask from the static port configuration.
    pub fn pin_mask(&self) -> u32 {
        self.config.pin_mask
    }

    #[inline]
    fn check_pin(&self, pin: GpioPin) -> Result<()> {
        if self.config.pin_mask & pin.mask() == 0 {
            Err(error::pin_not_in_port(
                pin.number(),
                self.config.port_id,
                self.config.pin_mask,
            ))
        } else {
            Ok(())
        }
    }

    fn send_packet(&self, packet: &CommandPacket) -> Result<()> {
        trace!(
            "Port {}: sending {:?} mask=0x{:08X}",
            packet.port_id,
            packet.opcode,
            packet.pin_mask
        );
        self.session.send(&packet.to_wire())?;
        Ok(())
    }

    // --- Raw port-wide operations ---

    /// Applies raw configuration flags to one pin (one Configure packet).
    ///
    /// `flags` is forwarded to the peer untouched; see [`crate::flags`] for
    /// the bit catalog. The pin must be part of this port's valid mask.
    pub fn configure_pin(&self, pin: GpioPin, flags: u32) -> Result<()> {
        self.check_pin(pin)?;
        debug!(
            "Port {}: configure pin {} flags=0x{:08X}",
            self.config.port_id,
            pin.number(),
            flags
        );
        self.send_packet(&CommandPacket::configure(
            self.config.port_id,
            pin.mask(),
            flags,
        ))
    }

    /// Drives every pin in `mask` high (one Set packet).
    ///
    /// The mask is transmitted exactly as given, with no validity filtering,
    /// and a zero mask still produces a send.
    pub fn set_bits(&self, mask: u32) -> Result<()> {
        self.send_packet(&CommandPacket::port_op(
            Opcode::Set,
            self.config.port_id,
            mask,
        ))
    }

    /// Drives every pin in `mask` low (one Clear packet).
    pub fn clear_bits(&self, mask: u32) -> Result<()> {
        self.send_packet(&CommandPacket::port_op(
            Opcode::Clear,
            self.config.port_id,
            mask,
        ))
    }

    /// Inverts every pin in `mask` (one Toggle packet).
    pub fn toggle_bits(&self, mask: u32) -> Result<()> {
        self.send_packet(&CommandPacket::port_op(
            Opcode::Toggle,
            self.config.port_id,
            mask,
        ))
    }

    /// Drives the pins selected by `mask` to the levels in `values`: high
    /// where the value bit is set, low where it is not.
    ///
    /// Decomposes into exactly two packets, Set(`values & mask`) then
    /// Clear(`!values & mask`). Rising pins reach their level before the
    /// falling pins are driven low, which keeps the glitch window small on
    /// ports where an undriven line floats high.
    ///
    /// The pair is not atomic. If the Set send fails, the Clear is never
    /// issued and the Set error is returned; the peer may then hold the set
    /// half applied and the clear half missing. There is no rollback.
    pub fn set_masked(&self, mask: u32, values: u32) -> Result<()> {
        let to_set = values & mask;
        let to_clear = !values & mask;
        self.send_packet(&CommandPacket::port_op(
            Opcode::Set,
            self.config.port_id,
            to_set,
        ))?;
        self.send_packet(&CommandPacket::port_op(
            Opcode::Clear,
            self.config.port_id,
            to_clear,
        ))
    }

    // --- Single-pin conveniences ---

    /// Configures one pin as an input with the given pull resistor.
    pub fn configure_input(&self, pin: GpioPin, pull: GpioPull) -> Result<()> {
        let flags = config_flags::INPUT
            | match pull {
                GpioPull::None => 0,
                GpioPull::Up => config_flags::PULL_UP,
                GpioPull::Down => config_flags::PULL_DOWN,
            };
        self.configure_pin(pin, flags)
    }

    /// Configures one pin as an output driven to `initial`.
    pub fn configure_output(&self, pin: GpioPin, initial: GpioLevel) -> Result<()> {
        let flags = match initial {
            GpioLevel::Low => config_flags::OUTPUT_LOW,
            GpioLevel::High => config_flags::OUTPUT_HIGH,
        };
        self.configure_pin(pin, flags)
    }

    /// Reconfigures one pin's direction, leaving pull and drive mode at the
    /// peer's defaults.
    pub fn set_direction(&self, pin: GpioPin, direction: GpioDirection) -> Result<()> {
        let flags = match direction {
            GpioDirection::Input => config_flags::INPUT,
            GpioDirection::Output => config_flags::OUTPUT,
        };
        self.configure_pin(pin, flags)
    }

    /// Drives one pin high.
    pub fn set_pin(&self, pin: GpioPin) -> Result<()> {
        self.check_pin(pin)?;
        self.set_bits(pin.mask())
    }

    /// Drives one pin low.
    pub fn clear_pin(&self, pin: GpioPin) -> Result<()> {
        self.check_pin(pin)?;
        self.clear_bits(pin.mask())
    }

    /// Inverts one pin.
    pub fn toggle_pin(&self, pin: GpioPin) -> Result<()> {
        self.check_pin(pin)?;
        self.toggle_bits(pin.mask())
    }

    /// Drives one pin to `level`.
    pub fn write_pin(&self, pin: GpioPin, level: GpioLevel) -> Result<()> {
        match level {
            GpioLevel::High => self.set_pin(pin),
            GpioLevel::Low => self.clear_pin(pin),
        }
    }
}
