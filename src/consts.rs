//! Wire-protocol constants shared with the peer core.

/// Size in bytes of every command packet on the wire, regardless of opcode.
///
/// Fixed-size framing keeps the peer's receive path trivial; fields an opcode
/// does not use are transmitted as zero.
pub const PACKET_SIZE: usize = 10;

/// Number of pins addressable within one port (the width of `pin_mask`).
pub const PORT_PIN_COUNT: u8 = 32;

// --- Pin configuration flags (Configure packets only) ---
pub mod config_flags {
    //! Bit assignments for the `config_flags` word of a Configure packet.
    //!
    //! The command channel treats the word as opaque and forwards it
    //! untouched; these bits define its meaning on the peer side and are part
    //! of the cross-core contract.

    /// Disconnect the pin from both the input buffer and the output driver.
    pub const DISCONNECTED: u32 = 0;
    /// Enable the input buffer.
    pub const INPUT: u32 = 1 << 0;
    /// Enable the output driver.
    pub const OUTPUT: u32 = 1 << 1;
    /// Drive the pin low when (re)configured as an output.
    pub const INIT_LOW: u32 = 1 << 2;
    /// Drive the pin high when (re)configured as an output.
    pub const INIT_HIGH: u32 = 1 << 3;
    /// Enable the internal pull-up resistor.
    pub const PULL_UP: u32 = 1 << 4;
    /// Enable the internal pull-down resistor.
    pub const PULL_DOWN: u32 = 1 << 5;
    /// Open-drain output: drives low, releases the line for high.
    pub const OPEN_DRAIN: u32 = 1 << 6;
    /// Select high drive strength for the output driver.
    pub const DRIVE_HIGH: u32 = 1 << 7;

    /// Output, initially driven low.
    pub const OUTPUT_LOW: u32 = OUTPUT | INIT_LOW;
    /// Output, initially driven high.
    pub const OUTPUT_HIGH: u32 = OUTPUT | INIT_HIGH;
}
