/// The wire-relevant part of an endpoint's identity: the values that get
/// stamped into outgoing frames.
///
/// This is deliberately a plain data holder with no persistence or mutation
/// logic attached — those concerns belong to the identity store interface
/// (`osnp-endpoint`'s `Driver` trait and `Identity` wrapper), not to the
/// frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The 64-bit extended unique identifier. Permanent per device.
    pub eui: [u8; 8],
    /// The 16-bit PAN identifier, little-endian on the wire.
    pub pan_id: [u8; 2],
    /// The 16-bit short address assigned at association, little-endian on
    /// the wire.
    pub short_addr: [u8; 2],
}

impl Identity {
    /// PAN ID reset value on disassociation (`0x0000`).
    pub const PAN_ID_RESET: [u8; 2] = [0x00, 0x00];
    /// Short address reset value on disassociation (`0xFFFF`).
    pub const SHORT_ADDR_RESET: [u8; 2] = [0xff, 0xff];
    /// Channel sentinel meaning "unassociated" in persistence.
    pub const CHANNEL_UNASSOCIATED: u8 = 0xff;
}
