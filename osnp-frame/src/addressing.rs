//! Addressing field values.

pub use crate::frame_control::AddressingMode;

/// An IEEE 802.15.4 address, either short (16-bit) or extended (64-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// A 16-bit short address, in wire (little-endian) octet order.
    Short([u8; 2]),
    /// A 64-bit extended address, in wire (little-endian) octet order.
    Extended([u8; 8]),
}

impl Address {
    /// The broadcast short address.
    pub const BROADCAST: Address = Address::Short([0xff, 0xff]);

    /// Build an [`Address`] from a slice of wire octets.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is neither 2 nor 8 octets long.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes.len() {
            2 => {
                let mut raw = [0u8; 2];
                raw.copy_from_slice(bytes);
                Address::Short(raw)
            }
            8 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                Address::Extended(raw)
            }
            _ => panic!("address must be 2 or 8 octets"),
        }
    }

    /// Return the address as a slice of wire octets.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Short(v) => v,
            Address::Extended(v) => v,
        }
    }

    /// Return the length of the address in octets (2 or 8).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Address::Short(_) => 2,
            Address::Extended(_) => 8,
        }
    }

    /// Query whether this is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

/// A resolved view of the addressing fields of a frame: which of
/// `dst_pan`/`dst_addr`/`src_pan`/`src_addr` are present, computed per the
/// addressing and PAN ID compression rules of the frame format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingFields {
    /// Whether the destination PAN ID is present.
    pub dst_pan_present: bool,
    /// The destination addressing mode.
    pub dst_addressing_mode: AddressingMode,
    /// Whether the source PAN ID is present.
    pub src_pan_present: bool,
    /// The source addressing mode.
    pub src_addressing_mode: AddressingMode,
}

impl AddressingFields {
    /// Resolve field presence from the Frame Control bits.
    ///
    /// - `dst_pan` is present iff `dst_addressing_mode != None`.
    /// - `src_pan` is present iff `src_addressing_mode != None` and the
    ///   PAN-ID-compression bit is clear.
    pub fn resolve(
        dst_addressing_mode: AddressingMode,
        src_addressing_mode: AddressingMode,
        pan_id_compression: bool,
    ) -> Self {
        Self {
            dst_pan_present: dst_addressing_mode != AddressingMode::None,
            dst_addressing_mode,
            src_pan_present: src_addressing_mode != AddressingMode::None && !pan_id_compression,
            src_addressing_mode,
        }
    }

    /// Total length, in octets, of the addressing fields this view
    /// describes.
    pub fn len(&self) -> usize {
        (if self.dst_pan_present { 2 } else { 0 })
            + self.dst_addressing_mode.size()
            + (if self.src_pan_present { 2 } else { 0 })
            + self.src_addressing_mode.size()
    }
}
