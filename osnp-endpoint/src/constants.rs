//! OSNP wire constants, carried over from the original implementation's
//! header so the crate is self-documenting about values that must match
//! exactly for interop.

#![allow(dead_code)]

/// Number of IEEE 802.15.4 channels the endpoint sweeps while scanning
/// (channels `0..NUM_CHANNELS`).
pub const NUM_CHANNELS: u8 = 16;

/// Default outgoing frame buffer size, in octets, matching the original
/// implementation's `OSNP_TX_BUFFER_SIZE`.
pub const DEFAULT_TX_BUFFER_SIZE: usize = 128;

/// Channel sentinel meaning "unassociated" in persistence.
pub const CHANNEL_UNASSOCIATED: u8 = 0xff;

/// PAN ID reset value on disassociation.
pub const PAN_ID_RESET: [u8; 2] = [0x00, 0x00];

/// Short address reset value on disassociation.
pub const SHORT_ADDR_RESET: [u8; 2] = [0xff, 0xff];

/// MAC command identifiers (first payload octet of a MAC-command frame).
pub mod mac_command {
    /// Device requests to join the PAN addressed by the reply's source PAN.
    pub const ASSOCIATION_REQ: u8 = 0x01;
    /// Coordinator grants association, carrying device capabilities.
    pub const ASSOCIATION_RES: u8 = 0x02;
    /// Either side is leaving the PAN.
    pub const DISASSOCIATED: u8 = 0x03;
    /// Device polls the coordinator for queued frames.
    pub const DATA_REQ: u8 = 0x04;
    /// Device announces itself while scanning, asking to be associated.
    pub const DISCOVER: u8 = 0x07;
}

/// Application-level command identifiers carried in the data-frame TLV body.
pub mod app_command {
    /// Query static device metadata.
    pub const GET_DEVICE_INFO: u8 = 0xa0;
    /// Apply a configuration change.
    pub const CONFIGURE: u8 = 0xa1;
    /// Read a sensor value.
    pub const GET_DATA: u8 = 0xa2;
    /// Trigger an actuation.
    pub const PERFORM: u8 = 0xa3;
    /// Subscribe to unsolicited reports.
    pub const SUBSCRIBE: u8 = 0xa4;
    /// Cancel a prior subscription.
    pub const UNSUBSCRIBE: u8 = 0xa5;
}

/// Application-level error codes a command dispatcher may report in its
/// response TLV.
pub mod app_error {
    /// The command identifier is not implemented.
    pub const UNSUPPORTED_COMMAND: u8 = 0x01;
    /// The command's parameters were malformed or out of range.
    pub const UNSUPPORTED_PARAMETERS: u8 = 0x02;
    /// A privileged command was attempted while unauthenticated.
    pub const SECURITY_ERROR: u8 = 0x03;
    /// The device cannot service the command right now.
    pub const DEVICE_BUSY: u8 = 0x04;
}

/// TLV container tags framing a data frame's payload.
pub mod tlv {
    /// Outer tag of a request container: definite length.
    pub const REQUEST_CONTAINER: u8 = 0xe0;
    /// Outer tag of a response container: indefinite length, terminated.
    pub const RESPONSE_CONTAINER: u8 = 0xe1;
}

/// Device capability bits carried in an `ASSOCIATION_RES` payload.
pub mod capabilities {
    /// The device's radio is always listening; the hub need not wait for a
    /// poll before sending it pending data.
    pub const RX_ALWAYS_ON: u8 = 0b0000_0001;
}

/// Status reported by the driver after a requested transmission completes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TxStatus {
    /// The frame was transmitted (and acknowledged, if requested).
    Ok,
    /// No acknowledgment was received.
    NoAck,
    /// The channel was busy; the frame was not sent.
    ChannelBusy,
}
