//! The endpoint's identity tuple: the part of its state that is persisted
//! by the platform and stamped into every frame it sends.
//!
//! The persistence contract itself lives on [`Driver`](crate::Driver) — this
//! module only holds the in-memory mirror of it and the conversion to
//! [`osnp_frame::Identity`], the wire-facing subset the frame codec needs.

use osnp_frame::Identity as WireIdentity;

use crate::constants::{CHANNEL_UNASSOCIATED, PAN_ID_RESET, SHORT_ADDR_RESET};
use crate::Driver;

/// The endpoint's in-memory identity: EUI (permanent), PAN ID, short
/// address, and tuned channel (the latter three mutable at runtime, mirrors
/// of the platform's persisted values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Permanent 64-bit extended unique identifier.
    pub eui: [u8; 8],
    /// Current PAN ID. `0x0000` is the disassociated reset value.
    pub pan_id: [u8; 2],
    /// Current short address. `0xffff` is the disassociated reset value.
    pub short_addr: [u8; 2],
    /// Currently tuned channel. `0xff` means "unassociated".
    pub channel: u8,
}

impl Identity {
    /// Load the identity tuple from the platform at boot.
    pub fn load<D: Driver>(driver: &mut D) -> Self {
        Self {
            eui: driver.load_eui(),
            pan_id: driver.load_pan_id(),
            short_addr: driver.load_short_address(),
            channel: driver.load_channel(),
        }
    }

    /// Whether the persisted channel is the "unassociated" sentinel.
    pub fn is_unassociated(&self) -> bool {
        self.channel == CHANNEL_UNASSOCIATED
    }

    /// Adopt a PAN ID, short address, and channel gained through
    /// association, persisting all three through `driver` in the order the
    /// testable properties require: PAN, then short address, then channel,
    /// so a reader observing a stale channel sentinel can treat the other
    /// two as not-yet-current.
    pub fn associate<D: Driver>(
        &mut self,
        driver: &mut D,
        pan_id: [u8; 2],
        short_addr: [u8; 2],
        channel: u8,
    ) {
        driver.write_pan_id(pan_id);
        driver.write_short_address(short_addr);
        driver.write_channel(channel);
        self.pan_id = pan_id;
        self.short_addr = short_addr;
        self.channel = channel;
    }

    /// Reset the identity to its disassociated sentinels, persisting the
    /// reset through `driver`.
    pub fn disassociate<D: Driver>(&mut self, driver: &mut D) {
        driver.write_pan_id(PAN_ID_RESET);
        driver.write_short_address(SHORT_ADDR_RESET);
        driver.write_channel(CHANNEL_UNASSOCIATED);
        self.pan_id = PAN_ID_RESET;
        self.short_addr = SHORT_ADDR_RESET;
        self.channel = CHANNEL_UNASSOCIATED;
    }

    /// The wire-facing subset of this identity, as consumed by
    /// [`osnp_frame::Frame::initialize`].
    pub fn as_wire(&self) -> WireIdentity {
        WireIdentity {
            eui: self.eui,
            pan_id: self.pan_id,
            short_addr: self.short_addr,
        }
    }
}
