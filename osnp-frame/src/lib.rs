//! Zero-copy read and write structures for OSNP's IEEE 802.15.4 MAC frames.
//!
//! OSNP endpoints only ever see two frame types on the wire: MAC-command
//! frames (association, discovery, poll, disassociation) and data frames
//! carrying a TLV-encoded application payload. Rather than modelling the
//! full IEEE 802.15.4 frame zoo, this crate provides a single [`Frame`]
//! view that resolves the variable-layout MAC header into accessors backed
//! by a caller-owned buffer. No field is ever copied out of the buffer; a
//! [`Frame`] is a set of offsets into it.
//!
//! ## Reading a frame
//!
//! ```
//! use osnp_frame::Frame;
//!
//! // MAC command frame, short destination addressing, no source address,
//! // no security, trailing 2 octets are the PHY-owned FCS.
//! let raw: [u8; 9] = [0x03, 0x18, 0x01, 0xcd, 0xab, 0x34, 0x12, 0x00, 0x00];
//! let frame = Frame::parse(&raw[..], raw.len()).unwrap();
//! assert_eq!(frame.header_len(), 7);
//! assert_eq!(frame.sequence_number(), 0x01);
//! ```
//!
//! ## Building a frame
//!
//! ```
//! use osnp_frame::{Frame, Identity, FrameControlRepr, FrameType, FrameVersion, AddressingMode};
//!
//! let identity = Identity {
//!     eui: [0; 8],
//!     pan_id: [0x34, 0x12],
//!     short_addr: [0xcd, 0xab],
//! };
//! let mut buf = [0u8; 32];
//! let fcr = FrameControlRepr {
//!     frame_type: FrameType::MacCommand,
//!     security_enabled: false,
//!     frame_pending: false,
//!     ack_request: true,
//!     pan_id_compression: true,
//!     dst_addressing_mode: AddressingMode::None,
//!     src_addressing_mode: AddressingMode::Short,
//!     frame_version: FrameVersion::Ieee802154_2006,
//! };
//! let frame = Frame::initialize(&fcr, 0, 7, &identity, &mut buf[..]).unwrap();
//! assert_eq!(frame.header_len(), 5);
//! ```
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
extern crate std;

mod addressing;
mod frame;
mod frame_control;
mod identity;
mod security;

pub use addressing::{Address, AddressingFields, AddressingMode};
pub use frame::{initialize_response, Frame, FrameLayout};
pub use frame_control::{FrameControl, FrameControlRepr, FrameType, FrameVersion};
pub use identity::Identity;
pub use security::{KeyIdentifierMode, SecurityControl, SecurityLevel};

/// An error that can occur when reading or writing an OSNP frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error;

/// A type alias for `Result<T, frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
