//! The [`Frame`] view: a zero-copy reader/writer over a single IEEE
//! 802.15.4 MAC frame buffer.

use crate::addressing::{Address, AddressingFields, AddressingMode};
use crate::frame_control::{FrameControl, FrameControlRepr, FrameVersion};
use crate::identity::Identity;
use crate::security::SecurityControl;
use crate::{Error, Result};

/// The trailing octet count owned by the PHY layer (the frame check
/// sequence), not part of any [`Frame`] view.
const FCS_LEN: usize = 2;

/// The resolved byte layout of a frame's header fields: an offset and
/// width into the backing buffer for each field that is present. Computed
/// once per [`Frame`] and reused by every accessor — this is what lets the
/// codec describe a frame without copying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    dst_pan: Option<(usize, usize)>,
    dst_addr: Option<(usize, usize)>,
    src_pan: Option<(usize, usize)>,
    src_addr: Option<(usize, usize)>,
    sc: Option<usize>,
    frame_counter: Option<(usize, usize)>,
    key_id: Option<(usize, usize)>,
    header_len: usize,
}

impl FrameLayout {
    /// Resolve the addressing-field portion of the layout from the Frame
    /// Control bits alone, returning the ranges and the offset at which the
    /// security header (if any) would start.
    fn addressing(fc: &FrameControl<&[u8]>) -> (Self, usize) {
        let addressing = AddressingFields::resolve(
            fc.dst_addressing_mode(),
            fc.src_addressing_mode(),
            fc.pan_id_compression(),
        );

        // fc_low (1) + fc_high (1) + seq_no (1).
        let mut offset = 3;

        let dst_pan = addressing.dst_pan_present.then(|| {
            let range = (offset, offset + 2);
            offset += 2;
            range
        });

        let dst_addr_len = addressing.dst_addressing_mode.size();
        let dst_addr = (dst_addr_len > 0).then(|| {
            let range = (offset, offset + dst_addr_len);
            offset += dst_addr_len;
            range
        });

        let src_pan = addressing.src_pan_present.then(|| {
            let range = (offset, offset + 2);
            offset += 2;
            range
        });

        let src_addr_len = addressing.src_addressing_mode.size();
        let src_addr = (src_addr_len > 0).then(|| {
            let range = (offset, offset + src_addr_len);
            offset += src_addr_len;
            range
        });

        (
            Self {
                dst_pan,
                dst_addr,
                src_pan,
                src_addr,
                sc: None,
                frame_counter: None,
                key_id: None,
                header_len: offset,
            },
            offset,
        )
    }

    /// Extend an addressing-only layout with the security header, given the
    /// Security Control octet at `sc_offset`.
    fn with_security(mut self, sc_offset: usize, sc_octet: u8) -> Self {
        let key_id_len = SecurityControl::new(sc_octet)
            .key_identifier_mode()
            .key_id_len();

        self.sc = Some(sc_offset);
        let fc_start = sc_offset + 1;
        self.frame_counter = Some((fc_start, fc_start + 4));
        let key_id_start = fc_start + 4;
        self.key_id = (key_id_len > 0).then_some((key_id_start, key_id_start + key_id_len));
        self.header_len = key_id_start + key_id_len;
        self
    }
}

/// A zero-copy view over a single IEEE 802.15.4 MAC frame.
///
/// `Frame` never owns the bytes it describes: it holds a buffer (`T`,
/// typically `&[u8]` or `&mut [u8]`) plus a [`FrameLayout`] of offsets into
/// it. Every accessor borrows from the buffer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<T: AsRef<[u8]>> {
    buffer: T,
    layout: FrameLayout,
    payload_len: usize,
}

impl<T: AsRef<[u8]>> Frame<T> {
    /// Parse `buffer` (at least `total_len` octets, the last two of which
    /// are the PHY-owned FCS) into a [`Frame`] view.
    ///
    /// No data is copied; this only resolves field offsets.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_len` is too small to contain the fields
    /// implied by the Frame Control bits, or if the buffer is shorter than
    /// the resolved header length.
    pub fn parse(buffer: T, total_len: usize) -> Result<Self> {
        if total_len < FCS_LEN + 3 {
            return Err(Error);
        }

        let raw = buffer.as_ref();
        if raw.len() < total_len {
            return Err(Error);
        }

        let fc = FrameControl::new(&raw[..2])?;
        let (mut layout, addr_end) = FrameLayout::addressing(&fc);

        if fc.security_enabled() && fc.frame_version() != FrameVersion::Ieee802154_2003 {
            if addr_end >= total_len - FCS_LEN {
                return Err(Error);
            }
            let sc_octet = raw[addr_end];
            layout = layout.with_security(addr_end, sc_octet);
        }

        // A parse where the cumulative header length exceeds
        // total_len - 2 is malformed and must be rejected.
        if layout.header_len > total_len - FCS_LEN {
            return Err(Error);
        }

        let payload_len = total_len - layout.header_len - FCS_LEN;

        Ok(Self {
            buffer,
            layout,
            payload_len,
        })
    }

    /// Create a [`Frame`] view without any validation. Used internally by
    /// [`initialize`](Frame::initialize) once the header has just been
    /// written, so every invariant is known to hold by construction.
    fn from_layout(buffer: T, layout: FrameLayout, payload_len: usize) -> Self {
        Self {
            buffer,
            layout,
            payload_len,
        }
    }

    /// The total length, in octets, of the header (Frame Control through
    /// the end of the security header, if any).
    pub fn header_len(&self) -> usize {
        self.layout.header_len
    }

    /// The length, in octets, of the payload.
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// Return a [`FrameControl`] reader over `fc_low`/`fc_high`.
    pub fn frame_control(&self) -> FrameControl<&[u8]> {
        FrameControl::new_unchecked(&self.buffer.as_ref()[..2])
    }

    /// Return the sequence number.
    pub fn sequence_number(&self) -> u8 {
        self.buffer.as_ref()[2]
    }

    fn slice(&self, range: (usize, usize)) -> &[u8] {
        &self.buffer.as_ref()[range.0..range.1]
    }

    /// Return the destination PAN ID, if present.
    pub fn dst_pan_id(&self) -> Option<[u8; 2]> {
        self.layout.dst_pan.map(|r| {
            let s = self.slice(r);
            [s[0], s[1]]
        })
    }

    /// Return the destination address, if present.
    pub fn dst_address(&self) -> Option<Address> {
        self.layout.dst_addr.map(|r| Address::from_bytes(self.slice(r)))
    }

    /// Return the source PAN ID, if present.
    pub fn src_pan_id(&self) -> Option<[u8; 2]> {
        self.layout.src_pan.map(|r| {
            let s = self.slice(r);
            [s[0], s[1]]
        })
    }

    /// Return the source address, if present.
    pub fn src_address(&self) -> Option<Address> {
        self.layout.src_addr.map(|r| Address::from_bytes(self.slice(r)))
    }

    /// Return the Security Control octet, if the security header is
    /// present.
    pub fn security_control(&self) -> Option<SecurityControl> {
        self.layout.sc.map(|o| SecurityControl::new(self.buffer.as_ref()[o]))
    }

    /// Return the frame counter, if the security header is present.
    pub fn frame_counter(&self) -> Option<[u8; 4]> {
        self.layout.frame_counter.map(|r| {
            let s = self.slice(r);
            [s[0], s[1], s[2], s[3]]
        })
    }

    /// Return the key identifier field, if present.
    pub fn key_id(&self) -> Option<&[u8]> {
        self.layout.key_id.map(|r| self.slice(r))
    }

    /// Return the payload of the frame.
    pub fn payload(&self) -> &[u8] {
        let start = self.layout.header_len;
        &self.buffer.as_ref()[start..start + self.payload_len]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Frame<T> {
    /// Write a new frame into `buffer`: stamps `fc_low`/`fc_high` from
    /// `fcr`, `sc` (if security is enabled), the sequence number, and — per
    /// the addressing mode — the endpoint's PAN ID and address from
    /// `identity`. Returns a [`Frame`] view with `payload_len() == 0`.
    ///
    /// The frame counter octets of a present security header are left
    /// untouched; frame-counter maintenance is the caller's responsibility.
    pub fn initialize(
        fcr: &FrameControlRepr,
        sc: u8,
        sequence_number: u8,
        identity: &Identity,
        mut buffer: T,
    ) -> Result<Self> {
        {
            let raw = buffer.as_mut();
            if raw.len() < 3 {
                return Err(Error);
            }
            let mut fc = FrameControl::new_unchecked(&mut raw[..2]);
            fc.set_fields(fcr);
            raw[2] = sequence_number;
        }

        let fc = FrameControl::new(&buffer.as_ref()[..2])?;
        let (mut layout, addr_end) = FrameLayout::addressing(&fc);

        if fcr.security_enabled && fcr.frame_version != FrameVersion::Ieee802154_2003 {
            let raw = buffer.as_mut();
            if raw.len() < addr_end + 1 {
                return Err(Error);
            }
            raw[addr_end] = sc;
            layout = layout.with_security(addr_end, sc);
        }

        if buffer.as_ref().len() < layout.header_len {
            return Err(Error);
        }

        let mut frame = Self::from_layout(buffer, layout, 0);
        frame.stamp_identity(fcr, identity);
        Ok(frame)
    }

    /// Populate `src_pan`/`dst_pan` and `src_addr` from `identity`: the
    /// source PAN ID is written unless elided, in which case — if PAN
    /// compression applies — the destination PAN ID carries it instead; the
    /// source address is the endpoint's short address or EUI depending on
    /// the source addressing mode.
    fn stamp_identity(&mut self, fcr: &FrameControlRepr, identity: &Identity) {
        if let Some(range) = self.layout.src_pan {
            self.buffer.as_mut()[range.0..range.1].copy_from_slice(&identity.pan_id);
        } else if fcr.pan_id_compression {
            if let Some(range) = self.layout.dst_pan {
                self.buffer.as_mut()[range.0..range.1].copy_from_slice(&identity.pan_id);
            }
        }

        if let Some(range) = self.layout.src_addr {
            let src = match fcr.src_addressing_mode {
                AddressingMode::Short => &identity.short_addr[..],
                _ => &identity.eui[..],
            };
            self.buffer.as_mut()[range.0..range.1].copy_from_slice(src);
        }
    }

    /// Overwrite the destination PAN ID, if the field is present in this
    /// frame's layout. A no-op otherwise.
    pub fn set_dst_pan_id(&mut self, pan_id: [u8; 2]) {
        if let Some(range) = self.layout.dst_pan {
            self.buffer.as_mut()[range.0..range.1].copy_from_slice(&pan_id);
        }
    }

    /// Overwrite the destination address, if the field is present in this
    /// frame's layout. Copies at most the field's width; a no-op if the
    /// field is absent.
    pub fn set_dst_address(&mut self, address: Address) {
        if let Some(range) = self.layout.dst_addr {
            let width = range.1 - range.0;
            self.buffer.as_mut()[range.0..range.1]
                .copy_from_slice(&address.as_bytes()[..width]);
        }
    }

    /// Set the frame's payload, growing `payload_len()` to `payload.len()`.
    ///
    /// # Panics
    ///
    /// Panics if the backing buffer is too small to hold the payload after
    /// the header.
    pub fn set_payload(&mut self, payload: &[u8]) {
        let start = self.layout.header_len;
        self.buffer.as_mut()[start..start + payload.len()].copy_from_slice(payload);
        self.payload_len = payload.len();
    }

    /// Return a mutable view of the payload region, sized to the frame's
    /// current `payload_len()`.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let start = self.layout.header_len;
        let len = self.payload_len;
        &mut self.buffer.as_mut()[start..start + len]
    }

    /// Grow or shrink `payload_len()` without writing to the buffer (used
    /// by callers, such as the data-frame handler, that write the payload
    /// incrementally via [`payload_mut`](Frame::payload_mut) or direct
    /// buffer access and then report the final length).
    pub fn set_payload_len(&mut self, len: usize) {
        self.payload_len = len;
    }
}

/// Derive and build a response frame's header from a received request
/// frame.
///
/// - The Frame-Pending bit is cleared.
/// - Addressing modes are swapped: the request's destination addressing
///   mode becomes the response's source mode, but overridden to `use_short`
///   (`true` when the endpoint is associated, `false` otherwise); the
///   request's source mode becomes the response's destination mode.
/// - The frame version is preserved.
/// - The Security Control octet is copied verbatim (the frame counter is
///   reset — i.e. left untouched by [`Frame::initialize`]).
/// - After the header is laid out: the destination PAN ID is the request's
///   `src_pan` if present, else its `dst_pan`; the destination address is
///   copied from the request's `src_addr`; the key identifier is copied
///   verbatim if both frames carry one.
pub fn initialize_response<S: AsRef<[u8]>, D: AsRef<[u8]> + AsMut<[u8]>>(
    src_frame: &Frame<S>,
    sequence_number: u8,
    use_short: bool,
    identity: &Identity,
    dst_buf: D,
) -> Result<Frame<D>> {
    let src_fc = src_frame.frame_control();

    let fcr = FrameControlRepr {
        frame_type: src_fc.frame_type(),
        security_enabled: src_fc.security_enabled(),
        frame_pending: false,
        ack_request: src_fc.ack_request(),
        pan_id_compression: src_fc.pan_id_compression(),
        src_addressing_mode: if use_short {
            AddressingMode::Short
        } else {
            AddressingMode::Extended
        },
        dst_addressing_mode: src_fc.src_addressing_mode(),
        frame_version: src_fc.frame_version(),
    };

    let sc = src_frame.security_control().map(|sc| sc.octet()).unwrap_or(0);

    let mut dst_frame = Frame::initialize(&fcr, sc, sequence_number, identity, dst_buf)?;

    if let Some(range) = dst_frame.layout.dst_pan {
        let pan = src_frame
            .src_pan_id()
            .or_else(|| src_frame.dst_pan_id())
            .unwrap_or(identity.pan_id);
        dst_frame.buffer.as_mut()[range.0..range.1].copy_from_slice(&pan);
    }

    if let (Some(range), Some(src_addr)) = (dst_frame.layout.dst_addr, src_frame.src_address()) {
        let width = range.1 - range.0;
        dst_frame.buffer.as_mut()[range.0..range.1].copy_from_slice(&src_addr.as_bytes()[..width]);
    }

    if let (Some(dst_range), Some(src_key_id)) = (dst_frame.layout.key_id, src_frame.key_id()) {
        let width = dst_range.1 - dst_range.0;
        dst_frame.buffer.as_mut()[dst_range.0..dst_range.1]
            .copy_from_slice(&src_key_id[..width.min(src_key_id.len())]);
    }

    Ok(dst_frame)
}
