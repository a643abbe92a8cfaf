//! The endpoint state machine (C4): four states driven by the three event
//! entry points the platform calls into. Single-threaded, cooperative,
//! run-to-completion — every callback here runs to the end without
//! suspending, per the concurrency model.

use osnp_frame::{Frame, FrameControlRepr, FrameType, FrameVersion};

use crate::constants::{TxStatus, CHANNEL_UNASSOCIATED, DEFAULT_TX_BUFFER_SIZE, NUM_CHANNELS};
use crate::identity::Identity;
use crate::{data, mac_commands, warn, Driver, Error, Result};

/// One of the four states the endpoint can be in.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EndpointState {
    /// Sweeping channels `0..16`, listening briefly on each for a
    /// coordinator willing to associate.
    Scanning,
    /// A frame was heard; waiting for the coordinator to complete the
    /// discovery/association handshake before resuming the sweep.
    WaitingAssocReply,
    /// Associated with a coordinator; periodically polling it.
    Associated,
    /// A just-sent poll or reply reported more data pending; extending the
    /// listening window before returning to the poll cycle.
    WaitingPending,
}

/// The endpoint: its identity, its state, and the driver it runs on top of.
///
/// `Endpoint` owns exactly one outgoing frame buffer; at most one
/// transmission is ever in flight (per the concurrency model's resource
/// list), so a single buffer is sufficient and avoids any allocation.
pub struct Endpoint<D: Driver> {
    pub(crate) driver: D,
    pub(crate) identity: Identity,
    /// The currently tuned radio channel. Distinct from the persisted
    /// channel mirrored in `identity`: it changes every scan-timer tick
    /// without being persisted, and is only written back to `identity`
    /// (and through the driver) on association or disassociation.
    pub(crate) channel: u8,
    pub(crate) state: EndpointState,
    pub(crate) seq: u8,
    /// `OSNP_DEVICE_CAPABILITES`: bit 0 set means `RX_ALWAYS_ON`, clear
    /// means `RX_POLL_DRIVEN`. Fixed for the lifetime of the endpoint —
    /// a build/construction parameter of the firmware variant, not
    /// something the protocol negotiates.
    pub(crate) capabilities: u8,
    pub(crate) tx_buf: [u8; DEFAULT_TX_BUFFER_SIZE],
}

impl<D: Driver> Endpoint<D> {
    /// Power-on: load the persisted identity, tune the radio, and arm the
    /// first timer. Equivalent to the stack's `initialize()` entry point.
    ///
    /// `capabilities` is the device's fixed capability byte (see
    /// [`crate::constants::capabilities`]).
    pub fn initialize(mut driver: D, capabilities: u8) -> Self {
        let identity = Identity::load(&mut driver);

        let (channel, state) = if identity.channel == CHANNEL_UNASSOCIATED {
            (0, EndpointState::Scanning)
        } else {
            (identity.channel, EndpointState::Associated)
        };

        driver.switch_channel(channel);
        match state {
            EndpointState::Scanning => driver.start_channel_scanning_timer(),
            EndpointState::Associated => driver.start_poll_timer(),
            _ => unreachable!("initial state is always Scanning or Associated"),
        }

        Self {
            driver,
            identity,
            channel,
            state,
            seq: 0,
            capabilities,
            tx_buf: [0u8; DEFAULT_TX_BUFFER_SIZE],
        }
    }

    /// The endpoint's current state.
    pub fn state(&self) -> EndpointState {
        self.state
    }

    /// The currently tuned channel.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    fn next_seq(&mut self) -> u8 {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        seq
    }

    /// Whether the endpoint currently answers as an associated device
    /// (short source addressing, `authenticated = true` for the command
    /// dispatcher).
    pub(crate) fn is_associated(&self) -> bool {
        matches!(
            self.state,
            EndpointState::Associated | EndpointState::WaitingPending
        )
    }

    /// Build a new outgoing MAC-command frame into the endpoint's TX
    /// buffer, returning the total length to transmit (header + payload;
    /// the FCS is appended by the radio, not part of this buffer).
    pub(crate) fn build_command_frame(
        &mut self,
        dst_addressing_mode: osnp_frame::AddressingMode,
        payload: &[u8],
    ) -> Result<usize> {
        let seq = self.next_seq();
        let src_addressing_mode = if self.is_associated() {
            osnp_frame::AddressingMode::Short
        } else {
            osnp_frame::AddressingMode::Extended
        };
        let fcr = FrameControlRepr {
            frame_type: FrameType::MacCommand,
            security_enabled: false,
            frame_pending: false,
            ack_request: true,
            pan_id_compression: true,
            dst_addressing_mode,
            src_addressing_mode,
            frame_version: FrameVersion::Ieee802154_2006,
        };
        let wire_identity = self.identity.as_wire();
        let buf_len = self.tx_buf.len();
        let mut frame = Frame::initialize(&fcr, 0, seq, &wire_identity, &mut self.tx_buf[..])
            .map_err(|_| Error::BufferTooSmall)?;
        // The coordinator's own address is never tracked by the identity
        // tuple (a PAN has exactly one coordinator); it is always addressed
        // by the PAN ID the endpoint shares with it plus the broadcast
        // short address.
        if dst_addressing_mode != osnp_frame::AddressingMode::None {
            frame.set_dst_pan_id(wire_identity.pan_id);
            frame.set_dst_address(osnp_frame::Address::BROADCAST);
        }
        let header_len = frame.header_len();
        if payload.len() > buf_len - header_len {
            return Err(Error::BufferTooSmall);
        }
        frame.set_payload(payload);
        Ok(header_len + frame.payload_len())
    }

    /// Build a response frame answering `request`, per the response
    /// builder's addressing/PAN-echoing rules. Returns the total length to
    /// transmit.
    pub(crate) fn build_response_frame<S: AsRef<[u8]>>(
        &mut self,
        request: &Frame<S>,
        payload: &[u8],
    ) -> Result<usize> {
        let seq = self.next_seq();
        let use_short = self.is_associated();
        let wire_identity = self.identity.as_wire();
        let buf_len = self.tx_buf.len();
        let mut response =
            osnp_frame::initialize_response(request, seq, use_short, &wire_identity, &mut self.tx_buf[..])
                .map_err(|_| Error::BufferTooSmall)?;
        let header_len = response.header_len();
        if payload.len() > buf_len - header_len {
            return Err(Error::BufferTooSmall);
        }
        response.set_payload(payload);
        Ok(header_len + response.payload_len())
    }

    /// A frame arrived from the radio. Equivalent to `frame_received_cb`.
    pub fn frame_received_cb(&mut self, buf: &[u8], len: usize) {
        let frame = match Frame::parse(buf, len) {
            Ok(frame) => frame,
            Err(_) => {
                warn!("dropping frame: {:?}", Error::MalformedFrame);
                return;
            }
        };

        if self.state == EndpointState::Scanning {
            self.state = EndpointState::WaitingAssocReply;
            self.driver.stop_active_timer();
            self.driver.start_association_wait_timer();
        } else if self.is_associated() {
            if frame.frame_control().frame_pending() {
                if self.state != EndpointState::WaitingPending {
                    self.state = EndpointState::WaitingPending;
                    self.driver.stop_active_timer();
                    self.driver.start_pending_data_wait_timer();
                }
            } else if self.state == EndpointState::WaitingPending {
                self.state = EndpointState::Associated;
                self.driver.stop_active_timer();
                self.driver.start_poll_timer();
            }
        }

        match frame.frame_control().frame_type() {
            FrameType::MacCommand => mac_commands::handle(self, &frame),
            FrameType::Data => data::handle(self, &frame),
            _ => {}
        }
    }

    /// A previously submitted transmission completed. Equivalent to
    /// `frame_sent_cb`.
    pub fn frame_sent_cb(&mut self, status: TxStatus) {
        match self.state {
            EndpointState::Scanning => {
                self.driver.stop_active_timer();
                self.driver.start_channel_scanning_timer();
            }
            EndpointState::WaitingAssocReply => {
                self.driver.stop_active_timer();
                self.driver.start_association_wait_timer();
            }
            EndpointState::Associated | EndpointState::WaitingPending => {
                if status == TxStatus::Ok && self.driver.get_pending_frames() {
                    self.state = EndpointState::WaitingPending;
                    self.driver.stop_active_timer();
                    self.driver.start_pending_data_wait_timer();
                } else {
                    self.state = EndpointState::Associated;
                    self.driver.stop_active_timer();
                    self.driver.start_poll_timer();
                }
            }
        }
    }

    /// Any of the four timers fired. Equivalent to `timer_expired_cb`.
    pub fn timer_expired_cb(&mut self) {
        match self.state {
            EndpointState::Scanning => {
                self.channel = (self.channel + 1) % NUM_CHANNELS;
                self.driver.switch_channel(self.channel);
                self.driver.stop_active_timer();
                self.driver.start_channel_scanning_timer();
            }
            EndpointState::WaitingAssocReply => {
                self.state = EndpointState::Scanning;
                self.driver.stop_active_timer();
                self.driver.start_channel_scanning_timer();
            }
            EndpointState::Associated => {
                self.poll();
            }
            EndpointState::WaitingPending => {
                self.state = EndpointState::Associated;
                self.driver.stop_active_timer();
                self.driver.start_poll_timer();
            }
        }
    }

    /// Transmit a `DATA_REQ` MAC command, polling the coordinator for
    /// queued frames. Callable directly by the platform, not only from
    /// `timer_expired_cb` — the original firmware exposes this as its own
    /// `osnp_poll()` symbol for the same reason.
    pub fn poll(&mut self) {
        use crate::constants::mac_command::DATA_REQ;

        match self.build_command_frame(osnp_frame::AddressingMode::Short, &[DATA_REQ]) {
            Ok(len) => self.driver.transmit_frame(&self.tx_buf[..len]),
            Err(_) => warn!("failed to build poll frame"),
        }
    }
}
