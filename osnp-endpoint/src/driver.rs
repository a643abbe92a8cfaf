//! The platform-facing contract: everything the endpoint stack needs from
//! the world outside it — persisted identity, the radio, and timers — comes
//! through a single [`Driver`] implementation supplied by the platform.
//!
//! Unlike the frame-codec stack's own driver abstraction, this one carries
//! no suspension points: every method is a plain, synchronous call. The
//! endpoint never waits inside a driver call; it returns control to the
//! platform and is re-entered later through [`Endpoint::frame_received_cb`],
//! [`Endpoint::frame_sent_cb`], or [`Endpoint::timer_expired_cb`].
//!
//! [`Endpoint::frame_received_cb`]: crate::Endpoint::frame_received_cb
//! [`Endpoint::timer_expired_cb`]: crate::Endpoint::timer_expired_cb
//! [`Endpoint::frame_sent_cb`]: crate::Endpoint::frame_sent_cb

pub use crate::constants::TxStatus;

/// Everything the endpoint stack asks of the platform it runs on.
///
/// A single implementer typically owns the radio, the non-volatile storage,
/// the one hardware timer (only one of the four timer kinds is ever active
/// at a time, per the concurrency model), and the application command
/// dispatcher.
pub trait Driver {
    /// Read the device's permanent 64-bit extended unique identifier.
    fn load_eui(&mut self) -> [u8; 8];
    /// Read the persisted PAN ID.
    fn load_pan_id(&mut self) -> [u8; 2];
    /// Read the persisted short address.
    fn load_short_address(&mut self) -> [u8; 2];
    /// Read the persisted channel (`0xff` means "unassociated").
    fn load_channel(&mut self) -> u8;

    /// Persist a new PAN ID.
    fn write_pan_id(&mut self, pan_id: [u8; 2]);
    /// Persist a new short address.
    fn write_short_address(&mut self, short_addr: [u8; 2]);
    /// Persist a new channel.
    fn write_channel(&mut self, channel: u8);

    /// Tune the radio to `channel`.
    fn switch_channel(&mut self, channel: u8);
    /// Enqueue `frame` for transmission. Completion is reported later
    /// through [`Endpoint::frame_sent_cb`](crate::Endpoint::frame_sent_cb).
    fn transmit_frame(&mut self, frame: &[u8]);

    /// Arm the channel-scanning timer, implicitly disarming any other timer.
    fn start_channel_scanning_timer(&mut self);
    /// Arm the association-wait timer, implicitly disarming any other
    /// timer.
    fn start_association_wait_timer(&mut self);
    /// Arm the poll timer, implicitly disarming any other timer.
    fn start_poll_timer(&mut self);
    /// Arm the pending-data-wait timer, implicitly disarming any other
    /// timer.
    fn start_pending_data_wait_timer(&mut self);
    /// Disarm whichever timer is currently active.
    fn stop_active_timer(&mut self);

    /// Whether the application has frames queued up for the hub.
    fn get_pending_frames(&mut self) -> bool;

    /// Dispatch one TLV body element of a data frame to the application.
    ///
    /// `request`/`read_offset` is the read cursor into the request payload;
    /// `response`/`write_offset` is the write cursor into the response
    /// payload. `authenticated` is `true` when the endpoint is at least
    /// [`EndpointState::Associated`](crate::EndpointState::Associated).
    fn process_command(
        &mut self,
        request: &[u8],
        read_offset: &mut usize,
        response: &mut [u8],
        write_offset: &mut usize,
        authenticated: bool,
    );
}
