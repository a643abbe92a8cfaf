//! MAC-command handler (C5): the small set of commands the endpoint accepts
//! while unassociated (discovery, association) and while associated
//! (disassociation notification). Every other command is ignored silently.

use osnp_frame::Frame;

use crate::constants::mac_command;
use crate::state::{Endpoint, EndpointState};
use crate::{debug, info, warn, Driver, Error, Result};

/// Dispatch a received MAC-command frame based on the endpoint's current
/// state. Errors are logged here rather than propagated — the caller has
/// nothing more useful to do with them than drop the frame.
pub(crate) fn handle<D: Driver>(endpoint: &mut Endpoint<D>, frame: &Frame<&[u8]>) {
    let payload = frame.payload();
    let command = match payload.first() {
        Some(&command) => command,
        None => {
            warn!("mac command frame with empty payload");
            return;
        }
    };

    let result = match endpoint.state {
        EndpointState::Scanning | EndpointState::WaitingAssocReply => match command {
            mac_command::DISCOVER => handle_discover(endpoint, frame),
            mac_command::ASSOCIATION_REQ => handle_association_req(endpoint, frame, payload),
            _ => Ok(()),
        },
        EndpointState::Associated | EndpointState::WaitingPending => {
            if command == mac_command::DISASSOCIATED {
                handle_disassociated(endpoint);
            }
            Ok(())
        }
    };

    if let Err(err) = result {
        warn!("mac command {:?} dropped: {:?}", command, err);
    }
}

/// Answer a `DISCOVER` with a `DISCOVER` reply (extended source addressing,
/// since the endpoint is unassociated), then wait for an association
/// request.
fn handle_discover<D: Driver>(endpoint: &mut Endpoint<D>, frame: &Frame<&[u8]>) -> Result<()> {
    debug!("discover received, replying");

    let len = endpoint.build_response_frame(frame, &[mac_command::DISCOVER])?;
    endpoint.driver.transmit_frame(&endpoint.tx_buf[..len]);

    endpoint.state = EndpointState::WaitingAssocReply;
    endpoint.driver.stop_active_timer();
    endpoint.driver.start_association_wait_timer();
    Ok(())
}

/// Adopt the PAN ID and short address offered by an `ASSOCIATION_REQ`,
/// persist them alongside the current channel, and reply with
/// `ASSOCIATION_RES` carrying the endpoint's capability byte.
fn handle_association_req<D: Driver>(
    endpoint: &mut Endpoint<D>,
    frame: &Frame<&[u8]>,
    payload: &[u8],
) -> Result<()> {
    if payload.len() < 3 {
        return Err(Error::TruncatedCommand);
    }
    let short_addr = [payload[1], payload[2]];
    let pan_id = frame
        .src_pan_id()
        .or_else(|| frame.dst_pan_id())
        .unwrap_or(endpoint.identity.pan_id);
    let channel = endpoint.channel;

    endpoint
        .identity
        .associate(&mut endpoint.driver, pan_id, short_addr, channel);
    endpoint.state = EndpointState::Associated;

    info!("associated, pan={:?} short={:?} channel={}", pan_id, short_addr, channel);

    let response_payload = [mac_command::ASSOCIATION_RES, endpoint.capabilities];
    let len = endpoint.build_response_frame(frame, &response_payload)?;
    endpoint.driver.transmit_frame(&endpoint.tx_buf[..len]);

    endpoint.driver.stop_active_timer();
    endpoint.driver.start_poll_timer();
    Ok(())
}

/// The coordinator (or the local application) is tearing down the
/// association: reset identity to the disassociated sentinels and resume
/// scanning from channel 0.
fn handle_disassociated<D: Driver>(endpoint: &mut Endpoint<D>) {
    info!("disassociation notification received");

    endpoint.identity.disassociate(&mut endpoint.driver);
    endpoint.channel = 0;
    endpoint.driver.switch_channel(0);
    endpoint.state = EndpointState::Scanning;
    endpoint.driver.stop_active_timer();
    endpoint.driver.start_channel_scanning_timer();
}
