//! Data-frame handler (C6): unwraps the request TLV container, walks its
//! body through the application command dispatcher, and wraps the answer in
//! a response container.

use osnp_frame::Frame;

use crate::constants::tlv;
use crate::state::Endpoint;
use crate::{warn, Driver, Error, Result};

/// The marker written in place of a definite length on the response
/// container, matching the response-codec's indefinite-length convention.
const INDEFINITE_LENGTH_MARKER: u8 = 0x80;
/// The terminator octet closing an indefinite-length container.
const INDEFINITE_LENGTH_TERMINATOR: u8 = 0x00;

/// Handle a received data frame: validate the request container, dispatch
/// its body, and transmit the wrapped response. Errors are logged here
/// rather than propagated — the caller has nothing more useful to do with
/// them than drop the frame.
pub(crate) fn handle<D: Driver>(endpoint: &mut Endpoint<D>, frame: &Frame<&[u8]>) {
    if let Err(err) = try_handle(endpoint, frame) {
        warn!("data frame dropped: {:?}", err);
    }
}

fn try_handle<D: Driver>(endpoint: &mut Endpoint<D>, frame: &Frame<&[u8]>) -> Result<()> {
    let payload = frame.payload();

    if payload.len() < 2 || payload[0] != tlv::REQUEST_CONTAINER {
        return Err(Error::MalformedContainer);
    }
    let declared_len = payload[1] as usize;
    let end = 2 + declared_len;
    if payload.len() < end {
        return Err(Error::MalformedContainer);
    }

    let authenticated = endpoint.is_associated();

    let header_len = endpoint.build_response_frame(frame, &[])?;

    let buf_len = endpoint.tx_buf.len();
    if buf_len - header_len < 3 {
        return Err(Error::BufferTooSmall);
    }

    // Widen the response's writable payload region to the whole remaining
    // buffer so the command dispatcher can write directly into it; the
    // final length is reported back below.
    let mut write_offset;
    {
        let region = &mut endpoint.tx_buf[header_len..];
        region[0] = tlv::RESPONSE_CONTAINER;
        region[1] = INDEFINITE_LENGTH_MARKER;

        let mut read_offset = 2usize;
        write_offset = 2usize;
        while read_offset < end {
            endpoint.driver.process_command(
                payload,
                &mut read_offset,
                region,
                &mut write_offset,
                authenticated,
            );
        }

        if write_offset < region.len() {
            region[write_offset] = INDEFINITE_LENGTH_TERMINATOR;
            write_offset += 1;
        } else {
            warn!("data response overflowed tx buffer, dropping terminator");
        }
    }

    let total_len = header_len + write_offset;
    endpoint.driver.transmit_frame(&endpoint.tx_buf[..total_len]);
    Ok(())
}
