//! Stack-level error type.

/// An error surfaced by the endpoint stack.
///
/// Per the error handling design, none of these ever propagate to the
/// platform synchronously — they are resolved locally to a state transition
/// or a silent drop, and exist mainly so call sites can log what happened.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A received frame's header could not be parsed (see
    /// [`osnp_frame::Error`]), or its cumulative header length exceeded the
    /// buffer.
    MalformedFrame,
    /// A received data frame's outer TLV tag was not the request container
    /// tag, or its length was indefinite.
    MalformedContainer,
    /// The destination buffer supplied for a built frame was too small.
    BufferTooSmall,
    /// A MAC command was received with a payload shorter than the command
    /// requires.
    TruncatedCommand,
}
