//! Error types for frame encoding and transmission.

use core::fmt::Debug;

use thiserror::Error;

/// Reasons an API frame cannot be encoded.
///
/// Both variants are detected before the destination buffer is written.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FrameError {
    /// The payload length is negative or longer than the payload supplied.
    #[error("invalid payload length: {0}")]
    InvalidPayloadLength(isize),

    /// The encoded frame would not fit the destination buffer, or its length
    /// would not fit the 16-bit length field.
    #[error("frame of {required} bytes exceeds capacity of {capacity} bytes")]
    FrameTooLarge {
        /// Total size of the frame, checksum included.
        required: usize,
        /// Size of the destination buffer.
        capacity: usize,
    },
}

/// Errors returned by [`XBeeDriver`](crate::driver::XBeeDriver) while sending.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError<E: Debug> {
    /// The payload could not be framed.
    #[error("encoding failed: {0}")]
    Frame(#[from] FrameError),

    /// The radio serial channel reported an error.
    #[error("radio write failed: {0:?}")]
    Transport(E),
}
