//! API frame encoding.
//!
//! This module builds complete XBee "transmit request" API frames: start
//! delimiter, big-endian length, frame type and ID, broadcast addressing,
//! payload and the trailing checksum (see [`crate::consts`] for the layout).
//!
//! Two entry points are provided:
//!
//! - [`encode_frame`] / [`encode_frame_raw`] write into a caller-supplied
//!   buffer whose length is the capacity, and return the number of bytes written.
//! - [`Frame::encode`] returns an owned, immutable [`Frame`].
//!
//! Encoding is a single, stateless transform. The destination is validated
//! before the first byte is written, so a rejected call leaves it untouched.
//!
//! ## Example
//!
//! ```rust
//! use xbee_tx::frame::encode_frame;
//!
//! let mut buf = [0u8; 64];
//! let len = encode_frame(&mut buf, b"512").unwrap();
//! assert_eq!(len, 21);
//! assert_eq!(&buf[..3], &[0x7E, 0x00, 0x11]);
//! assert_eq!(buf[len - 1], 0x5B);
//! ```

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::checksum::{compute_checksum, verify_checksum};
#[cfg(not(feature = "std"))]
use crate::consts::FRAME_BUF_LEN;
use crate::consts::{
    BROADCAST_ADDRESS_16, BROADCAST_ADDRESS_64, BROADCAST_RADIUS, FRAME_DATA_OFFSET, FRAME_ID,
    FRAME_OVERHEAD, FRAME_TYPE_TX_REQUEST, LENGTH_EXCLUDED, LENGTH_OFFSET,
    MAX_ENCODABLE_PAYLOAD_LEN, PAYLOAD_OFFSET, START_DELIMITER, TX_OPTIONS,
};
use crate::error::FrameError;

/// Returns the total size of a frame carrying `payload_len` bytes, or
/// [`FrameError::FrameTooLarge`] if it does not fit `capacity` bytes.
pub fn frame_len(payload_len: usize, capacity: usize) -> Result<usize, FrameError> {
    let required = payload_len.saturating_add(FRAME_OVERHEAD);
    if payload_len > MAX_ENCODABLE_PAYLOAD_LEN || required > capacity {
        return Err(FrameError::FrameTooLarge { required, capacity });
    }
    Ok(required)
}

/// Encodes `payload` as a transmit request frame at the start of `dest`.
///
/// # Arguments
/// - `dest`: The destination buffer. Its length is the capacity.
/// - `payload`: The application data to carry.
///
/// # Returns
/// The number of bytes written, always `payload.len() + 18`.
///
/// # Errors
/// [`FrameError::FrameTooLarge`] if the frame does not fit `dest`. Nothing is
/// written in that case.
pub fn encode_frame(dest: &mut [u8], payload: &[u8]) -> Result<usize, FrameError> {
    let total = frame_len(payload.len(), dest.len())?;
    // frame_len caps the payload so that this fits the 16-bit field
    let length = (total - LENGTH_EXCLUDED) as u16;
    let payload_end = PAYLOAD_OFFSET + payload.len();

    dest[0] = START_DELIMITER;
    dest[LENGTH_OFFSET..FRAME_DATA_OFFSET].copy_from_slice(&length.to_be_bytes());
    dest[3] = FRAME_TYPE_TX_REQUEST;
    dest[4] = FRAME_ID;
    dest[5..13].copy_from_slice(&BROADCAST_ADDRESS_64);
    dest[13..15].copy_from_slice(&BROADCAST_ADDRESS_16);
    dest[15] = BROADCAST_RADIUS;
    dest[16] = TX_OPTIONS;
    dest[PAYLOAD_OFFSET..payload_end].copy_from_slice(payload);
    dest[payload_end] = compute_checksum(dest, FRAME_DATA_OFFSET..payload_end);

    Ok(total)
}

/// Encodes the first `payload_len` bytes of `payload`.
///
/// Same as [`encode_frame`], for callers that track the payload length
/// separately from the buffer holding it (e.g. the return value of a
/// formatter writing into a fixed scratch buffer).
///
/// # Errors
/// - [`FrameError::InvalidPayloadLength`] if `payload_len` is negative or
///   larger than `payload.len()`.
/// - [`FrameError::FrameTooLarge`] if the frame does not fit `dest`.
pub fn encode_frame_raw(
    dest: &mut [u8],
    payload: &[u8],
    payload_len: isize,
) -> Result<usize, FrameError> {
    let payload = usize::try_from(payload_len)
        .ok()
        .and_then(|len| payload.get(..len))
        .ok_or(FrameError::InvalidPayloadLength(payload_len))?;
    encode_frame(dest, payload)
}

/// A complete, encoded API frame.
///
/// Only constructed through [`Frame::encode`], so every `Frame` satisfies the
/// length and checksum invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    #[cfg(not(feature = "std"))]
    bytes: Vec<u8, FRAME_BUF_LEN>,
    #[cfg(feature = "std")]
    bytes: Vec<u8>,
}

impl Frame {
    /// Largest frame an owned [`Frame`] can hold.
    #[cfg(not(feature = "std"))]
    pub const CAPACITY: usize = FRAME_BUF_LEN;

    /// Largest frame an owned [`Frame`] can hold.
    #[cfg(feature = "std")]
    pub const CAPACITY: usize = MAX_ENCODABLE_PAYLOAD_LEN + FRAME_OVERHEAD;

    /// Encodes `payload` into a new frame.
    ///
    /// # Errors
    /// [`FrameError::FrameTooLarge`] if the frame would exceed [`Frame::CAPACITY`].
    pub fn encode(payload: &[u8]) -> Result<Self, FrameError> {
        let required = frame_len(payload.len(), Self::CAPACITY)?;
        let mut bytes = Vec::new();
        #[cfg(feature = "std")]
        bytes.resize(required, 0);
        #[cfg(not(feature = "std"))]
        bytes
            .resize(required, 0)
            .map_err(|_| FrameError::FrameTooLarge {
                required,
                capacity: Self::CAPACITY,
            })?;
        let _ = encode_frame(&mut bytes, payload)?;
        Ok(Self { bytes })
    }

    /// The raw frame bytes, ready for the radio.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total frame size in bytes, checksum included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: even an empty payload yields an 18-byte frame.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Value of the big-endian length field.
    pub fn length_field(&self) -> u16 {
        u16::from_be_bytes([self.bytes[LENGTH_OFFSET], self.bytes[LENGTH_OFFSET + 1]])
    }

    /// The carried payload.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..self.bytes.len() - 1]
    }

    /// The trailing checksum byte.
    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    /// Re-checks the length field and checksum.
    pub fn is_valid(&self) -> bool {
        usize::from(self.length_field()) + LENGTH_EXCLUDED == self.len()
            && verify_checksum(&self.bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
