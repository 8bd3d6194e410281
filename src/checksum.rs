//! 8-bit API frame checksum.
//!
//! The checksum is `0xFF` minus the low byte of the sum of every byte between
//! the length field and the checksum itself. A receiver validates a frame by
//! adding the checksum to that same sum: the low byte must come out as `0xFF`.

use core::ops::Range;

use crate::consts::{FRAME_DATA_OFFSET, FRAME_OVERHEAD, START_DELIMITER};

/// Computes the checksum of `bytes[range]`.
///
/// # Panics
/// Panics if `range` is out of bounds for `bytes`.
pub fn compute_checksum(bytes: &[u8], range: Range<usize>) -> u8 {
    let sum = bytes[range]
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
    0xFF - sum
}

/// Checks the trailing checksum of a complete frame.
///
/// Returns `false` for anything shorter than an empty-payload frame or not
/// starting with the start delimiter.
pub fn verify_checksum(frame: &[u8]) -> bool {
    if frame.len() < FRAME_OVERHEAD || frame[0] != START_DELIMITER {
        return false;
    }
    let sum = frame[FRAME_DATA_OFFSET..]
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
    sum == 0xFF
}
