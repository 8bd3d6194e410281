//! Constants used across the API frame implementation.
//!
//! This module defines the fixed field values of an XBee "transmit request"
//! API frame, the offsets of every field inside the frame, and the buffer
//! sizes used when sampling and sending.
//!
//! ## Frame Layout
//!
//! | Offset  | Size | Field                      |
//! |---------|------|----------------------------|
//! | 0       | 1    | Start delimiter (`0x7E`)   |
//! | 1..=2   | 2    | Length, big-endian         |
//! | 3       | 1    | Frame type                 |
//! | 4       | 1    | Frame ID                   |
//! | 5..=12  | 8    | 64-bit destination address |
//! | 13..=14 | 2    | 16-bit destination address |
//! | 15      | 1    | Broadcast radius           |
//! | 16      | 1    | Transmit options           |
//! | 17..    | P    | Payload                    |
//! | 17 + P  | 1    | Checksum                   |
//!
//! The length field counts every byte between the length field and the
//! checksum, i.e. `FRAME_OVERHEAD + P - 4`.

/// First byte of every API frame.
pub const START_DELIMITER: u8 = 0x7E;

/// API frame type for a "transmit request".
pub const FRAME_TYPE_TX_REQUEST: u8 = 0x10;

/// Frame ID carried by every transmitted frame.
///
/// A non-zero ID asks the module for a transmit status; this crate never
/// reads it back.
pub const FRAME_ID: u8 = 0x01;

/// 64-bit broadcast destination address.
pub const BROADCAST_ADDRESS_64: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF];

/// 16-bit destination address used together with the 64-bit broadcast address.
pub const BROADCAST_ADDRESS_16: [u8; 2] = [0xFF, 0xFE];

/// Broadcast radius. Zero selects the module's maximum hop count.
pub const BROADCAST_RADIUS: u8 = 0x00;

/// Transmit options. No options set.
pub const TX_OPTIONS: u8 = 0x00;

/// Offset of the two length bytes.
pub const LENGTH_OFFSET: usize = 1;

/// Offset of the first byte covered by both the length field and the checksum.
pub const FRAME_DATA_OFFSET: usize = 3;

/// Offset of the first payload byte.
pub const PAYLOAD_OFFSET: usize = 17;

/// Bytes in a frame that are not payload: 17 header/address bytes plus the checksum.
pub const FRAME_OVERHEAD: usize = PAYLOAD_OFFSET + 1;

/// Bytes of a frame that the length field does not count: the start
/// delimiter, the two length bytes and the checksum.
pub const LENGTH_EXCLUDED: usize = 4;

/// Size of the serial buffers used for frames and diagnostic lines.
pub const FRAME_BUF_LEN: usize = 64;

/// Largest payload that fits a [`FRAME_BUF_LEN`] frame buffer.
pub const MAX_PAYLOAD_LEN: usize = FRAME_BUF_LEN - FRAME_OVERHEAD;

/// Largest payload the 16-bit length field can describe.
pub const MAX_ENCODABLE_PAYLOAD_LEN: usize = u16::MAX as usize + LENGTH_EXCLUDED - FRAME_OVERHEAD;

/// Value a normalized `1.0` sensor reading is scaled to (10-bit ADC range).
pub const DEFAULT_FULL_SCALE: u16 = 1023;

/// Default time between two sample cycles, in milliseconds.
pub const SAMPLE_INTERVAL_MS: u32 = 2_000;

/// Prefix of the line echoed on the diagnostic channel.
pub const DIAGNOSTIC_PREFIX: &str = "Payload to send: ";
