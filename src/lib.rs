//! # xbee-tx
//!
//! A portable, no_std Rust driver that samples an analog sensor and broadcasts the reading
//! through an XBee radio module running in API mode.
//!
//! The crate builds API "transmit request" frames byte for byte:
//! - start delimiter and big-endian length field
//! - frame type, frame ID and broadcast addressing
//! - the payload (the reading as decimal text)
//! - the trailing 8-bit checksum
//!
//! and writes them to the module with `embedded-hal-nb` serial traits.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` to pace sample cycles |
//! | `timer-isr` (default) | Uses `critical_section::with` to run cycles from a timer interrupt |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! Frames can be encoded on their own:
//!
//! ```rust
//! use xbee_tx::frame::Frame;
//!
//! let frame = Frame::encode(b"512").unwrap();
//! assert_eq!(frame.len(), 21);
//! assert!(frame.is_valid());
//! ```
//!
//! Or let the driver run the whole sample-and-send cycle:
//!
//! ```rust,ignore
//! use xbee_tx::driver::XBeeDriver;
//!
//! let mut driver = XBeeDriver::new(xbee_uart, Some(usb_uart), || adc.read(), 1, None);
//! loop {
//!     let _ = driver.cycle();
//!     delay.delay_ms(2_000);
//! }
//! ```
//!
//! Or, use `run_sample_loop()` with a `DelayNs` implementation:
//!
//! ```rust,ignore
//! xbee_tx::timer::run_sample_loop(&mut driver, &mut delay, xbee_tx::consts::SAMPLE_INTERVAL_MS);
//! ```
//!
//! ## Integration Notes
//!
//! - The module must be configured for API mode without escaping (`AP=1`)
//! - Serial port settings (baud rate, 8N1) are configured through your HAL
//! - Frames are always broadcast; transmit status replies from the module are not read
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use embedded_hal_nb;
pub use heapless;

#[macro_use]
mod fmt;

pub mod checksum;
pub mod consts;
pub mod driver;
pub mod error;
pub mod frame;
pub mod sensor;
pub mod timer;
