//! Sensor-to-radio transmit driver for XBee modules in API mode.
//!
//! This module provides the [`XBeeDriver`] struct, which samples a
//! [`SensorSource`], renders the reading as decimal text, wraps it in a
//! transmit request API frame and writes the frame to the radio's serial port.
//! An optional second serial port receives a human-readable echo of every
//! payload.
//!
//! The driver works with any serial peripheral implementing
//! [`embedded_hal_nb::serial::Write`], so it is independent of the target HAL.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::serial::{Mock as Serial, Transaction};
//! # let frame = xbee_tx::frame::Frame::encode(b"1023").unwrap();
//! # let radio = Serial::new(&[Transaction::write_many(frame.as_bytes()), Transaction::flush()]);
//! use xbee_tx::driver::XBeeDriver;
//!
//! let mut driver: XBeeDriver<Serial<u8>, Serial<u8>, _> =
//!     XBeeDriver::new(radio, None, || 1.0f32, 1, None);
//!
//! loop {
//!     // Called every timer tick; samples and sends every `ticks_per_sample` ticks
//!     if let Some(Err(_)) = driver.tick() {
//!         // the next cycle tries again
//!     }
//!     # break;
//! }
//! # driver.radio.done();
//! ```
//!
//! ## Design Notes
//!
//! Frames are encoded into a stack buffer local to each [`send`](XBeeDriver::send),
//! so the driver keeps no frame between cycles. Nothing is ever read back from
//! the module: transmit status frames and acknowledgments are ignored.
//!
//! For timer and tick scheduling helpers, see [`crate::timer`].

use core::fmt::Write as _;

use embedded_hal_nb::serial::Write;
use heapless::String;
use nb::block;

use crate::consts::{DEFAULT_FULL_SCALE, DIAGNOSTIC_PREFIX, FRAME_BUF_LEN};
use crate::error::DriverError;
use crate::frame::encode_frame;
use crate::sensor::{Payload, SensorSource, format_reading};

/// A periodic sensor transmitter for XBee radio modules.
///
/// `XBeeDriver` ties together the three collaborators of one transmit cycle:
///
/// - `RADIO`: serial port wired to the module's DIN pin, in API mode
/// - `DIAG`: optional serial port for a local, human-readable payload echo
/// - `SENSOR`: the [`SensorSource`] sampled every cycle
///
/// A cycle samples the sensor, echoes the payload, encodes a transmit request
/// frame addressed to the broadcast address and writes it to `RADIO`.
///
/// ## Notes
///
/// - Call [`cycle()`](XBeeDriver::cycle) directly from your own loop, or
///   [`tick()`](XBeeDriver::tick) from a periodic timer.
/// - Only one `XBeeDriver` should own a given radio port.
#[derive(Debug)]
pub struct XBeeDriver<RADIO, DIAG, SENSOR>
where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    /// Radio serial port
    pub radio: RADIO,
    /// Diagnostic serial port
    pub diag: Option<DIAG>,
    /// Sampled sensor
    pub sensor: SENSOR,
    full_scale: u16,
    ticks_per_sample: u16,
    tick_counter: u16,

    /// Counter of frames written to the radio in full.
    pub tx_good: u16,

    /// Counter of cycles that failed to encode or write their frame.
    pub tx_bad: u16,
}

impl<RADIO, DIAG, SENSOR> XBeeDriver<RADIO, DIAG, SENSOR>
where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    /// Creates a new `XBeeDriver`.
    ///
    /// # Arguments
    /// - `radio`: The serial port connected to the XBee module.
    /// - `diag`: The optional serial port for payload echo.
    /// - `sensor`: The sensor sampled each cycle.
    /// - `ticks_per_sample`: Number of `tick()` calls per cycle. `0` is treated as `1`.
    /// - `full_scale`: Integer value of a `1.0` reading. Defaults to
    ///   [`DEFAULT_FULL_SCALE`].
    pub fn new(
        radio: RADIO,
        diag: Option<DIAG>,
        sensor: SENSOR,
        ticks_per_sample: u16,
        full_scale: Option<u16>,
    ) -> Self {
        Self {
            radio,
            diag,
            sensor,
            full_scale: full_scale.unwrap_or(DEFAULT_FULL_SCALE),
            ticks_per_sample: ticks_per_sample.max(1),
            tick_counter: 0,
            tx_good: 0,
            tx_bad: 0,
        }
    }

    /// Sets the integer value a `1.0` reading is scaled to.
    pub fn set_full_scale(&mut self, full_scale: u16) {
        self.full_scale = full_scale;
    }

    /// Samples the sensor and formats the reading as payload text.
    pub fn sample(&mut self) -> Payload {
        format_reading(self.sensor.read(), self.full_scale)
    }

    /// Writes `Payload to send: <payload>\n` to the diagnostic port.
    ///
    /// Does nothing without a diagnostic port. Lines longer than the
    /// diagnostic buffer are dropped, and write errors are only logged: the
    /// echo never affects transmission.
    pub fn echo(&mut self, payload: &str) {
        let Some(diag) = self.diag.as_mut() else {
            return;
        };
        let mut line: String<FRAME_BUF_LEN> = String::new();
        if writeln!(line, "{}{}", DIAGNOSTIC_PREFIX, payload).is_err() {
            warn!("diagnostic line too long, {} byte payload", payload.len());
            return;
        }
        for &byte in line.as_bytes() {
            if block!(diag.write(byte)).is_err() {
                warn!("diagnostic write failed");
                return;
            }
        }
    }

    /// Frames `payload` and writes the frame to the radio.
    ///
    /// # Returns
    /// The number of frame bytes written.
    ///
    /// # Errors
    /// - [`DriverError::Frame`] if the payload does not fit a frame buffer.
    ///   Nothing is written to the radio.
    /// - [`DriverError::Transport`] if the radio port reports an error.
    pub fn send(&mut self, payload: &[u8]) -> Result<usize, DriverError<RADIO::Error>> {
        let result = self.write_frame(payload);
        match &result {
            Ok(len) => {
                self.tx_good = self.tx_good.wrapping_add(1);
                debug!("sent {} byte frame", len);
            }
            Err(DriverError::Frame(_)) => {
                self.tx_bad = self.tx_bad.wrapping_add(1);
                warn!("dropped {} byte payload, frame too large", payload.len());
            }
            Err(DriverError::Transport(_)) => {
                self.tx_bad = self.tx_bad.wrapping_add(1);
                warn!("radio write failed");
            }
        }
        result
    }

    fn write_frame(&mut self, payload: &[u8]) -> Result<usize, DriverError<RADIO::Error>> {
        let mut buf = [0u8; FRAME_BUF_LEN];
        let len = encode_frame(&mut buf, payload)?;
        for &byte in &buf[..len] {
            block!(self.radio.write(byte)).map_err(DriverError::Transport)?;
        }
        block!(self.radio.flush()).map_err(DriverError::Transport)?;
        Ok(len)
    }

    /// Runs one full cycle: sample, echo, encode and transmit.
    ///
    /// # Returns
    /// The number of frame bytes written to the radio.
    pub fn cycle(&mut self) -> Result<usize, DriverError<RADIO::Error>> {
        let payload = self.sample();
        self.echo(&payload);
        self.send(payload.as_bytes())
    }

    /// Advances the driver by one timer tick.
    ///
    /// Every `ticks_per_sample` ticks a [`cycle()`](XBeeDriver::cycle) runs
    /// and its result is returned; other ticks return `None`.
    pub fn tick(&mut self) -> Option<Result<usize, DriverError<RADIO::Error>>> {
        self.tick_counter += 1;
        if self.tick_counter < self.ticks_per_sample {
            return None;
        }
        self.tick_counter = 0;
        Some(self.cycle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::frame::Frame;
    use embedded_hal_mock::eh1::serial::{Mock as SerialMock, Transaction as SerialTransaction};
    use embedded_hal_nb::serial::ErrorKind;

    const READING_FRAME: [u8; 21] = [
        0x7E, 0x00, 0x11, 0x10, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFE,
        0x00, 0x00, 0x35, 0x31, 0x32, 0x5B,
    ];

    fn radio_expecting(frame: &[u8]) -> SerialMock<u8> {
        SerialMock::new(&[
            SerialTransaction::write_many(frame),
            SerialTransaction::flush(),
        ])
    }

    #[test]
    fn test_cycle_sends_reading_frame() {
        let radio = radio_expecting(&READING_FRAME);
        let diag = SerialMock::new(&[SerialTransaction::write_many(b"Payload to send: 512\n")]);

        let mut driver = XBeeDriver::new(radio, Some(diag), || 512.5f32 / 1023.0, 1, None);
        assert_eq!(driver.cycle(), Ok(21));
        assert_eq!(driver.tx_good, 1);
        assert_eq!(driver.tx_bad, 0);

        driver.radio.done();
        let _ = driver.diag.as_mut().map(|diag| diag.done());
    }

    #[test]
    fn test_cycle_without_diagnostic_port() {
        let frame = Frame::encode(b"1023").unwrap();
        let radio = radio_expecting(frame.as_bytes());

        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 1.0f32, 1, None);
        assert_eq!(driver.cycle(), Ok(22));

        driver.radio.done();
    }

    #[test]
    fn test_full_scale_override() {
        let frame = Frame::encode(b"50").unwrap();
        let radio = radio_expecting(frame.as_bytes());

        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 0.5f32, 1, Some(100));
        assert_eq!(driver.sample().as_str(), "50");

        driver.set_full_scale(10);
        assert_eq!(driver.sample().as_str(), "5");

        driver.set_full_scale(100);
        assert_eq!(driver.cycle(), Ok(20));
        driver.radio.done();
    }

    #[test]
    fn test_send_oversize_payload_writes_nothing() {
        let radio = SerialMock::new(&[]);
        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 0.0f32, 1, None);

        let payload = [b'1'; FRAME_BUF_LEN];
        assert_eq!(
            driver.send(&payload),
            Err(DriverError::Frame(FrameError::FrameTooLarge {
                required: FRAME_BUF_LEN + 18,
                capacity: FRAME_BUF_LEN
            }))
        );
        assert_eq!(driver.tx_good, 0);
        assert_eq!(driver.tx_bad, 1);

        driver.radio.done();
    }

    #[test]
    fn test_send_surfaces_radio_error() {
        let radio = SerialMock::new(&[
            SerialTransaction::write(0x7E),
            SerialTransaction::write_error(0x00, nb::Error::Other(ErrorKind::Other)),
        ]);
        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 0.0f32, 1, None);

        assert_eq!(
            driver.send(b"0"),
            Err(DriverError::Transport(ErrorKind::Other))
        );
        assert_eq!(driver.tx_bad, 1);

        driver.radio.done();
    }

    #[test]
    fn test_echo_failure_does_not_block_send() {
        let radio = radio_expecting(&READING_FRAME);
        let diag = SerialMock::new(&[SerialTransaction::write_error(
            b'P',
            nb::Error::Other(ErrorKind::Other),
        )]);

        let mut driver = XBeeDriver::new(radio, Some(diag), || 512.5f32 / 1023.0, 1, None);
        assert_eq!(driver.cycle(), Ok(21));

        driver.radio.done();
        let _ = driver.diag.as_mut().map(|diag| diag.done());
    }

    #[test]
    fn test_echo_skips_oversize_line() {
        let radio = SerialMock::new(&[]);
        let diag = SerialMock::new(&[]);
        let mut driver = XBeeDriver::new(radio, Some(diag), || 0.0f32, 1, None);

        driver.echo("0123456789012345678901234567890123456789012345678");

        driver.radio.done();
        let _ = driver.diag.as_mut().map(|diag| diag.done());
    }

    #[test]
    fn test_tick_runs_cycle_every_ticks_per_sample() {
        let frame = Frame::encode(b"0").unwrap();
        let radio = SerialMock::new(&[
            SerialTransaction::write_many(frame.as_bytes()),
            SerialTransaction::flush(),
            SerialTransaction::write_many(frame.as_bytes()),
            SerialTransaction::flush(),
        ]);
        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 0.0f32, 3, None);

        assert!(driver.tick().is_none());
        assert!(driver.tick().is_none());
        assert_eq!(driver.tick(), Some(Ok(19)));
        assert!(driver.tick().is_none());
        assert!(driver.tick().is_none());
        assert_eq!(driver.tick(), Some(Ok(19)));
        assert_eq!(driver.tx_good, 2);

        driver.radio.done();
    }

    #[test]
    fn test_zero_ticks_per_sample_runs_every_tick() {
        let frame = Frame::encode(b"0").unwrap();
        let radio = radio_expecting(frame.as_bytes());
        let mut driver: XBeeDriver<_, SerialMock<u8>, _> =
            XBeeDriver::new(radio, None, || 0.0f32, 0, None);

        assert_eq!(driver.tick(), Some(Ok(19)));
        driver.radio.done();
    }
}
