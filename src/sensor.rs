//! Sensor sampling and payload formatting.
//!
//! A [`SensorSource`] yields a normalized reading in `[0.0, 1.0]`, the way an
//! ADC peripheral reports a ratio of its reference voltage. [`format_reading`]
//! scales it to an integer and renders it as decimal ASCII, which is what the
//! peer device expects as frame payload.

use core::fmt::Write;

use heapless::String;

use crate::consts::MAX_PAYLOAD_LEN;

/// Decimal text of one reading, bounded by the largest payload a frame buffer holds.
pub type Payload = String<MAX_PAYLOAD_LEN>;

/// Produces normalized analog readings on demand.
///
/// Implemented for any `FnMut() -> f32`, so a HAL's ADC read can be passed as
/// a closure:
///
/// ```rust
/// use xbee_tx::sensor::SensorSource;
///
/// let mut raw: u16 = 2048;
/// let mut pot = move || {
///     raw += 1;
///     raw as f32 / 4095.0
/// };
/// assert!(pot.read() > 0.5);
/// ```
pub trait SensorSource {
    /// Samples the sensor. Values outside `[0.0, 1.0]` are clamped by the formatter.
    fn read(&mut self) -> f32;
}

impl<F> SensorSource for F
where
    F: FnMut() -> f32,
{
    fn read(&mut self) -> f32 {
        self()
    }
}

/// Scales a normalized reading to `0..=full_scale`, truncating toward zero.
///
/// Readings below `0.0` and NaN map to `0`, readings above `1.0` to `full_scale`.
pub fn scale_reading(reading: f32, full_scale: u16) -> u16 {
    if reading.is_nan() {
        return 0;
    }
    (reading.clamp(0.0, 1.0) * f32::from(full_scale)) as u16
}

/// Renders `reading` scaled to `full_scale` as decimal ASCII.
///
/// ```rust
/// use xbee_tx::sensor::format_reading;
///
/// assert_eq!(format_reading(0.5, 1023).as_str(), "511");
/// ```
pub fn format_reading(reading: f32, full_scale: u16) -> Payload {
    let mut payload = Payload::new();
    // five digits at most, always fits
    let _ = write!(payload, "{}", scale_reading(reading, full_scale));
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_reading_range() {
        assert_eq!(scale_reading(0.0, 1023), 0);
        assert_eq!(scale_reading(1.0, 1023), 1023);
        assert_eq!(scale_reading(0.5, 1023), 511);
    }

    #[test]
    fn test_scale_reading_truncates() {
        // 0.9999 * 1023 = 1022.9
        assert_eq!(scale_reading(0.9999, 1023), 1022);
    }

    #[test]
    fn test_scale_reading_clamps() {
        assert_eq!(scale_reading(-0.25, 1023), 0);
        assert_eq!(scale_reading(1.5, 1023), 1023);
        assert_eq!(scale_reading(f32::NAN, 1023), 0);
        assert_eq!(scale_reading(f32::INFINITY, 1023), 1023);
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(0.0, 1023).as_str(), "0");
        assert_eq!(format_reading(1.0, 1023).as_str(), "1023");
        assert_eq!(format_reading(1.0, u16::MAX).as_str(), "65535");
    }

    #[test]
    fn test_closure_sensor() {
        let mut samples = [0.25f32, 0.75].into_iter();
        let mut sensor = move || samples.next().unwrap_or(0.0);
        assert_eq!(sensor.read(), 0.25);
        assert_eq!(sensor.read(), 0.75);
        assert_eq!(sensor.read(), 0.0);
    }
}
