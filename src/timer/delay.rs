use crate::driver::XBeeDriver;
use crate::sensor::SensorSource;
use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::Write;

/// Runs a blocking loop that samples and transmits at a fixed interval.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. Each iteration runs [`XBeeDriver::cycle()`] and then sleeps using a delay
/// provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `driver`: A mutable reference to an `XBeeDriver` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `interval_ms`: The sleep between two cycles, in milliseconds
///   (e.g. [`SAMPLE_INTERVAL_MS`](crate::consts::SAMPLE_INTERVAL_MS)).
///
/// # Example
/// ```rust,ignore
/// use xbee_tx::consts::SAMPLE_INTERVAL_MS;
/// use xbee_tx::timer::run_sample_loop;
///
/// let mut driver = XBeeDriver::new(radio, Some(usb), || adc.read(), 1, None);
/// run_sample_loop(&mut driver, &mut delay, SAMPLE_INTERVAL_MS);
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - Failed cycles are counted in `driver.tx_bad` and the loop carries on with the next one.
pub fn run_sample_loop<D: DelayNs, RADIO, DIAG, SENSOR>(
    driver: &mut XBeeDriver<RADIO, DIAG, SENSOR>,
    delay: &mut D,
    interval_ms: u32,
) -> !
where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    loop {
        let _ = driver.cycle();
        delay.delay_ms(interval_ms);
    }
}
