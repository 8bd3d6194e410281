use crate::driver::XBeeDriver;
use crate::error::DriverError;
use crate::sensor::SensorSource;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal_nb::serial::Write;

/// Shared driver slot for use with `critical_section`.
pub type GlobalXBeeDriver<RADIO, DIAG, SENSOR> =
    Mutex<RefCell<Option<XBeeDriver<RADIO, DIAG, SENSOR>>>>;

/// Used to initialize the global static `XBeeDriver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use xbee_tx::timer::{GlobalXBeeDriver, global_driver_init};
/// use some_hal::{Usart0, Usart1};
///
/// static XBEE_DRIVER: GlobalXBeeDriver<Usart1, Usart0, fn() -> f32> =
///     global_driver_init();
/// ```
pub const fn global_driver_init<RADIO, DIAG, SENSOR>() -> GlobalXBeeDriver<RADIO, DIAG, SENSOR>
where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    Mutex::new(RefCell::new(None))
}

/// Stores a new driver in the global slot.
///
/// # Arguments
/// * The global static `XBeeDriver`
/// * The radio serial port
/// * The optional diagnostic serial port
/// * The sensor
/// * The number of timer ticks per sample, see
///   [`const_ticks_per_sample`](crate::timer::const_ticks_per_sample)
/// * The optional full-scale reading value
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_driver_setup(&XBEE_DRIVER, radio, Some(usb), read_pot, 125, None);
/// }
/// ```
pub fn global_driver_setup<RADIO, DIAG, SENSOR>(
    global_driver: &'static GlobalXBeeDriver<RADIO, DIAG, SENSOR>,
    radio: RADIO,
    diag: Option<DIAG>,
    sensor: SENSOR,
    ticks_per_sample: u16,
    full_scale: Option<u16>,
) where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    critical_section::with(|cs| {
        let _ = global_driver.borrow(cs).replace(Some(XBeeDriver::new(
            radio,
            diag,
            sensor,
            ticks_per_sample,
            full_scale,
        )));
    });
}

/// Runs the tick at each interrupt
///
/// # Arguments
/// * The global static `XBeeDriver`
///
/// # Returns
/// * `None` when no driver is set up or no cycle was due, otherwise the cycle result
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER1_COMPA() {
///     let _ = global_sample_tick(&XBEE_DRIVER);
/// }
/// ```
pub fn global_sample_tick<RADIO, DIAG, SENSOR>(
    global_driver: &'static GlobalXBeeDriver<RADIO, DIAG, SENSOR>,
) -> Option<Result<usize, DriverError<RADIO::Error>>>
where
    RADIO: Write<u8>,
    DIAG: Write<u8>,
    SENSOR: SensorSource,
{
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .and_then(|driver| driver.tick())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use embedded_hal_mock::eh1::serial::{Mock as SerialMock, Transaction as SerialTransaction};

    type TestDriver = GlobalXBeeDriver<SerialMock<u8>, SerialMock<u8>, fn() -> f32>;

    static UNSET_DRIVER: TestDriver = global_driver_init();
    static XBEE_DRIVER: TestDriver = global_driver_init();

    fn full_reading() -> f32 {
        1.0
    }

    #[test]
    fn test_tick_without_driver_is_noop() {
        assert!(global_sample_tick(&UNSET_DRIVER).is_none());
    }

    #[test]
    fn test_global_tick_runs_cycle() {
        let frame = Frame::encode(b"1023").unwrap();
        let radio = SerialMock::new(&[
            SerialTransaction::write_many(frame.as_bytes()),
            SerialTransaction::flush(),
        ]);
        global_driver_setup(
            &XBEE_DRIVER,
            radio,
            None,
            full_reading,
            2,
            None,
        );

        assert!(global_sample_tick(&XBEE_DRIVER).is_none());
        assert_eq!(global_sample_tick(&XBEE_DRIVER), Some(Ok(22)));

        let mut driver = critical_section::with(|cs| XBEE_DRIVER.borrow(cs).take()).unwrap();
        assert_eq!(driver.tx_good, 1);
        driver.radio.done();
    }
}
