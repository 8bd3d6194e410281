//! Timer and tick-loop utilities for the XBee driver.
//!
//! Logic for scheduling sample cycles. This employs two approaches: an interrupt service
//! routine using `critical_section::with` (`timer-isr` feature), or a busy-loop delay timer
//! (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `ticks_per_sample` / `const_ticks_per_sample`: ticks between two sample cycles
//! - `run_sample_loop`: blocking driver loop for `DelayNs` (feature `delay-loop`)
//! - `global_sample_tick`: interrupt-based tick callback wrapper (feature `timer-isr`)
//!
//! Common prescalers at 16 MHz: (For use with `compute_ocr_value` and `const_ocr_value`)
//!
//! | PRESCALER | TIMER_COUNTS | Overflow Interval |
//! |-----------|--------------|-------------------|
//! |        64 |          250 |              1 ms |
//! |       256 |          125 |              2 ms |
//! |       256 |          250 |              4 ms |
//! |      1024 |          125 |              8 ms |
//! |      1024 |          250 |             16 ms |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

/// 1,000 microseconds = 1 millisecond
pub const MICROSECONDS_PER_MILLISECOND: u32 = 1_000;
/// 1,000,000 microseconds = 1 second
pub const MICROSECONDS_PER_SECOND: u64 = 1_000_000;

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 64, 256, 1024)
/// - `tick_ms`: desired tick interval in milliseconds (e.g., 16.0)
///
/// # Returns
/// - Timer counts per tick, rounded to the nearest integer and saturated to `u16`
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_ms: f32) -> u16 {
    let ticks_per_second = f_cpu as f64 / prescaler as f64;
    let counts = round(ticks_per_second * (tick_ms as f64) / 1_000.0);
    counts.clamp(0.0, u16::MAX as f64) as u16
}

/// Compile-time OCR value calculator
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 64, 256, 1024)
/// - `tick_us`: desired tick interval in microseconds (e.g., 16_000)
///
/// # Returns
/// - Timer counts per tick, truncated and saturated to `u16`. A zero prescaler
///   saturates, like [`compute_ocr_value`].
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_us: u32) -> u16 {
    if prescaler == 0 {
        return u16::MAX;
    }
    let counts = (f_cpu / prescaler) as u64 * tick_us as u64 / MICROSECONDS_PER_SECOND;
    if counts > u16::MAX as u64 {
        u16::MAX
    } else {
        counts as u16
    }
}

/// Compute how many ticks make up one sample interval
///
/// # Arguments
/// - `tick_ms`: tick interval in milliseconds (e.g., 16.0)
/// - `interval_ms`: time between two samples, e.g.
///   [`SAMPLE_INTERVAL_MS`](crate::consts::SAMPLE_INTERVAL_MS)
///
/// # Returns
/// - Number of ticks per sample (for initializing the `XBeeDriver`), at least 1
pub fn ticks_per_sample(tick_ms: f32, interval_ms: u32) -> u16 {
    if !(tick_ms > 0.0) {
        return 1;
    }
    let ticks = round(interval_ms as f64 / tick_ms as f64);
    ticks.clamp(1.0, u16::MAX as f64) as u16
}

/// Compile-time ticks per sample value
///
/// # Arguments
/// - `tick_us`: tick interval in microseconds (e.g., 16_000)
/// - `interval_ms`: time between two samples in milliseconds
///
/// # Returns
/// - Number of ticks per sample (for initializing the `XBeeDriver`), at least 1
pub const fn const_ticks_per_sample(tick_us: u32, interval_ms: u32) -> u16 {
    if tick_us == 0 {
        return 1;
    }
    let ticks = interval_ms as u64 * MICROSECONDS_PER_MILLISECOND as u64 / tick_us as u64;
    if ticks == 0 {
        1
    } else if ticks > u16::MAX as u64 {
        u16::MAX
    } else {
        ticks as u16
    }
}
