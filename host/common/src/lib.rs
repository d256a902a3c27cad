#![cfg_attr(not(test), no_std)]

use core::time::Duration;

use math::measurements::Temperature;
use math::RawSample;

pub mod error;

pub use error::{CalibrationError, ConfigError, SampleError, TimeoutError};

/// The temperature sensor is the only member of a length-1 sequence.
pub const TEMPERATURE_SENSOR_RANK: u8 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct ChannelConfig<C, S> {
    pub channel: C,
    pub rank: u8,
    pub sample_time: S,
}

impl<C, S> ChannelConfig<C, S> {
    pub fn new(channel: C, sample_time: S) -> Self {
        Self {
            channel,
            rank: TEMPERATURE_SENSOR_RANK,
            sample_time,
        }
    }
}

/// `timeout` in whole microseconds, saturated at `max`.
///
/// Timer backends scale microseconds into ticks with plain `u64` math, so a
/// caller passes the largest value its tick rate can scale.
pub fn timeout_micros(timeout: Duration, max: u64) -> u64 {
    u64::try_from(timeout.as_micros()).map_or(max, |micros| micros.min(max))
}

/// A single-channel, software-triggered, polled converter.
///
/// A conversion goes through `start_conversion`, `wait_ready`, `read_value`
/// and `stop_conversion`, in that order. `read_value` is only meaningful
/// after `wait_ready` succeeded, and every started conversion has to be
/// stopped before the next one starts.
pub trait AdcDriver {
    type Channel: Copy;
    type SampleTime: Copy;

    fn configure(
        &mut self,
        config: &ChannelConfig<Self::Channel, Self::SampleTime>,
    ) -> Result<(), ConfigError>;

    fn calibrate(&mut self) -> Result<(), CalibrationError>;

    fn start_conversion(&mut self);

    /// Resolves once the result register holds a valid sample, or with
    /// `TimeoutError` after `timeout`.
    fn wait_ready(
        &mut self,
        timeout: Duration,
    ) -> impl core::future::Future<Output = Result<(), TimeoutError>>;

    fn read_value(&mut self) -> RawSample;

    fn stop_conversion(&mut self);
}

/// Sink for converted samples.
pub trait Reporter {
    fn report(&mut self, raw: RawSample, temperature: Temperature);

    fn report_error(&mut self, _error: SampleError) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, raw: RawSample, temperature: Temperature) {
        (**self).report(raw, temperature);
    }

    fn report_error(&mut self, error: SampleError) {
        (**self).report_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingReporter {
        reports: usize,
        errors: usize,
    }

    impl Reporter for CountingReporter {
        fn report(&mut self, _raw: RawSample, _temperature: Temperature) {
            self.reports += 1;
        }

        fn report_error(&mut self, _error: SampleError) {
            self.errors += 1;
        }
    }

    struct SilentReporter;

    impl Reporter for SilentReporter {
        fn report(&mut self, _raw: RawSample, _temperature: Temperature) {}
    }

    #[test]
    fn test_channel_config_default_rank() {
        let config = ChannelConfig::new(16u8, 239u16);
        assert_eq!(TEMPERATURE_SENSOR_RANK, config.rank);
        assert_eq!(16, config.channel);
        assert_eq!(239, config.sample_time);
    }

    #[test]
    fn test_timeout_micros() {
        assert_eq!(1_500, timeout_micros(Duration::from_micros(1_500), u64::MAX));
        assert_eq!(1_000_000_000_000, timeout_micros(Duration::from_millis(1_000_000_000), u64::MAX));
        assert_eq!(7, timeout_micros(Duration::from_secs(1), 7));
    }

    #[test]
    fn test_timeout_micros_saturates() {
        let max = u64::MAX / 32_768;
        assert_eq!(max, timeout_micros(Duration::MAX, max));
        assert_eq!(u64::MAX, timeout_micros(Duration::MAX, u64::MAX));
        assert_eq!(max, timeout_micros(Duration::from_millis(u64::MAX), max));
        // no overflow when a 32768 Hz timer scales the result
        assert!(timeout_micros(Duration::MAX, max).checked_mul(32_768).is_some());
    }

    fn emit<R: Reporter>(mut reporter: R) {
        reporter.report(RawSample::default(), Temperature::from_celsius(25.0));
        reporter.report_error(SampleError::ConversionTimeout {
            timeout: Duration::from_millis(1),
        });
    }

    #[test]
    fn test_reporter_through_reference() {
        let mut reporter = CountingReporter::default();
        emit(&mut reporter);
        assert_eq!(1, reporter.reports);
        assert_eq!(1, reporter.errors);
    }

    #[test]
    fn test_report_error_defaults_to_noop() {
        let mut reporter = SilentReporter;
        reporter.report_error(SampleError::ConversionTimeout {
            timeout: Duration::from_millis(1),
        });
    }
}
