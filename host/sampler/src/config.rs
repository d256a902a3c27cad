use core::time::Duration;

use crate::retry::RetryPolicy;

// the polling timeout the vendor examples pass for "wait forever"
const DEFAULT_CONVERSION_TIMEOUT: Duration = Duration::from_millis(1_000_000);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SamplerConfig {
    /// How long a single conversion may take before the iteration is dropped.
    pub conversion_timeout: Duration,
    pub calibration_retry: RetryPolicy,
}

impl SamplerConfig {
    pub const fn new(conversion_timeout: Duration, calibration_retry: RetryPolicy) -> Self {
        Self {
            conversion_timeout,
            calibration_retry,
        }
    }

    pub const fn with_conversion_timeout(self, conversion_timeout: Duration) -> Self {
        Self {
            conversion_timeout,
            ..self
        }
    }

    pub const fn with_calibration_retry(self, calibration_retry: RetryPolicy) -> Self {
        Self {
            calibration_retry,
            ..self
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSION_TIMEOUT, RetryPolicy::Forever)
    }
}
