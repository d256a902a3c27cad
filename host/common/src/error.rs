use core::fmt::Display;
use core::time::Duration;

/// The peripheral refused the channel configuration. Fatal at startup.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum ConfigError {
    UnsupportedChannel,
    UnsupportedRank(u8),
    UnsupportedSampleTime,
    Rejected,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnsupportedChannel => core::write!(f, "unsupported channel"),
            ConfigError::UnsupportedRank(rank) => core::write!(f, "unsupported rank {}", rank),
            ConfigError::UnsupportedSampleTime => core::write!(f, "unsupported sample time"),
            ConfigError::Rejected => core::write!(f, "configuration rejected by peripheral"),
        }
    }
}

/// A self-calibration attempt did not complete. Callers retry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum CalibrationError {
    InProgress,
    Failed,
}

impl Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CalibrationError::InProgress => core::write!(f, "calibration still in progress"),
            CalibrationError::Failed => core::write!(f, "calibration failed"),
        }
    }
}

/// The conversion result did not become valid before the deadline.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct TimeoutError;

impl Display for TimeoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::write!(f, "timed out")
    }
}

/// Recoverable failure of a single sampling iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleError {
    ConversionTimeout { timeout: Duration },
}

impl Display for SampleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SampleError::ConversionTimeout { timeout } => {
                core::write!(f, "conversion timed out after {} ms", timeout.as_millis())
            }
        }
    }
}

#[cfg(feature = "defmt-log")]
impl defmt::Format for SampleError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SampleError::ConversionTimeout { timeout } => {
                defmt::write!(fmt, "conversion timed out after {} ms", timeout.as_millis() as u64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!("unsupported rank 3", ConfigError::UnsupportedRank(3).to_string());
        assert_eq!("calibration failed", CalibrationError::Failed.to_string());
        assert_eq!(
            "conversion timed out after 10 ms",
            SampleError::ConversionTimeout {
                timeout: Duration::from_millis(10)
            }
            .to_string()
        );
    }
}
