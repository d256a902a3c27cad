use core::fmt::Display;

use common::{AdcDriver, ChannelConfig, ConfigError, Reporter, SampleError};
use math::measurements::Temperature;
use math::{RawSample, SensorCalibration};

#[cfg(feature = "defmt-log")]
use math::FixedCelsius;

#[cfg(feature = "defmt-log")]
use defmt::{debug, error, info, warn};

use crate::cancel::CancelToken;
use crate::config::SamplerConfig;
use crate::retry::{retry, Exhausted, Retried};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum SamplerState {
    Uninitialized,
    Calibrating,
    Idle,
    Converting,
    Reading,
    Reporting,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum SamplerError {
    /// The driver rejected the channel configuration.
    Config(ConfigError),
    /// A bounded calibration policy ran out of attempts.
    CalibrationExhausted { attempts: u32 },
    /// The operation is not allowed in the current state.
    InvalidState(SamplerState),
    /// A single iteration failed; the sampler is back in `Idle`.
    Sample(SampleError),
}

impl Display for SamplerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SamplerError::Config(e) => core::write!(f, "configuration failed: {}", e),
            SamplerError::CalibrationExhausted { attempts } => {
                core::write!(f, "calibration failed after {} attempts", attempts)
            }
            SamplerError::InvalidState(state) => core::write!(f, "invalid state: {:?}", state),
            SamplerError::Sample(e) => core::write!(f, "{}", e),
        }
    }
}

impl From<ConfigError> for SamplerError {
    fn from(value: ConfigError) -> Self {
        SamplerError::Config(value)
    }
}

impl From<SampleError> for SamplerError {
    fn from(value: SampleError) -> Self {
        SamplerError::Sample(value)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Reading {
    pub raw: RawSample,
    pub temperature: Temperature,
}

#[cfg(feature = "defmt-log")]
impl defmt::Format for Reading {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{} -> {}", self.raw, FixedCelsius(self.temperature))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct SamplerStats {
    pub calibration_attempts: u32,
    pub samples: u64,
    pub timeouts: u64,
}

/// Drives an [`AdcDriver`] through calibration and the sampling loop and
/// hands every converted sample to a [`Reporter`].
///
/// The sampler is the only owner of the driver, which keeps the
/// start → wait → read → stop order of each conversion intact.
pub struct TemperatureSampler<D: AdcDriver, R: Reporter> {
    driver: D,
    reporter: R,
    calibration: SensorCalibration,
    config: SamplerConfig,
    state: SamplerState,
    stats: SamplerStats,
}

impl<D: AdcDriver, R: Reporter> TemperatureSampler<D, R> {
    pub fn new(driver: D, reporter: R, calibration: SensorCalibration, config: SamplerConfig) -> Self {
        Self {
            driver,
            reporter,
            calibration,
            config,
            state: SamplerState::Uninitialized,
            stats: SamplerStats::default(),
        }
    }

    /// Configures the channel and calibrates the converter.
    ///
    /// A configuration error is fatal and leaves the sampler `Uninitialized`.
    /// Calibration is retried according to `config.calibration_retry`; with
    /// the default policy this blocks until the hardware reports success.
    /// When a bounded policy gives up the sampler is `Uninitialized` again
    /// and `start` may be called once more.
    pub fn start(
        &mut self,
        channel: &ChannelConfig<D::Channel, D::SampleTime>,
    ) -> Result<(), SamplerError> {
        if self.state != SamplerState::Uninitialized {
            return Err(SamplerError::InvalidState(self.state));
        }

        if let Err(e) = self.driver.configure(channel) {
            #[cfg(feature = "defmt-log")]
            error!("ADC configuration failed: {}", e);
            return Err(e.into());
        }

        self.state = SamplerState::Calibrating;
        let driver = &mut self.driver;
        let stats = &mut self.stats;
        let res = retry(self.config.calibration_retry, |attempt| {
            stats.calibration_attempts = attempt;
            let res = driver.calibrate();
            #[cfg(feature = "defmt-log")]
            if let Err(e) = &res {
                warn!("ADC calibration attempt {} failed: {}", attempt, e);
            }
            res
        });

        match res {
            Ok(Retried { attempts, .. }) => {
                #[cfg(feature = "defmt-log")]
                info!("ADC calibrated after {} attempt(s)", attempts);
                self.stats.calibration_attempts = attempts;
                self.state = SamplerState::Idle;
                Ok(())
            }
            Err(Exhausted { attempts, .. }) => {
                #[cfg(feature = "defmt-log")]
                error!("ADC calibration gave up after {} attempts", attempts);
                self.state = SamplerState::Uninitialized;
                Err(SamplerError::CalibrationExhausted { attempts })
            }
        }
    }

    /// Runs one conversion and reports its result.
    ///
    /// On timeout the conversion is stopped, the error is reported and the
    /// sampler goes back to `Idle` without reporting a sample.
    pub async fn sample_once(&mut self) -> Result<Reading, SamplerError> {
        // a previous iteration was dropped while waiting
        if self.state == SamplerState::Converting {
            self.driver.stop_conversion();
            self.state = SamplerState::Idle;
        }
        if self.state != SamplerState::Idle {
            return Err(SamplerError::InvalidState(self.state));
        }

        self.state = SamplerState::Converting;
        self.driver.start_conversion();
        let timeout = self.config.conversion_timeout;
        if self.driver.wait_ready(timeout).await.is_err() {
            self.driver.stop_conversion();
            self.state = SamplerState::Idle;
            self.stats.timeouts = self.stats.timeouts.saturating_add(1);
            let error = SampleError::ConversionTimeout { timeout };
            #[cfg(feature = "defmt-log")]
            warn!("{}", error);
            self.reporter.report_error(error);
            return Err(error.into());
        }

        self.state = SamplerState::Reading;
        let raw = self.driver.read_value();
        let temperature = self.calibration.temperature(raw);
        self.driver.stop_conversion();

        self.state = SamplerState::Reporting;
        #[cfg(feature = "defmt-log")]
        debug!("rawtemp: {} temp: {}", raw, FixedCelsius(temperature));
        self.reporter.report(raw, temperature);
        self.stats.samples = self.stats.samples.saturating_add(1);
        self.state = SamplerState::Idle;

        Ok(Reading { raw, temperature })
    }

    /// Samples until `cancel` is set. Timed out iterations are skipped.
    pub async fn run(&mut self, cancel: &CancelToken) -> Result<SamplerStats, SamplerError> {
        match self.state {
            SamplerState::Uninitialized | SamplerState::Calibrating => {
                return Err(SamplerError::InvalidState(self.state))
            }
            _ => {}
        }

        while !cancel.is_cancelled() {
            match self.sample_once().await {
                Ok(_) | Err(SamplerError::Sample(_)) => {}
                Err(e) => return Err(e),
            }
        }

        #[cfg(feature = "defmt-log")]
        info!("sampling cancelled: {}", self.stats);
        Ok(self.stats)
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn calibration(&self) -> SensorCalibration {
        self.calibration
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_parts(self) -> (D, R) {
        (self.driver, self.reporter)
    }
}
