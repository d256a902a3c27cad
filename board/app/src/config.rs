use core::time::Duration;

use math::{sensor::adc_to_volt, Resolution, SensorCalibration};
use sampler::{RetryPolicy, SamplerConfig};

include!(concat!(env!("OUT_DIR"), "/config.rs"));

pub fn sensor_calibration() -> SensorCalibration {
    SensorCalibration::with_cal_temp(
        SENSOR_V_CAL,
        SENSOR_CAL_TEMP,
        SENSOR_AVG_SLOPE,
        adc_to_volt(ADC_VREF, Resolution::BITS12),
    )
}

pub fn sampler_config() -> SamplerConfig {
    let calibration_retry = match CALIBRATION_ATTEMPTS {
        0 => RetryPolicy::Forever,
        attempts => RetryPolicy::Limited(attempts),
    };
    SamplerConfig::new(Duration::from_millis(CONVERSION_TIMEOUT_MS), calibration_retry)
}
