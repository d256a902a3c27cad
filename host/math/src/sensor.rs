//! Linear model of an on-chip temperature sensor.
//!
//! The sensor output voltage falls linearly as the die warms up. Given the
//! voltage at a known calibration temperature and the average slope, the
//! temperature for a sampled voltage is
//!
//! ```text
//! T = (V_cal - V_sense) / Avg_Slope + T_cal
//! V_sense = raw * ADC_TO_VOLT
//! ```
//!
//! STM32F103 data-sheet, 5.3.19 "Temperature sensor characteristics" (Table 50)
//! and reference manual 11.10 "Temperature sensor".

use crate::sample::{RawSample, Resolution};
use measurements::Temperature;

const DEFAULT_CAL_TEMP: f32 = 25.0;
// 3.3 V reference at 12-bit resolution (2^12 = 4096)
const ADC_TO_VOLT_3V3_12BIT: f32 = 3.3 / 4096.0;

/// Calibration constants of a linear temperature sensor.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct SensorCalibration {
    /// sensor voltage at `cal_temp` [V]
    pub v_cal: f32,
    /// temperature `v_cal` was characterised at [°C]
    pub cal_temp: f32,
    /// slope of the voltage/temperature line [V/°C]
    pub avg_slope: f32,
    /// volts per LSB of the converter [V]
    pub adc_to_volt: f32,
}

impl SensorCalibration {
    /// Typical values of the STM32F1 series: V25 = 1.43 V,
    /// Avg_Slope = 4.3 mV/°C, 3.3 V reference at 12 bits.
    pub const STM32F1_TYPICAL: Self = Self {
        v_cal: 1.43,
        cal_temp: DEFAULT_CAL_TEMP,
        avg_slope: 4.3e-3,
        adc_to_volt: ADC_TO_VOLT_3V3_12BIT,
    };

    /// Typical values of the STM32F4 series: V25 = 0.76 V,
    /// Avg_Slope = 2.5 mV/°C.
    pub const STM32F4_TYPICAL: Self = Self {
        v_cal: 0.76,
        cal_temp: DEFAULT_CAL_TEMP,
        avg_slope: 2.5e-3,
        adc_to_volt: ADC_TO_VOLT_3V3_12BIT,
    };

    pub const fn new(v_cal: f32, avg_slope: f32, adc_to_volt: f32) -> Self {
        Self::with_cal_temp(v_cal, DEFAULT_CAL_TEMP, avg_slope, adc_to_volt)
    }

    pub const fn with_cal_temp(v_cal: f32, cal_temp: f32, avg_slope: f32, adc_to_volt: f32) -> Self {
        Self {
            v_cal,
            cal_temp,
            avg_slope,
            adc_to_volt,
        }
    }

    /// Derives the sensor line from two measured points, e.g. the factory
    /// TS_CAL1/TS_CAL2 values or a bench calibration.
    ///
    /// Returns `None` when the points do not describe a sensor whose voltage
    /// decreases with temperature.
    pub fn from_two_points(
        raw1: RawSample,
        temp1: Temperature,
        raw2: RawSample,
        temp2: Temperature,
        adc_to_volt: f32,
    ) -> Option<Self> {
        if raw1 == raw2 || temp1 == temp2 {
            return None;
        }
        let v1 = raw1.value() as f32 * adc_to_volt;
        let v2 = raw2.value() as f32 * adc_to_volt;
        let (t1, t2) = (temp1.as_celsius() as f32, temp2.as_celsius() as f32);
        let avg_slope = (v1 - v2) / (t2 - t1);
        if !(avg_slope > 0.0) || !avg_slope.is_finite() {
            return None;
        }
        Some(Self::with_cal_temp(v1, t1, avg_slope, adc_to_volt))
    }

    /// Sensor voltage of a sample [V].
    pub fn voltage(&self, raw: RawSample) -> f32 {
        raw.value() as f32 * self.adc_to_volt
    }

    /// Sensor temperature of a sample [°C], evaluated in single precision.
    /// Out-of-range samples give out-of-range temperatures; nothing is clamped.
    pub fn celsius(&self, raw: RawSample) -> f32 {
        let v_sense = self.voltage(raw);
        (self.v_cal - v_sense) / self.avg_slope + self.cal_temp
    }

    pub fn temperature(&self, raw: RawSample) -> Temperature {
        Temperature::from_celsius(self.celsius(raw) as f64)
    }
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self::STM32F1_TYPICAL
    }
}

/// Volts per LSB for a reference voltage and resolution.
pub fn adc_to_volt(vref: f32, resolution: Resolution) -> f32 {
    vref / resolution.steps() as f32
}
