#![cfg_attr(not(test), no_std)]

pub use measurements;

pub mod sample;
pub mod sensor;
pub mod temperature;

pub use sample::{RawSample, Resolution};
pub use sensor::SensorCalibration;
pub use temperature::FixedCelsius;
