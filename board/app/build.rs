use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

// keeps the timeout within what a 32768 Hz embassy-time tick can scale
const MAX_CONVERSION_TIMEOUT_MS: u64 = u64::MAX / 32_768 / 1_000;

mod external {
    use serde_derive::{Deserialize, Serialize};

    /* temperature sensor */
    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct SensorConfig {
        v_cal: f32,
        cal_temp: f32,
        avg_slope: f32,
        vref: f32,
    }

    impl SensorConfig {
        pub fn get_v_cal(&self) -> f32 {
            self.v_cal
        }
        pub fn get_cal_temp(&self) -> f32 {
            self.cal_temp
        }
        pub fn get_avg_slope(&self) -> f32 {
            self.avg_slope
        }
        pub fn get_vref(&self) -> f32 {
            self.vref
        }
    }

    /* ADC */
    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct AdcConfig {
        conversion_timeout_ms: u64,
        calibration_attempts: u32,
    }

    impl AdcConfig {
        pub fn get_conversion_timeout_ms(&self) -> u64 {
            self.conversion_timeout_ms
        }
        pub fn get_calibration_attempts(&self) -> u32 {
            self.calibration_attempts
        }
    }

    /* UART */
    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct UartConfig {
        baudrate: u32,
    }

    impl UartConfig {
        pub fn get_baudrate(&self) -> u32 {
            self.baudrate
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct MyConfig {
        pub sensor: SensorConfig,
        pub adc: AdcConfig,
        pub uart: UartConfig,
    }
}

fn main() {
    println!("cargo::rerun-if-changed=config/config.toml");
    let path = Path::new("config/config.toml");
    let conf = confy::load_path::<external::MyConfig>(path).expect("Error reading config file");

    let sensor_v_cal = conf.sensor.get_v_cal();
    let sensor_cal_temp = conf.sensor.get_cal_temp();
    let sensor_avg_slope = conf.sensor.get_avg_slope();
    let sensor_vref = conf.sensor.get_vref();
    let conversion_timeout_ms = conf.adc.get_conversion_timeout_ms();
    let calibration_attempts = conf.adc.get_calibration_attempts();
    let uart_baudrate = conf.uart.get_baudrate();

    if !(sensor_avg_slope > 0.0) {
        panic!("Sensor average slope must be positive");
    }
    if !(sensor_vref > 0.0) {
        panic!("ADC reference voltage must be positive");
    }
    if !sensor_v_cal.is_finite() || !sensor_cal_temp.is_finite() {
        panic!("Sensor calibration point must be finite");
    }
    if conversion_timeout_ms == 0 {
        panic!("ADC conversion timeout must be at least 1 ms");
    }
    if conversion_timeout_ms > MAX_CONVERSION_TIMEOUT_MS {
        panic!(
            "ADC conversion timeout must not exceed {} ms",
            MAX_CONVERSION_TIMEOUT_MS
        );
    }
    if uart_baudrate == 0 {
        panic!("UART baudrate is missing");
    }

    let string = format!(
        "
pub const SENSOR_V_CAL: f32 = {:?};
pub const SENSOR_CAL_TEMP: f32 = {:?};
pub const SENSOR_AVG_SLOPE: f32 = {:?};
pub const ADC_VREF: f32 = {:?};
pub const CONVERSION_TIMEOUT_MS: u64 = {};
pub const CALIBRATION_ATTEMPTS: u32 = {};
pub const UART_BAUDRATE: u32 = {};
",
        sensor_v_cal,
        sensor_cal_temp,
        sensor_avg_slope,
        sensor_vref,
        conversion_timeout_ms,
        calibration_attempts,
        uart_baudrate,
    );
    let out_dir = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let out_file = out_dir.join("config.rs").to_string_lossy().to_string();
    fs::write(&out_file, string.as_str()).unwrap();
}
