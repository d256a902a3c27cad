#![no_std]

use common::{
    timeout_micros, AdcDriver, CalibrationError, ChannelConfig, ConfigError, TimeoutError,
    TEMPERATURE_SENSOR_RANK,
};
use embassy_futures::yield_now;
use embassy_stm32::adc::SampleTime;
use embassy_stm32::mode::Blocking;
use embassy_stm32::pac::{ADC1, RCC};
use embassy_stm32::peripherals;
use embassy_stm32::usart::UartTx;
use embassy_time::{Duration, Instant, TICK_HZ};
use math::RawSample;

#[cfg(feature = "defmt-log")]
use defmt::{debug, warn};

pub mod config;

/// ADC1 input wired to the internal temperature sensor.
pub const TEMPERATURE_SENSOR_CHANNEL: u8 = 16;

// polls of CR2 before a calibration step counts as stuck
const CALIBRATION_POLL_LIMIT: u32 = 100_000;
// t_STAB after ADON, generous for 72 MHz
const POWER_UP_CYCLES: u32 = 100;
// EXTSEL value selecting the SWSTART bit as trigger
const EXTSEL_SWSTART: u8 = 7;
// largest timeout embassy-time can turn into ticks without overflowing
const MAX_TIMEOUT_MICROS: u64 = u64::MAX / TICK_HZ;

/// Polled, software-triggered single conversions on ADC1.
pub struct F1Adc {
    _adc: peripherals::ADC1,
}

impl F1Adc {
    pub fn new(adc: peripherals::ADC1) -> Self {
        RCC.apb2enr().modify(|w| w.set_adc1en(true));
        Self { _adc: adc }
    }

    fn power_up() {
        if !ADC1.cr2().read().adon() {
            ADC1.cr2().modify(|w| w.set_adon(true));
            cortex_m::asm::delay(POWER_UP_CYCLES);
        }
    }

    fn poll_cleared(bit: impl Fn() -> bool) -> bool {
        for _ in 0..CALIBRATION_POLL_LIMIT {
            if !bit() {
                return true;
            }
        }
        false
    }
}

impl AdcDriver for F1Adc {
    type Channel = u8;
    type SampleTime = SampleTime;

    fn configure(
        &mut self,
        config: &ChannelConfig<Self::Channel, Self::SampleTime>,
    ) -> Result<(), ConfigError> {
        if config.channel != TEMPERATURE_SENSOR_CHANNEL {
            return Err(ConfigError::UnsupportedChannel);
        }
        if config.rank != TEMPERATURE_SENSOR_RANK {
            return Err(ConfigError::UnsupportedRank(config.rank));
        }

        ADC1.cr1().modify(|w| {
            w.set_scan(false);
            w.set_discen(false);
        });
        ADC1.cr2().modify(|w| {
            w.set_tsvrefe(true);
            w.set_cont(false);
            w.set_extsel(EXTSEL_SWSTART);
            w.set_exttrig(true);
        });
        // channels 10..=17 live in SMPR1
        ADC1.smpr1()
            .modify(|w| w.set_smp((config.channel - 10) as usize, config.sample_time));
        ADC1.sqr1().modify(|w| w.set_l(0));
        ADC1.sqr3().modify(|w| w.set_sq(0, config.channel));

        #[cfg(feature = "defmt-log")]
        debug!("[ADC] channel {} configured", config.channel);
        Ok(())
    }

    fn calibrate(&mut self) -> Result<(), CalibrationError> {
        Self::power_up();

        ADC1.cr2().modify(|w| w.set_rstcal(true));
        if !Self::poll_cleared(|| ADC1.cr2().read().rstcal()) {
            #[cfg(feature = "defmt-log")]
            warn!("[ADC] calibration reset still pending");
            return Err(CalibrationError::InProgress);
        }

        ADC1.cr2().modify(|w| w.set_cal(true));
        if !Self::poll_cleared(|| ADC1.cr2().read().cal()) {
            return Err(CalibrationError::InProgress);
        }
        Ok(())
    }

    fn start_conversion(&mut self) {
        Self::power_up();
        ADC1.sr().modify(|w| w.set_eoc(false));
        ADC1.cr2().modify(|w| w.set_swstart(true));
    }

    async fn wait_ready(&mut self, timeout: core::time::Duration) -> Result<(), TimeoutError> {
        let timeout = Duration::from_micros(timeout_micros(timeout, MAX_TIMEOUT_MICROS));
        let deadline = Instant::now()
            .checked_add(timeout)
            .unwrap_or(Instant::MAX);
        loop {
            if ADC1.sr().read().eoc() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(TimeoutError);
            }
            yield_now().await;
        }
    }

    fn read_value(&mut self) -> RawSample {
        RawSample::from_register(ADC1.dr().read().0)
    }

    fn stop_conversion(&mut self) {
        ADC1.cr2().modify(|w| w.set_adon(false));
    }
}

/// Blocking console output on the USART TX half.
pub struct UartWriter<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> UartWriter<'d> {
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl core::fmt::Write for UartWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.tx
            .blocking_write(s.as_bytes())
            .map_err(|_| core::fmt::Error)
    }
}
