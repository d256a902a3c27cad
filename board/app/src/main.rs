#![no_std]
#![no_main]

use app::config::{sampler_config, sensor_calibration, UART_BAUDRATE};
use app::{F1Adc, UartWriter, TEMPERATURE_SENSOR_CHANNEL};
use common::ChannelConfig;
use embassy_executor::Spawner;
use embassy_stm32::adc::SampleTime;
use embassy_stm32::usart::{self, UartTx};
use embassy_stm32::Config;
use embassy_time::{Duration, Timer};
use sampler::{CancelToken, TemperatureSampler, TextReporter};

use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "defmt-log")]
use defmt::{error, info};

static CANCEL: CancelToken = CancelToken::new();

async fn park() -> ! {
    loop {
        #[cfg(feature = "defmt-log")]
        info!("[MAIN LOOP] parked");
        Timer::after(Duration::from_secs(5)).await;
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Config::default());

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = UART_BAUDRATE;
    let tx = UartTx::new_blocking(p.USART2, p.PA2, uart_config)
        .expect("UART configuration not valid");

    let mut sampler = TemperatureSampler::new(
        F1Adc::new(p.ADC1),
        TextReporter::new(UartWriter::new(tx)),
        sensor_calibration(),
        sampler_config(),
    );

    let channel = ChannelConfig::new(TEMPERATURE_SENSOR_CHANNEL, SampleTime::CYCLES239_5);
    if let Err(_e) = sampler.start(&channel) {
        #[cfg(feature = "defmt-log")]
        error!("[MAIN] sampler start failed: {}", _e);
        park().await;
    }

    #[cfg(feature = "defmt-log")]
    info!("[MAIN] sampling");
    match sampler.run(&CANCEL).await {
        Ok(_stats) => {
            #[cfg(feature = "defmt-log")]
            info!("[MAIN] sampling stopped: {}", _stats);
        }
        Err(_e) => {
            #[cfg(feature = "defmt-log")]
            error!("[MAIN] sampling failed: {}", _e);
        }
    }

    #[cfg(feature = "defmt-log")]
    if sampler.reporter().dropped() > 0 {
        error!("[MAIN] {} reports lost on UART", sampler.reporter().dropped());
    }
    park().await
}
