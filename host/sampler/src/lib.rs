//! Temperature acquisition loop for an on-chip sensor behind a polled ADC.
//!
//! The sampler owns the converter, calibrates it once and then repeats
//! start → wait → read → convert → stop → report until cancelled.

#![cfg_attr(not(test), no_std)]

pub mod cancel;
pub mod config;
pub mod report;
pub mod retry;
pub mod sampler;

pub use cancel::CancelToken;
pub use config::SamplerConfig;
pub use report::TextReporter;
pub use retry::{retry, Exhausted, RetryPolicy, Retried};
pub use sampler::{Reading, SamplerError, SamplerState, SamplerStats, TemperatureSampler};
