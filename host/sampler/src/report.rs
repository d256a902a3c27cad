use core::fmt::Write;

use common::{Reporter, SampleError};
use heapless::String;
use math::measurements::Temperature;
use math::{FixedCelsius, RawSample};

const LINE_LEN: usize = 64;

/// Prints every sample as
///
/// ```text
/// rawtemp: 1705
/// temp: 38.103
/// ```
///
/// Each report is formatted into a line buffer first and handed to the
/// writer in one piece. A failing writer never stops the sampler; the lost
/// reports are only counted.
pub struct TextReporter<W: Write> {
    writer: W,
    dropped: u32,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, dropped: 0 }
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, args: core::fmt::Arguments<'_>) {
        let mut line: String<LINE_LEN> = String::new();
        let res = line
            .write_fmt(args)
            .and_then(|_| self.writer.write_str(line.as_str()));
        if res.is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, raw: RawSample, temperature: Temperature) {
        self.emit(format_args!(
            "rawtemp: {}\ntemp: {}\n",
            raw,
            FixedCelsius(temperature)
        ));
    }

    fn report_error(&mut self, error: SampleError) {
        self.emit(format_args!("error: {}\n", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write_str(&mut self, _s: &str) -> core::fmt::Result {
            Err(core::fmt::Error)
        }
    }

    #[test]
    fn test_report_format() {
        let mut reporter = TextReporter::new(std::string::String::new());
        reporter.report(RawSample::new(1705).unwrap(), Temperature::from_celsius(38.10296));
        reporter.report(RawSample::new(4095).unwrap(), Temperature::from_celsius(-409.69635));
        assert_eq!(
            "rawtemp: 1705\ntemp: 38.103\nrawtemp: 4095\ntemp: -409.696\n",
            reporter.writer().as_str()
        );
        assert_eq!(0, reporter.dropped());
    }

    #[test]
    fn test_report_error_format() {
        let mut reporter = TextReporter::new(std::string::String::new());
        reporter.report_error(SampleError::ConversionTimeout {
            timeout: Duration::from_millis(10),
        });
        assert_eq!("error: conversion timed out after 10 ms\n", reporter.into_inner());
    }

    #[test]
    fn test_failing_writer_counts_drops() {
        let mut reporter = TextReporter::new(FailingWriter);
        reporter.report(RawSample::new(0).unwrap(), Temperature::from_celsius(357.558));
        reporter.report(RawSample::new(1).unwrap(), Temperature::from_celsius(357.371));
        assert_eq!(2, reporter.dropped());
    }

    #[test]
    fn test_heapless_writer() {
        let mut reporter = TextReporter::new(String::<32>::new());
        reporter.report(RawSample::new(2048).unwrap(), Temperature::from_celsius(-26.1628));
        assert_eq!("rawtemp: 2048\ntemp: -26.163\n", reporter.writer().as_str());
    }
}
