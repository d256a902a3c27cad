use measurements::Temperature;
use micromath::F32Ext;

/// Temperature in thousandths of a degree Celsius, rounded to nearest.
pub fn to_millicelsius(temperature: &Temperature) -> i32 {
    F32Ext::round(temperature.as_celsius() as f32 * 1000.0) as i32
}

/// Prints a temperature in degrees Celsius with exactly three decimals.
///
/// The digits come from the integer millidegrees, so no float formatting
/// code ends up in the firmware.
#[derive(Clone, Copy, Debug)]
pub struct FixedCelsius(pub Temperature);

impl core::fmt::Display for FixedCelsius {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let milli = to_millicelsius(&self.0);
        let sign = if milli < 0 { "-" } else { "" };
        let milli = milli.unsigned_abs();
        core::write!(f, "{}{}.{:03}", sign, milli / 1000, milli % 1000)
    }
}

#[cfg(feature = "defmt-log")]
impl defmt::Format for FixedCelsius {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{} C", self.0.as_celsius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celsius(value: f64) -> FixedCelsius {
        FixedCelsius(Temperature::from_celsius(value))
    }

    #[test]
    fn test_to_millicelsius() {
        assert_eq!(38103, to_millicelsius(&Temperature::from_celsius(38.10296)));
        assert_eq!(-409696, to_millicelsius(&Temperature::from_celsius(-409.69635)));
        assert_eq!(0, to_millicelsius(&Temperature::from_celsius(-0.0004)));
    }

    #[test]
    fn test_to_millicelsius_from_kelvin() {
        assert_eq!(26850, to_millicelsius(&Temperature::from_kelvin(300.0)));
    }

    #[test]
    fn test_display() {
        assert_eq!("357.558", celsius(357.5581).to_string());
        assert_eq!("38.103", celsius(38.10296).to_string());
        assert_eq!("-409.696", celsius(-409.69635).to_string());
        assert_eq!("-0.250", celsius(-0.25).to_string());
        assert_eq!("0.000", celsius(0.0).to_string());
        assert_eq!("25.005", celsius(25.005).to_string());
    }
}
