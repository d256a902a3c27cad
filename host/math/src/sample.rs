#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Resolution {
    BITS12,
    BITS10,
    BITS8,
    BITS6,
}

impl Resolution {
    pub const fn bits(self) -> u32 {
        match self {
            Resolution::BITS12 => 12,
            Resolution::BITS10 => 10,
            Resolution::BITS8 => 8,
            Resolution::BITS6 => 6,
        }
    }

    // number of quantization steps, e.g. 4096 for 12 bits
    pub const fn steps(self) -> u32 {
        1 << self.bits()
    }

    pub const fn max_value(self) -> u16 {
        (self.steps() - 1) as u16
    }
}

impl From<Resolution> for u64 {
    fn from(value: Resolution) -> Self {
        value.steps() as u64
    }
}

/// Unconverted 12-bit output of one ADC conversion, in `[0, 4095]`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct RawSample(u16);

impl RawSample {
    pub const MAX: u16 = Resolution::BITS12.max_value();

    /// Returns `None` for values outside the 12-bit range.
    pub const fn new(value: u16) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        Some(Self(value))
    }

    /// Builds a sample from a right-aligned data register, dropping
    /// everything above bit 11.
    pub const fn from_register(bits: u32) -> Self {
        Self((bits & Self::MAX as u32) as u16)
    }

    /// Rescales a reading taken at a lower resolution to the 12-bit scale the
    /// temperature formula is expressed in.
    pub const fn rescale(value: u16, from: Resolution) -> Option<Self> {
        if value > from.max_value() {
            return None;
        }
        let shift = Resolution::BITS12.bits() - from.bits();
        Some(Self(value << shift))
    }

    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for RawSample {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl From<RawSample> for u16 {
    fn from(value: RawSample) -> Self {
        value.0
    }
}

impl core::fmt::Display for RawSample {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::write!(f, "{}", self.0)
    }
}
