use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

/// Raw converter code as read from the ADC.
pub type Sample = u16;
/// Temperature in whatever unit the table encodes.
pub type Temperature = i16;

/// One calibration point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct Entry {
    pub adc: Sample,
    pub temp: Temperature,
}

impl Entry {
    pub const fn new(adc: Sample, temp: Temperature) -> Self {
        Self { adc, temp }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum TableError {
    /// interpolation needs a bracketing pair
    TooShort,
    /// `entries[index].adc` does not exceed the previous entry's
    NotIncreasing { index: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("calibration table needs at least two entries"),
            Self::NotIncreasing { index } => write!(
                f,
                "calibration table adc values must strictly increase (entry {index})"
            ),
        }
    }
}

#[cfg(not(target_os = "none"))]
impl std::error::Error for TableError {}
