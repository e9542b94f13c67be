use core::ops::RangeInclusive;

#[cfg(feature = "defmt")]
use defmt::Format;

use crate::{
    convert,
    fmt::warn,
    types::{Entry, Sample, TableError, Temperature},
};

/// Borrowed calibration table, ordered by strictly increasing `adc`.
///
/// Built with [`Table::new`] in a `const` item, a malformed table is a
/// compile error. Tables that only exist at run time go through
/// [`Table::try_new`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct Table<'a> {
    entries: &'a [Entry],
}

impl<'a> Table<'a> {
    /// # Panics
    /// Panics if `entries` breaks the table invariants. In const context
    /// this fails the build instead.
    pub const fn new(entries: &'a [Entry]) -> Self {
        match Self::validate(entries) {
            Ok(()) => Self { entries },
            Err(TableError::TooShort) => panic!("calibration table needs at least two entries"),
            Err(TableError::NotIncreasing { .. }) => {
                panic!("calibration table adc values must strictly increase")
            }
        }
    }

    pub fn try_new(entries: &'a [Entry]) -> Result<Self, TableError> {
        if let Err(e) = Self::validate(entries) {
            warn!("Rejected calibration table: {}", e);

            return Err(e);
        }

        Ok(Self { entries })
    }

    /// Checks that there are at least two entries and that `adc` strictly increases.
    pub const fn validate(entries: &[Entry]) -> Result<(), TableError> {
        if entries.len() < 2 {
            return Err(TableError::TooShort);
        }

        let mut index = 1;
        while index < entries.len() {
            if entries[index].adc <= entries[index - 1].adc {
                return Err(TableError::NotIncreasing { index });
            }
            index += 1;
        }

        Ok(())
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<Entry> {
        self.entries.get(index).copied()
    }

    pub const fn entries(&self) -> &'a [Entry] {
        self.entries
    }

    pub const fn first(&self) -> Entry {
        self.entries[0]
    }

    pub const fn last(&self) -> Entry {
        self.entries[self.entries.len() - 1]
    }

    /// ADC codes covered by calibration data; samples outside are clamped.
    pub const fn adc_range(&self) -> RangeInclusive<Sample> {
        self.first().adc..=self.last().adc
    }

    /// Converts `sample`, clamping to the end entries outside [`Self::adc_range`].
    #[inline]
    pub fn convert(&self, sample: impl Into<i32>) -> Temperature {
        convert::adc_to_temp(self, sample.into())
    }

    /// Like [`Self::convert`], but continues the edge segments' slope past
    /// the ends of the table.
    #[inline]
    pub fn extrapolate(&self, sample: impl Into<i32>) -> Temperature {
        convert::adc_to_temp_extrapolated(self, sample.into())
    }
}
