use crate::{table::Table, types::Entry};

/// Full-scale code of the 10-bit converter.
pub const ADC_MAX: u16 = 1023;

// precomputed for a 47k B4150 NTC (Sunlord SDNT2012X473F4150FTF)
// over a 47k pulldown, 1023 counts full scale
pub const THERMISTOR: Table<'static> = Table::new(&[
    Entry::new(223, 0),
    Entry::new(308, 8),
    Entry::new(402, 16),
    Entry::new(500, 24),
    Entry::new(593, 32),
    Entry::new(676, 40),
    Entry::new(747, 48),
    Entry::new(806, 56),
    Entry::new(853, 64),
    Entry::new(890, 72),
]);

#[cfg_attr(not(target_os = "none"), uniffi::export)]
pub fn adc_to_celsius(sample: u16) -> i16 {
    THERMISTOR.convert(sample)
}
