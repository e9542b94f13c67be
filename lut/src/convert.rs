//! Table lookup with linear interpolation.
//!
//! Interpolated values are rounded half up: an exact `.5` goes toward
//! positive infinity, so the midpoint of `(100, 25)` and `(200, 20)` is `23`.

use crate::{
    fmt::debug_assert,
    table::Table,
    types::{Entry, Temperature},
};

/// Converts `sample` to a temperature, clamping outside the table.
///
/// Total over `i32`; the table invariants rule out a zero-width segment.
pub fn adc_to_temp(table: &Table<'_>, sample: i32) -> Temperature {
    let first = table.first();
    if sample <= i32::from(first.adc) {
        return first.temp;
    }

    let last = table.last();
    if sample >= i32::from(last.adc) {
        return last.temp;
    }

    let (lo, hi) = bracket(table.entries(), sample);

    // lies between lo.temp and hi.temp
    saturate(interpolate(lo, hi, sample))
}

/// Converts `sample`, extending the first and last segments beyond the table.
///
/// Error grows the further `sample` is from the calibrated range. Results
/// saturate at the bounds of [`Temperature`].
pub fn adc_to_temp_extrapolated(table: &Table<'_>, sample: i32) -> Temperature {
    let entries = table.entries();
    let n = entries.len();

    let (lo, hi) = if sample < i32::from(entries[0].adc) {
        (entries[0], entries[1])
    } else if sample >= i32::from(entries[n - 1].adc) {
        (entries[n - 2], entries[n - 1])
    } else {
        bracket(entries, sample)
    };

    saturate(interpolate(lo, hi, sample))
}

/// Adjacent pair with `lo.adc <= sample < hi.adc`.
///
/// `sample` must lie inside the table.
fn bracket(entries: &[Entry], sample: i32) -> (Entry, Entry) {
    let upper = entries.partition_point(|entry| i32::from(entry.adc) <= sample);
    debug_assert!(upper > 0 && upper < entries.len());

    (entries[upper - 1], entries[upper])
}

fn interpolate(lo: Entry, hi: Entry, sample: i32) -> i64 {
    let span = i64::from(hi.adc) - i64::from(lo.adc);
    let offset = i64::from(sample) - i64::from(lo.adc);
    let rise = i64::from(hi.temp) - i64::from(lo.temp);

    i64::from(lo.temp) + div_round_half_up(offset * rise, span)
}

/// `n / d` rounded half up. `d` must be positive.
const fn div_round_half_up(n: i64, d: i64) -> i64 {
    (2 * n + d).div_euclid(2 * d)
}

fn saturate(value: i64) -> Temperature {
    value.clamp(Temperature::MIN.into(), Temperature::MAX.into()) as Temperature
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: Table<'static> = Table::new(&[
        Entry::new(0, 100),
        Entry::new(512, 25),
        Entry::new(1023, -40),
    ]);

    const MIDPOINT: Table<'static> = Table::new(&[Entry::new(100, 25), Entry::new(200, 20)]);

    #[test]
    fn rounds_half_up() {
        assert_eq!(div_round_half_up(5, 2), 3);
        assert_eq!(div_round_half_up(-5, 2), -2);
        assert_eq!(div_round_half_up(4, 3), 1);
        assert_eq!(div_round_half_up(-4, 3), -1);
        assert_eq!(div_round_half_up(-5, 3), -2);
        assert_eq!(div_round_half_up(0, 7), 0);
    }

    #[test]
    fn midpoint() {
        // exact value 22.5
        assert_eq!(MIDPOINT.convert(150), 23);
    }

    #[test]
    fn boundary_scenario() {
        assert_eq!(BOUNDARY.convert(-5), 100);
        assert_eq!(BOUNDARY.convert(0), 100);
        // exact value 62.5
        assert_eq!(BOUNDARY.convert(256), 63);
        assert_eq!(BOUNDARY.convert(1023), -40);
        assert_eq!(BOUNDARY.convert(2000), -40);
    }

    #[test]
    fn total_over_i32() {
        assert_eq!(BOUNDARY.convert(i32::MIN), 100);
        assert_eq!(BOUNDARY.convert(-1), 100);
        assert_eq!(BOUNDARY.convert(i32::MAX), -40);
        assert_eq!(BOUNDARY.convert(u16::MAX), -40);
    }

    #[test]
    fn clamps() {
        for sample in -100..=0 {
            assert_eq!(BOUNDARY.convert(sample), 100);
        }
        for sample in 1023..=1200 {
            assert_eq!(BOUNDARY.convert(sample), -40);
        }
    }

    #[test]
    fn exact_at_sample_points() {
        for table in [BOUNDARY, MIDPOINT] {
            for entry in table.entries() {
                assert_eq!(table.convert(entry.adc), entry.temp);
            }
        }
    }

    #[test]
    fn descending_output_never_reverses() {
        let mut prev = BOUNDARY.convert(0);
        for sample in 1..=1023 {
            let temp = BOUNDARY.convert(sample);
            assert!(temp <= prev, "{sample}: {temp} > {prev}");
            prev = temp;
        }
    }

    #[test]
    fn bracket_picks_lower_entry_on_exact_match() {
        let (lo, hi) = bracket(BOUNDARY.entries(), 512);
        assert_eq!(lo, Entry::new(512, 25));
        assert_eq!(hi, Entry::new(1023, -40));

        let (lo, hi) = bracket(BOUNDARY.entries(), 511);
        assert_eq!(lo, Entry::new(0, 100));
        assert_eq!(hi, Entry::new(512, 25));
    }

    #[test]
    fn extrapolation_matches_inside_table() {
        for sample in 0..=1023 {
            assert_eq!(BOUNDARY.extrapolate(sample), BOUNDARY.convert(sample));
        }
    }

    #[test]
    fn extrapolation_follows_edge_slopes() {
        // 10 adc codes per degree past either end
        let entries = [Entry::new(100, 0), Entry::new(200, 10), Entry::new(300, 15)];
        let table = Table::new(&entries);
        assert_eq!(table.extrapolate(50), -5);
        assert_eq!(table.extrapolate(0), -10);
        // 20 codes per degree above
        assert_eq!(table.extrapolate(400), 20);
        assert_eq!(table.extrapolate(310), 16);
        // clamped variant stays put
        assert_eq!(table.convert(0), 0);
        assert_eq!(table.convert(400), 15);
    }

    #[test]
    fn extrapolation_saturates() {
        let entries = [Entry::new(10, 0), Entry::new(11, 1000)];
        let steep = Table::new(&entries);
        assert_eq!(steep.extrapolate(i32::MAX), Temperature::MAX);
        assert_eq!(steep.extrapolate(i32::MIN), Temperature::MIN);
    }
}
