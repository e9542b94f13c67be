use std::io::Write;

use anyhow::Result;
use thermistor_lut::Table;

use crate::cli::SweepConfig;

/// Writes one `adc, temperature` line per step up to `--max`, or up to
/// `full_scale` without it. Returns the line count.
pub fn run(
    table: &Table<'_>,
    config: &SweepConfig,
    full_scale: u16,
    out: &mut impl Write,
) -> Result<usize> {
    let mut lines = 0;

    for adc in (0..=config.last_sample(full_scale)).step_by(config.step.into()) {
        let temp = if config.extrapolate {
            table.extrapolate(adc)
        } else {
            table.convert(adc)
        };

        writeln!(out, "{adc}, {temp}")?;
        lines += 1;
    }

    Ok(lines)
}
