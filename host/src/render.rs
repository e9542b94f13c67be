use std::{io::Write, path::Path};

use anyhow::Result;
use thermistor_lut::{circuit::ValidatedCircuit, Entry};

/// Writes `entries` as a `const` table item, expecting `Table` and `Entry` in
/// scope at the paste site.
pub fn source(
    circuit: &ValidatedCircuit,
    entries: &[Entry],
    name: &str,
    input: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let config = circuit.inner();

    writeln!(out, "// generated by thermistor-tool from {}", input.display())?;
    if !config.board.is_empty() {
        writeln!(out, "// board: {}", config.board)?;
    }
    if !config.thermistor.is_empty() {
        writeln!(out, "// thermistor: {}", config.thermistor)?;
    }
    writeln!(
        out,
        "// Tstart={} Tstop={} Tstep={} Tnominal={} Rnominal={} Rpulldown={} beta={} counts={}",
        config.t_start,
        config.t_stop,
        config.t_step,
        config.t_nominal,
        config.r_nominal,
        config.r_pulldown,
        config.beta,
        config.counts
    )?;
    writeln!(out, "pub const {name}: Table<'static> = Table::new(&[")?;
    for entry in entries {
        let ohms = circuit.resistance_at(entry.temp.into()).round();
        writeln!(
            out,
            "    Entry::new({}, {}), // R={ohms}",
            entry.adc, entry.temp
        )?;
    }
    writeln!(out, "]);")?;

    Ok(())
}
