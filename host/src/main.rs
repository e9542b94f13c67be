//! Host tool for thermistor calibration tables.
//!
//! ```bash
//! # print the built-in table's curve every 5 codes
//! thermistor-tool
//!
//! # curve of a table generated on the fly
//! thermistor-tool sweep --circuit board.json --step 1
//!
//! # emit a table for lut/src/utils/
//! thermistor-tool generate board.json --name BOARD
//! ```

mod cli;
mod render;
mod sweep;

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, info};
use thermistor_lut::{
    circuit::{CircuitConfig, ValidatedCircuit},
    utils::thermistor::{ADC_MAX, THERMISTOR},
    Table,
};

use cli::Command;

/// Capacity for generated tables.
const MAX_POINTS: usize = 256;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = cli::parse(std::env::args().skip(1))?;
    debug!("Running {:?}", command);

    let mut out = BufWriter::new(io::stdout().lock());

    match command {
        Command::Help => writeln!(out, "{}", cli::USAGE)?,
        Command::Sweep(config) => {
            let generated;
            let (table, full_scale) = match &config.circuit {
                Some(path) => {
                    let circuit = load_circuit(path)?;
                    generated = circuit.generate::<MAX_POINTS>()?;
                    (Table::try_new(&generated)?, circuit.full_scale())
                }
                None => (THERMISTOR, ADC_MAX),
            };

            let lines = sweep::run(&table, &config, full_scale, &mut out)?;
            info!("Swept {} samples over {} table entries.", lines, table.len());
        }
        Command::Generate { circuit: path, name } => {
            let circuit = load_circuit(&path)?;
            let entries = circuit
                .generate::<MAX_POINTS>()
                .with_context(|| format!("generating table for {}", path.display()))?;

            render::source(&circuit, &entries, &name, &path, &mut out)?;
        }
    }

    out.flush()?;

    Ok(())
}

fn load_circuit(path: &Path) -> Result<ValidatedCircuit> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: CircuitConfig =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    ValidatedCircuit::try_from(config).with_context(|| format!("checking {}", path.display()))
}
