use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
Usage:
  thermistor-tool [sweep] [--step N] [--max N] [--circuit FILE] [--extrapolate]
  thermistor-tool generate FILE [--name IDENT]
  thermistor-tool help

sweep     print `adc, temperature` pairs from 0 to --max every --step codes
          (default 5), using the built-in table or one generated from
          --circuit; --max defaults to the table's full scale (1023 for the
          built-in table, `counts` for a circuit)
generate  print a Rust calibration table for the circuit described in FILE

Set RUST_LOG=debug for diagnostics on stderr.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    pub step: u16,
    /// last sample, `None` for the table's full scale
    pub max: Option<u16>,
    pub circuit: Option<PathBuf>,
    pub extrapolate: bool,
}

impl SweepConfig {
    pub fn last_sample(&self, full_scale: u16) -> u16 {
        self.max.unwrap_or(full_scale)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            step: 5,
            max: None,
            circuit: None,
            extrapolate: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Sweep(SweepConfig),
    Generate { circuit: PathBuf, name: String },
    Help,
}

/// Parses arguments following the program name.
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let head = args.peek().cloned();

    match head.as_deref() {
        Some("help" | "-h" | "--help") => Ok(Command::Help),
        Some("generate") => {
            args.next();
            parse_generate(args)
        }
        Some("sweep") => {
            args.next();
            parse_sweep(args)
        }
        _ => parse_sweep(args),
    }
}

fn parse_sweep(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut config = SweepConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--step" => config.step = number(&arg, args.next())?,
            "--max" => config.max = Some(number(&arg, args.next())?),
            "--circuit" => config.circuit = Some(value(&arg, args.next())?.into()),
            "--extrapolate" => config.extrapolate = true,
            other => bail!("unexpected argument `{other}`\n\n{USAGE}"),
        }
    }

    if config.step == 0 {
        bail!("--step must be at least 1");
    }

    Ok(Command::Sweep(config))
}

fn parse_generate(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut circuit = None;
    let mut name = String::from("THERMISTOR");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--name" => name = value(&arg, args.next())?,
            other if other.starts_with("--") => bail!("unexpected argument `{other}`\n\n{USAGE}"),
            path if circuit.is_none() => circuit = Some(PathBuf::from(path)),
            other => bail!("unexpected argument `{other}`\n\n{USAGE}"),
        }
    }

    let circuit = circuit.context("generate needs a circuit file")?;

    if !is_identifier(&name) {
        bail!("--name must be a Rust identifier, got `{name}`");
    }

    Ok(Command::Generate { circuit, name })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn value(flag: &str, value: Option<String>) -> Result<String> {
    value.with_context(|| format!("{flag} needs a value"))
}

fn number(flag: &str, raw: Option<String>) -> Result<u16> {
    let raw = value(flag, raw)?;
    raw.parse()
        .with_context(|| format!("{flag} expects a number from 0 to {}, got `{raw}`", u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn sweep_is_default() {
        assert_eq!(parse(args("")).unwrap(), Command::Sweep(SweepConfig::default()));
        assert_eq!(
            parse(args("sweep")).unwrap(),
            Command::Sweep(SweepConfig::default())
        );
    }

    #[test]
    fn sweep_options() {
        let command = parse(args("--step 1 --max 100 --circuit board.json --extrapolate")).unwrap();
        assert_eq!(
            command,
            Command::Sweep(SweepConfig {
                step: 1,
                max: Some(100),
                circuit: Some("board.json".into()),
                extrapolate: true,
            })
        );
    }

    #[test]
    fn sweep_rejects_bad_values() {
        assert!(parse(args("--step 0")).is_err());
        assert!(parse(args("--step")).is_err());
        assert!(parse(args("--max -1")).is_err());
        assert!(parse(args("--max 70000")).is_err());
        assert!(parse(args("--bogus")).is_err());
    }

    #[test]
    fn generate() {
        assert_eq!(
            parse(args("generate board.json")).unwrap(),
            Command::Generate {
                circuit: "board.json".into(),
                name: "THERMISTOR".into(),
            }
        );
        assert_eq!(
            parse(args("generate --name BED board.json")).unwrap(),
            Command::Generate {
                circuit: "board.json".into(),
                name: "BED".into(),
            }
        );
    }

    #[test]
    fn generate_needs_one_file() {
        assert!(parse(args("generate")).is_err());
        assert!(parse(args("generate a.json b.json")).is_err());
        assert!(parse(args("generate a.json --step 2")).is_err());
        assert!(parse(args("generate a.json --name 9LIVES")).is_err());
        assert!(parse(args("generate a.json --name bed-table")).is_err());
    }

    #[test]
    fn help() {
        assert_eq!(parse(args("--help")).unwrap(), Command::Help);
        assert_eq!(parse(args("help")).unwrap(), Command::Help);
    }
}
