#![cfg_attr(target_os = "none", no_std)]

#[cfg(not(target_os = "none"))]
uniffi::setup_scaffolding!();

#[cfg(not(target_os = "none"))]
pub mod circuit;
pub mod convert;
mod fmt;
pub mod table;
pub mod types;
pub mod utils;

pub use table::Table;
pub use types::{Entry, Sample, TableError, Temperature};
