//! Data source for finboard
//!
//! Loads the records commands operate on from JSON, YAML or CSV files, or
//! supplies the built-in sample. Datasets are never written back.

pub mod dataset;
pub mod file_io;
mod sample;

pub use dataset::{read_csv_transactions, Dataset};
pub use file_io::{read_json, write_json_atomic, DataFormat};
