//! Export module for couple-ledger
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: one file per table (spreadsheet-compatible)
//! - JSON: machine-readable full snapshot
//! - YAML: human-readable full snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_tables_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
