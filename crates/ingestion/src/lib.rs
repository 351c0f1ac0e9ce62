//! Flat-file loading and saving for the OHLCV feature toolkit.
//!
//! This crate handles:
//! - Reading CSV files into typed tables
//! - Lenient timestamp parsing of file cells
//! - Writing tables back to CSV

pub mod timestamp;
pub mod csv_io;

pub use csv_io::{read_table, read_table_from_reader, write_table, write_table_to_writer};
pub use timestamp::{format_timestamp, parse_timestamp};
