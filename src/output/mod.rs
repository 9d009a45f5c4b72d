//! Output formatting for addresses and network lists.
//!
//! This module handles turning addresses into text:
//! - [`text`] - dotted quad and colon-hex address rendering
//! - [`rle`] - run-length encoding used for `::` compression
//! - [`csv`] - aligned CSV-style network tables
//! - [`terminal`] - field formatting and colored terminal output

mod csv;
pub mod rle;
mod terminal;
pub mod text;

pub use csv::{format_header, format_row, network_print};
pub use terminal::{address_details, format_field, print_details, print_error};
