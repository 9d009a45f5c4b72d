//! Address list processing logic.
//!
//! This module contains the network algorithms built on [`crate::models::Address`]:
//! - [`aggregate`] - summarize a list into the fewest covering networks
//! - [`split`] - divide a network into a given number of parts
//! - [`subnet`] / [`supernet`] - move between prefix lengths

mod aggregate;
mod split;

// Re-export public functions
pub use aggregate::aggregate;
pub use split::{split, subnet, sum_first_found, supernet};
