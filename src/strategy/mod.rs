//! Parsing strategies beyond the single-document entry points
//!
//! - parallel: batch parsing of independent documents (Rayon)

pub mod parallel;

pub use parallel::{map_all, parse_all};
