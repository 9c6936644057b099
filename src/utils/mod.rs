//! Utility functions shared across the crate
pub mod csv;
pub mod io;

pub use io::IoError;
