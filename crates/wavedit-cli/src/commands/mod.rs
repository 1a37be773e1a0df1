//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod edit;
pub mod filter;
pub mod info;
pub mod paste;
pub mod resample;
