//!
//! knox-std-core - Core Runtime Types
//!
//! This crate provides the types shared across all knox standard library crates:
//!
//! - `KnoxString` for owned, length-tracked byte sequences
//! - `KnoxError` and the crate-wide `Result` alias
//! - `RuntimeConfig` for seeding and other runtime settings
//!
//! Allocation is always fallible here: every constructor that grows a buffer
//! reserves memory up front and reports exhaustion as
//! `KnoxError::AllocationFailed` instead of aborting.
//!

pub mod bytes;
pub mod config;
pub mod error;

pub use bytes::*;
pub use config::*;
pub use error::*;
