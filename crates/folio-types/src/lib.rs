//! Foundation types for the folio terminal.
//!
//! This crate contains the host-agnostic types shared by the other folio
//! crates: input events, configuration, and error types.

pub mod config;
pub mod error;
pub mod input;
