//! Core types and trait definitions for the dossier profile editor.
//!
//! This crate is deliberately free of terminal and runtime dependencies.
//! The other crates depend on it; it depends on nothing heavier than serde.

pub mod controller;
pub mod directory;
pub mod error;
pub mod user;

pub use error::{DirectoryError, Result, ValidationError};
