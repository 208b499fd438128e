//! Core types for the indoor positioning domain

pub mod types;

pub use types::*;
