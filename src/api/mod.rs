//! Application-facing API
//!
//! This module provides the positioning client and the handler types an
//! application uses to talk to the native SDK through the bridge.

pub mod client;
pub mod types;

pub use client::PositioningClient;
pub use types::PositioningHandlers;
