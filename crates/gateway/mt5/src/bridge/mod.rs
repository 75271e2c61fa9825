//! HTTP client for the MetaTrader 5 terminal bridge.
//!
//! The bridge runs next to the terminal and exposes each native call as a
//! `POST /api/<call>` JSON route. This module provides the `Terminal`
//! implementation that speaks to it.

pub mod client;
pub mod models;

pub use client::Mt5BridgeClient;
pub use models::*;
