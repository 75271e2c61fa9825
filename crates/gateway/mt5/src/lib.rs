#![doc = include_str!("../README.md")]

pub mod api;
pub mod bridge;
pub mod common;
pub mod config;
pub mod error;
pub mod gateway;
pub mod terminal;

pub use bridge::Mt5BridgeClient;
pub use common::*;
pub use config::Mt5GatewayConfig;
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use gateway::Mt5Gateway;
pub use terminal::Terminal;
