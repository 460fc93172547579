//! Shared utilities for stockpulse
//!
//! This crate provides common functionality used across the stockpulse workspace:
//! tracing setup and environment helpers used by the binaries at startup.

pub mod env;
pub mod logging;

pub use env::{env_any, load_dotenv};
pub use logging::{init_json_tracing, init_tracing};
