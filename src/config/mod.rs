//! Configuration loading and management for the Timesheet Engine.
//!
//! This module loads the standard and CLT policies plus the holiday calendar
//! from YAML files. Defaults match the statutory values, so the engine also
//! works with [`ConfigLoader::statutory`] and no files at all.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br-clt").unwrap();
//! println!("Holidays loaded: {}", config.config().holidays().len());
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::ServerConfig;
pub use types::{BreakRule, CltPolicy, EngineConfig, HolidayFile, StandardPolicy};
