//! Timesheet Engine
//!
//! This crate turns clock punches (entry, exit and an optional lunch break)
//! into worked time, overtime and pay. Two calculators are provided: a
//! standard one (overtime at 1.5× beyond a daily baseline) and one that
//! applies Brazilian labor law (CLT) rules for capped overtime, Sunday and
//! holiday premiums, the night premium and mandatory breaks.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
