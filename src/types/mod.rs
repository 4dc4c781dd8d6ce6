//! Core types for the contact schedule generator
//!
//! This module contains the entity/shift enumerations and the configuration
//! model shared by every other part of the crate.

pub mod config;
pub mod enums;

pub use config::{Capacities, CliArgs, ConfigError, ConfigValidationError, SimulationConfig};
pub use enums::{Category, CategoryPair, Shift};
