//! Hospital Contact Simulator
//!
//! A discrete-event schedule generator that models contact-based
//! transmission risk in a hospital. It produces a time-ordered JSON log of
//! interaction and cleaning events among five entity categories (patients,
//! doctors, nurses, equipment, and surfaces), each category mapped onto a
//! block of wells on the lab plates the downstream liquid handler operates
//! on.
//!
//! # Overview
//!
//! The generator walks days, shifts within each day, and interactions
//! within each shift. Interaction pairs come from a weighted probability
//! table, wells from shift-aware plate layouts, and transfer volumes from a
//! clamped Gaussian. Staff wells rotate per shift and are cleaned as each
//! shift ends; shared equipment and surface plates are cleaned at the end
//! of each day. The whole schedule is sized up front so it never exceeds
//! the available pipette-tip budget.
//!
//! ## Quick Start
//!
//! ```rust
//! use hospital_contact_sim::{generate, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     days: 2,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let timeline = generate(&config)?;
//! println!("Generated {} events", timeline.len());
//! # Ok::<(), hospital_contact_sim::ScheduleError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Categories, shifts, configuration, and derived capacities
//! - [`wells`]: Shift-aware well range allocation on the lab plates
//! - [`sampling`]: Weighted pair sampling and clamped-Gaussian volumes
//! - [`events`]: The event model, timeline, and JSON persistence
//! - [`schedule`]: Day/shift schedule construction and tip budgeting
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod sampling;
pub mod schedule;
pub mod types;
pub mod wells;

// Core types and configuration
pub use types::{
    Capacities,
    Category,
    CategoryPair,
    CliArgs,
    ConfigError,
    ConfigValidationError,
    Shift,
    SimulationConfig,
};

// Well allocation
pub use wells::{PlateLayout, WellRange};

// Sampling
pub use sampling::{InteractionSampler, VolumeModel};

// Event model and persistence
pub use events::{CleanTargetInfo, Event, InteractionInfo, Timeline};

// Schedule construction
pub use schedule::{
    generate, LoggingConfig, ScheduleBuilder, ScheduleError, ScheduleResult, TipBudget,
};
