//! Configuration structures for the contact schedule generator
//!
//! This module contains the simulation configuration, the capacity constants
//! derived from it, and the validation logic that runs before any event is
//! generated.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{Category, CategoryPair, Shift};

/// Default output path for the generated event log.
pub const DEFAULT_OUTPUT_PATH: &str = "simulation_events.json";

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hospital-contact-sim",
    version,
    about = "Hospital Contact Simulator - Generates a contact/cleaning event schedule",
    long_about = "Generates a time-ordered log of contact interactions and well-cleaning \
operations across hospital shifts, sized so the schedule never exceeds the available \
pipette-tip budget. The resulting JSON log is consumed by the script compiler that \
drives the liquid handler.

EXAMPLES:
    # Run with default settings
    hospital-contact-sim

    # Use a configuration file
    hospital-contact-sim --config config.json

    # Reproducible three-day run
    hospital-contact-sim --days 3 --seed 42

    # Generate configuration template
    hospital-contact-sim --print-config > my-config.json

    # Validate configuration without generating anything
    hospital-contact-sim --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments override file settings."
    )]
    pub config: Option<String>,

    /// Output path for the generated event log
    #[arg(short, long, help = "Output path for the event log JSON file")]
    pub output: Option<String>,

    /// Number of days to simulate
    #[arg(long, help = "Number of days to simulate (default: 1)")]
    pub days: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating a schedule
    #[arg(long, help = "Validate configuration without generating a schedule")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Ordered shift list for each day
    pub shifts: Option<Vec<Shift>>,

    /// Length of one shift, in seconds
    pub shift_duration_secs: Option<u64>,

    /// Length of the end-of-shift cleaning window, in seconds
    pub end_of_shift_clean_secs: Option<u64>,

    /// Length of the end-of-day cleaning window, in seconds
    pub end_of_day_clean_secs: Option<u64>,

    /// Length of one day, in seconds
    pub day_duration_secs: Option<u64>,

    /// Number of days to simulate
    pub days: Option<usize>,

    /// Doctor wells allocated to each shift
    pub doctor_wells_per_shift: Option<usize>,

    /// Nurse wells allocated to each shift
    pub nurse_wells_per_shift: Option<usize>,

    /// Patient wells (shared across shifts)
    pub patient_well_count: Option<usize>,

    /// Equipment wells (shared across shifts)
    pub equipment_well_count: Option<usize>,

    /// Surface wells (shared across shifts)
    pub surface_well_count: Option<usize>,

    /// Small-volume tips per rack
    pub small_tips_per_rack: Option<usize>,

    /// Number of small-volume tip racks
    pub small_tip_racks: Option<usize>,

    /// Large-volume tips per rack
    pub large_tips_per_rack: Option<usize>,

    /// Number of large-volume tip racks
    pub large_tip_racks: Option<usize>,

    /// Relative interaction weights keyed by `source_target` pair name
    pub interaction_weights: Option<BTreeMap<String, f64>>,

    /// Relative cleaning weights keyed by category name
    pub cleaning_weights: Option<BTreeMap<String, f64>>,

    /// Base transfer volume in microliters
    pub transfer_base_ul: Option<f64>,

    /// Transfer volume spread multiplier in microliters
    pub transfer_spread_ul: Option<f64>,

    /// Base cleaning volume in microliters
    pub clean_base_ul: Option<f64>,

    /// Cleaning volume spread multiplier in microliters
    pub clean_spread_ul: Option<f64>,

    /// Standard deviation of the raw Gaussian draw
    pub gauss_sigma: Option<f64>,

    /// Lower clamp bound applied to the raw Gaussian draw
    pub gauss_clamp_min: Option<f64>,

    /// Upper clamp bound applied to the raw Gaussian draw
    pub gauss_clamp_max: Option<f64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output path for the generated event log
    pub output: Option<String>,
}

/// Configuration for a schedule generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ordered shift list for each day
    pub shifts: Vec<Shift>,

    /// Length of one shift, in seconds
    pub shift_duration_secs: u64,

    /// Length of the end-of-shift cleaning window, in seconds
    pub end_of_shift_clean_secs: u64,

    /// Length of the end-of-day cleaning window, in seconds
    pub end_of_day_clean_secs: u64,

    /// Length of one day, in seconds
    pub day_duration_secs: u64,

    /// Number of days to simulate
    pub days: usize,

    /// Doctor wells allocated to each shift
    pub doctor_wells_per_shift: usize,

    /// Nurse wells allocated to each shift
    pub nurse_wells_per_shift: usize,

    /// Patient wells (shared across shifts)
    pub patient_well_count: usize,

    /// Equipment wells (shared across shifts)
    pub equipment_well_count: usize,

    /// Surface wells (shared across shifts)
    pub surface_well_count: usize,

    /// Small-volume tips per rack
    pub small_tips_per_rack: usize,

    /// Number of small-volume tip racks
    pub small_tip_racks: usize,

    /// Large-volume tips per rack
    pub large_tips_per_rack: usize,

    /// Number of large-volume tip racks
    pub large_tip_racks: usize,

    /// Relative interaction weights keyed by `source_target` pair name.
    /// Weights are relative, not normalized probabilities.
    pub interaction_weights: BTreeMap<String, f64>,

    /// Relative cleaning weights keyed by category name. Recognized and
    /// validated for the fuller simulation models; this generator cleans
    /// exhaustively rather than by sampling.
    pub cleaning_weights: BTreeMap<String, f64>,

    /// Base transfer volume in microliters
    pub transfer_base_ul: f64,

    /// Transfer volume spread multiplier in microliters
    pub transfer_spread_ul: f64,

    /// Base cleaning volume in microliters
    pub clean_base_ul: f64,

    /// Cleaning volume spread multiplier in microliters
    pub clean_spread_ul: f64,

    /// Standard deviation of the raw Gaussian draw
    pub gauss_sigma: f64,

    /// Lower clamp bound applied to the raw Gaussian draw
    pub gauss_clamp_min: f64,

    /// Upper clamp bound applied to the raw Gaussian draw
    pub gauss_clamp_max: f64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output path for the generated event log
    pub output: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Shift list is empty
    #[error("Shift list must not be empty")]
    EmptyShiftList,

    /// Days count is invalid
    #[error("Days count must be greater than 0, got {0}")]
    InvalidDaysCount(usize),

    /// A duration field is zero
    #[error("Duration for {field} must be greater than 0 seconds")]
    ZeroDuration {
        /// Name of the zero duration field
        field: &'static str,
    },

    /// A well count is zero
    #[error("Well count for {field} must be greater than 0")]
    ZeroWellCount {
        /// Name of the zero well count field
        field: &'static str,
    },

    /// A probability table key does not name two known categories
    #[error("Malformed probability table key '{key}': {reason}")]
    MalformedTableKey {
        /// The offending key
        key: String,
        /// Why it failed to parse
        reason: String,
    },

    /// A probability table weight is negative or not finite
    #[error("Invalid weight for '{key}': {value} (must be finite and >= 0)")]
    InvalidWeight {
        /// The key carrying the invalid weight
        key: String,
        /// The invalid weight value
        value: f64,
    },

    /// Every interaction weight is zero, nothing can be sampled
    #[error("Interaction weights must not all be zero")]
    AllWeightsZero,

    /// Gaussian clamp bounds are inverted
    #[error("Gaussian clamp bounds are inverted: min {min} > max {max}")]
    InvertedClampBounds {
        /// Configured lower bound
        min: f64,
        /// Configured upper bound
        max: f64,
    },

    /// The cleaning reservation alone exceeds the small-tip capacity
    #[error(
        "Small-tip capacity {capacity} cannot cover the {reserved} tips reserved for cleaning"
    )]
    TipBudgetOvercommitted {
        /// Total small-tip capacity
        capacity: usize,
        /// Tips reserved for cleaning operations
        reserved: usize,
    },

    /// The configured day is shorter than its shifts plus cleaning windows
    #[error(
        "Day duration {day_secs}s is shorter than the {scheduled_secs}s of scheduled shift and cleaning time"
    )]
    DayTooShort {
        /// Configured day length in seconds
        day_secs: u64,
        /// Seconds consumed by shifts and cleaning windows
        scheduled_secs: u64,
    },
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shifts: vec![Shift::Morning, Shift::Afternoon, Shift::Night],
            shift_duration_secs: 6 * 3600 + 50 * 60,
            end_of_shift_clean_secs: 10 * 60,
            end_of_day_clean_secs: 10 * 60,
            day_duration_secs: 24 * 3600,
            days: 1,
            doctor_wells_per_shift: 6,
            nurse_wells_per_shift: 12,
            patient_well_count: 20,
            equipment_well_count: 20,
            surface_well_count: 60,
            small_tips_per_rack: 96,
            small_tip_racks: 5,
            large_tips_per_rack: 96,
            large_tip_racks: 1,
            interaction_weights: default_interaction_weights(),
            cleaning_weights: default_cleaning_weights(),
            transfer_base_ul: 5.0,
            transfer_spread_ul: 5.0,
            clean_base_ul: 35.0,
            clean_spread_ul: 10.0,
            gauss_sigma: 0.4,
            gauss_clamp_min: -1.0,
            gauss_clamp_max: 1.0,
            seed: None,
            output: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

fn default_interaction_weights() -> BTreeMap<String, f64> {
    [
        ("nurse_patient", 0.50),
        ("nurse_surface", 0.10),
        ("nurse_equipment", 0.20),
        ("nurse_doctor", 0.20),
        ("doctor_patient", 0.30),
        ("doctor_equipment", 0.15),
        ("doctor_surface", 0.05),
        ("doctor_nurse", 0.35),
        ("patient_equipment", 0.05),
        ("patient_surface", 0.10),
        ("patient_nurse", 0.25),
        ("patient_doctor", 0.60),
        ("equipment_surface", 0.05),
        ("equipment_nurse", 0.10),
        ("equipment_doctor", 0.15),
        ("equipment_patient", 0.20),
        ("surface_nurse", 0.10),
        ("surface_doctor", 0.15),
        ("surface_patient", 0.20),
        ("surface_equipment", 0.05),
    ]
    .into_iter()
    .map(|(key, weight)| (key.to_string(), weight))
    .collect()
}

fn default_cleaning_weights() -> BTreeMap<String, f64> {
    [
        ("nurse", 0.25),
        ("doctor", 0.30),
        ("patient", 0.10),
        ("equipment", 0.15),
        ("surface", 0.05),
    ]
    .into_iter()
    .map(|(key, weight)| (key.to_string(), weight))
    .collect()
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments, loading the config
    /// file first when one is given.
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = if let Some(config_path) = &args.config {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        Self::apply_cli_overrides(&mut config, args);
        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            shifts: file.shifts.unwrap_or(defaults.shifts),
            shift_duration_secs: file.shift_duration_secs.unwrap_or(defaults.shift_duration_secs),
            end_of_shift_clean_secs: file
                .end_of_shift_clean_secs
                .unwrap_or(defaults.end_of_shift_clean_secs),
            end_of_day_clean_secs: file
                .end_of_day_clean_secs
                .unwrap_or(defaults.end_of_day_clean_secs),
            day_duration_secs: file.day_duration_secs.unwrap_or(defaults.day_duration_secs),
            days: file.days.unwrap_or(defaults.days),
            doctor_wells_per_shift: file
                .doctor_wells_per_shift
                .unwrap_or(defaults.doctor_wells_per_shift),
            nurse_wells_per_shift: file
                .nurse_wells_per_shift
                .unwrap_or(defaults.nurse_wells_per_shift),
            patient_well_count: file.patient_well_count.unwrap_or(defaults.patient_well_count),
            equipment_well_count: file
                .equipment_well_count
                .unwrap_or(defaults.equipment_well_count),
            surface_well_count: file.surface_well_count.unwrap_or(defaults.surface_well_count),
            small_tips_per_rack: file.small_tips_per_rack.unwrap_or(defaults.small_tips_per_rack),
            small_tip_racks: file.small_tip_racks.unwrap_or(defaults.small_tip_racks),
            large_tips_per_rack: file.large_tips_per_rack.unwrap_or(defaults.large_tips_per_rack),
            large_tip_racks: file.large_tip_racks.unwrap_or(defaults.large_tip_racks),
            interaction_weights: file.interaction_weights.unwrap_or(defaults.interaction_weights),
            cleaning_weights: file.cleaning_weights.unwrap_or(defaults.cleaning_weights),
            transfer_base_ul: file.transfer_base_ul.unwrap_or(defaults.transfer_base_ul),
            transfer_spread_ul: file.transfer_spread_ul.unwrap_or(defaults.transfer_spread_ul),
            clean_base_ul: file.clean_base_ul.unwrap_or(defaults.clean_base_ul),
            clean_spread_ul: file.clean_spread_ul.unwrap_or(defaults.clean_spread_ul),
            gauss_sigma: file.gauss_sigma.unwrap_or(defaults.gauss_sigma),
            gauss_clamp_min: file.gauss_clamp_min.unwrap_or(defaults.gauss_clamp_min),
            gauss_clamp_max: file.gauss_clamp_max.unwrap_or(defaults.gauss_clamp_max),
            seed: file.seed.or(defaults.seed),
            output: file.output.unwrap_or(defaults.output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.output {
            config.output = value;
        }
        if let Some(value) = args.days {
            config.days = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
    }

    /// Print configuration as pretty JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters.
    ///
    /// Runs before generation begins; every failure here is fatal and
    /// nothing is written.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.shifts.is_empty() {
            return Err(ConfigValidationError::EmptyShiftList);
        }
        if self.days == 0 {
            return Err(ConfigValidationError::InvalidDaysCount(self.days));
        }

        for (field, secs) in [
            ("shift_duration_secs", self.shift_duration_secs),
            ("day_duration_secs", self.day_duration_secs),
        ] {
            if secs == 0 {
                return Err(ConfigValidationError::ZeroDuration { field });
            }
        }

        for (field, count) in [
            ("doctor_wells_per_shift", self.doctor_wells_per_shift),
            ("nurse_wells_per_shift", self.nurse_wells_per_shift),
            ("patient_well_count", self.patient_well_count),
            ("equipment_well_count", self.equipment_well_count),
            ("surface_well_count", self.surface_well_count),
        ] {
            if count == 0 {
                return Err(ConfigValidationError::ZeroWellCount { field });
            }
        }

        if self.gauss_clamp_min > self.gauss_clamp_max {
            return Err(ConfigValidationError::InvertedClampBounds {
                min: self.gauss_clamp_min,
                max: self.gauss_clamp_max,
            });
        }

        // Parse both tables once up front so malformed keys and invalid
        // weights surface here rather than mid-generation.
        let table = self.interaction_table()?;
        if table.iter().all(|(_, weight)| *weight == 0.0) {
            return Err(ConfigValidationError::AllWeightsZero);
        }
        self.cleaning_table()?;

        Ok(())
    }

    /// Parse the interaction weights into `(CategoryPair, weight)` entries.
    ///
    /// The BTreeMap key order makes the resulting entry order deterministic,
    /// which the sampler relies on for reproducible runs.
    pub fn interaction_table(&self) -> Result<Vec<(CategoryPair, f64)>, ConfigValidationError> {
        self.interaction_weights
            .iter()
            .map(|(key, &weight)| {
                let pair: CategoryPair = key.parse().map_err(|reason| {
                    ConfigValidationError::MalformedTableKey { key: key.clone(), reason }
                })?;
                check_weight(key, weight)?;
                Ok((pair, weight))
            })
            .collect()
    }

    /// Parse the cleaning weights into `(Category, weight)` entries.
    pub fn cleaning_table(&self) -> Result<Vec<(Category, f64)>, ConfigValidationError> {
        self.cleaning_weights
            .iter()
            .map(|(key, &weight)| {
                let category: Category = key.parse().map_err(|reason| {
                    ConfigValidationError::MalformedTableKey { key: key.clone(), reason }
                })?;
                check_weight(key, weight)?;
                Ok((category, weight))
            })
            .collect()
    }

    /// Length of one shift.
    pub fn shift_duration(&self) -> Duration {
        Duration::from_secs(self.shift_duration_secs)
    }

    /// Length of the end-of-shift cleaning window.
    pub fn end_of_shift_clean_duration(&self) -> Duration {
        Duration::from_secs(self.end_of_shift_clean_secs)
    }

    /// Length of the end-of-day cleaning window.
    pub fn end_of_day_clean_duration(&self) -> Duration {
        Duration::from_secs(self.end_of_day_clean_secs)
    }

    /// Length of one day.
    pub fn day_duration(&self) -> Duration {
        Duration::from_secs(self.day_duration_secs)
    }
}

fn check_weight(key: &str, weight: f64) -> Result<(), ConfigValidationError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ConfigValidationError::InvalidWeight { key: key.to_string(), value: weight });
    }
    Ok(())
}

/// Capacity constants derived from a validated [`SimulationConfig`].
///
/// All scheduling arithmetic flows from these values; deriving them is pure
/// and has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacities {
    /// Number of shifts per day
    pub shift_count: usize,
    /// Total doctor wells across all shifts
    pub doctor_well_count: usize,
    /// Total nurse wells across all shifts
    pub nurse_well_count: usize,
    /// Staff wells cleaned at the end of each shift
    pub end_of_shift_clean_count: usize,
    /// Equipment and surface wells cleaned at the end of each day
    pub end_of_day_clean_count: usize,
    /// Total cleaning operations over one day
    pub total_clean_count: usize,
    /// Total small-volume tips available per day
    pub small_tip_capacity: usize,
    /// Total large-volume tips available per day
    pub large_tip_capacity: usize,
    /// Interactions that fit in the small-tip budget after reserving two
    /// tips per cleaning operation
    pub max_interaction_count: usize,
    /// Interactions allocated to each shift. Integer division of
    /// `max_interaction_count`; the remainder is accepted slack.
    pub interactions_per_shift: usize,
    /// Seconds left in the day for restocking tips and taking samples
    pub manual_service_secs: u64,
}

impl Capacities {
    /// Derive all capacity constants from the configuration.
    pub fn derive(config: &SimulationConfig) -> Result<Self, ConfigValidationError> {
        if config.shifts.is_empty() {
            return Err(ConfigValidationError::EmptyShiftList);
        }
        let shift_count = config.shifts.len();

        let doctor_well_count = config.doctor_wells_per_shift * shift_count;
        let nurse_well_count = config.nurse_wells_per_shift * shift_count;

        let end_of_shift_clean_count = config.doctor_wells_per_shift + config.nurse_wells_per_shift;
        let end_of_day_clean_count = config.equipment_well_count + config.surface_well_count;
        let total_clean_count = end_of_shift_clean_count * shift_count + end_of_day_clean_count;

        let small_tip_capacity = config.small_tips_per_rack * config.small_tip_racks;
        let large_tip_capacity = config.large_tips_per_rack * config.large_tip_racks;

        // Two pipette tips are reserved for each cleaning operation.
        let clean_reservation = 2 * total_clean_count;
        let max_interaction_count = small_tip_capacity.checked_sub(clean_reservation).ok_or(
            ConfigValidationError::TipBudgetOvercommitted {
                capacity: small_tip_capacity,
                reserved: clean_reservation,
            },
        )?;

        let interactions_per_shift = max_interaction_count / shift_count;

        let scheduled_secs = config.end_of_day_clean_secs
            + shift_count as u64 * (config.shift_duration_secs + config.end_of_shift_clean_secs);
        let manual_service_secs = config.day_duration_secs.checked_sub(scheduled_secs).ok_or(
            ConfigValidationError::DayTooShort {
                day_secs: config.day_duration_secs,
                scheduled_secs,
            },
        )?;

        Ok(Self {
            shift_count,
            doctor_well_count,
            nurse_well_count,
            end_of_shift_clean_count,
            end_of_day_clean_count,
            total_clean_count,
            small_tip_capacity,
            large_tip_capacity,
            max_interaction_count,
            interactions_per_shift,
            manual_service_secs,
        })
    }
}
