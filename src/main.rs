// Hospital Contact Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/hospital-contact-sim
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/hospital-contact-sim --days 3 --seed 42 --verbose
// ```

use clap::Parser;
use hospital_contact_sim::schedule::LoggingConfig;
use hospital_contact_sim::types::{Capacities, CliArgs, SimulationConfig};
use hospital_contact_sim::{generate, Event};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Hospital Contact Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration and derive capacities
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }
    let caps = match Capacities::derive(&config) {
        Ok(caps) => caps,
        Err(e) => {
            error!("Capacity derivation failed: {}", e);
            process::exit(1);
        }
    };

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no schedule will be generated.");
        print_configuration_summary(&config, &caps);
        return;
    }

    print_startup_banner(&config, &caps);

    // Generate the schedule and persist it
    info!("Starting schedule generation");
    if let Err(e) = run_generation(&config) {
        error!("Schedule generation failed: {}", e);
        process::exit(1);
    }

    info!("Hospital Contact Simulator completed successfully");
}

/// Generate the timeline and write it to the configured output path
fn run_generation(config: &SimulationConfig) -> Result<(), String> {
    eprintln!("Generating events for {} day(s)...", config.days);
    let timeline =
        generate(config).map_err(|e| format!("Schedule generation failed: {}", e))?;

    timeline
        .write_json(&config.output)
        .map_err(|e| format!("Failed to write event log to '{}': {}", config.output, e))?;

    info!(
        events = timeline.len(),
        output = %config.output,
        "event log written"
    );
    print_generation_summary(&timeline, &config.output);
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig, caps: &Capacities) {
    eprintln!("Hospital Contact Simulator");
    eprintln!("==========================");
    eprintln!("A contact/cleaning schedule generator for transmission-risk experiments");
    eprintln!();

    print_configuration_summary(config, caps);
}

/// Print configuration summary with the derived schedule shape
fn print_configuration_summary(config: &SimulationConfig, caps: &Capacities) {
    let shift_with_clean_secs = config.shift_duration_secs + config.end_of_shift_clean_secs;

    eprintln!("Configuration:");
    eprintln!("  Days: {}", config.days);
    eprintln!("  Shifts per Day: {}", caps.shift_count);
    eprintln!(
        "  Shift Length (incl. cleaning): {}m",
        shift_with_clean_secs / 60
    );
    eprintln!(
        "  Wells: {} patient, {} doctor, {} nurse, {} equipment, {} surface",
        config.patient_well_count,
        caps.doctor_well_count,
        caps.nurse_well_count,
        config.equipment_well_count,
        config.surface_well_count
    );
    eprintln!(
        "  Tip Capacity: {} small, {} large",
        caps.small_tip_capacity, caps.large_tip_capacity
    );
    eprintln!("  Interactions per Day: {}", caps.max_interaction_count);
    eprintln!("  Interactions per Shift: {}", caps.interactions_per_shift);
    eprintln!(
        "  Manual Service Window: {}m per day",
        caps.manual_service_secs / 60
    );
    eprintln!("  Output: {}", config.output);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}

/// Print event counts for the finished run
fn print_generation_summary(
    timeline: &hospital_contact_sim::Timeline,
    output_path: &str,
) {
    let mut interactions = 0;
    let mut cleans = 0;
    for event in timeline.events() {
        match event {
            Event::Interaction { .. } => interactions += 1,
            Event::CleanWell { .. } => cleans += 1,
            _ => {}
        }
    }

    eprintln!("Generation complete!");
    eprintln!("  Total Events: {}", timeline.len());
    eprintln!("  Interactions: {}", interactions);
    eprintln!("  Cleaning Operations: {}", cleans);
    eprintln!("  Event log written to: {}", output_path);
}
