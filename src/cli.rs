//! Command line interface for cathode

use clap::Parser;
use std::fmt;

use crate::config::{IntegratorConfig, SimulationConfig};
use crate::physics::integrators::IntegratorRegistry;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// A numeric override was out of range
    InvalidOverride(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidOverride(msg) => write!(f, "Invalid override: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Cathode - electron trajectory simulation through a static potential field
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Number of particles to simulate (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub particles: Option<usize>,

    /// Integrator type (e.g., rk4, heun, symplectic_euler)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Random seed for initial-condition sampling
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Integration step size (overrides config file)
    #[arg(long, value_name = "DT")]
    pub step_size: Option<f64>,

    /// Iteration budget per particle (overrides config file)
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Directory for JSON-lines result files
    #[arg(short = 'o', long, value_name = "DIR", default_value = "out")]
    pub output: String,

    /// Skip writing per-sample trajectory files (summary and hits only)
    #[arg(long)]
    pub no_trajectories: bool,

    /// Step all particles one tick at a time instead of batch-solving
    #[arg(long)]
    pub animate: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new().with_standard_integrators();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line
/// overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        log::info!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::default()
    };

    if let Some(particle_count) = args.particles {
        if particle_count == 0 {
            return Err(CliError::InvalidOverride(
                "particle count must be positive".to_string(),
            ));
        }
        config.physics.particle_count = particle_count;
    }

    if let Some(integrator_type) = &args.integrator {
        // Validate integrator name against registry
        let registry = IntegratorRegistry::new().with_standard_integrators();
        registry
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        config.physics.integrator = IntegratorConfig {
            integrator_type: integrator_type.clone(),
        };
    }

    if let Some(seed) = args.seed {
        config.physics.initial_seed = Some(seed);
    }

    if let Some(step_size) = args.step_size {
        if step_size <= 0.0 {
            return Err(CliError::InvalidOverride(
                "step size must be positive".to_string(),
            ));
        }
        config.physics.step_size = step_size;
    }

    if let Some(max_iterations) = args.max_iterations {
        if max_iterations == 0 {
            return Err(CliError::InvalidOverride(
                "max iterations must be positive".to_string(),
            ));
        }
        config.physics.max_iterations = max_iterations;
    }

    Ok(config)
}
