//! TOML-backed simulation configuration

use crate::physics::fields::FieldProfile;
use crate::physics::math::Scalar;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SimulationConfig {
    pub field: FieldConfig,
    pub physics: PhysicsConfig,
}

/// Potential field: grid resolution, real-world extent, and the analytic
/// profile sampled onto the grid.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FieldConfig {
    pub resolution: [usize; 2],
    /// Real-world (x, y) extents in meters that the unit square maps to
    pub physical_size: [Scalar; 2],
    pub profile: FieldProfile,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            resolution: [64, 64],
            physical_size: [1.0, 1.0],
            profile: FieldProfile::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PhysicsConfig {
    pub particle_count: usize,
    /// Integration step size in simulation time units
    pub step_size: Scalar,
    /// Upper bound on steps per particle; also the trajectory buffer size
    pub max_iterations: usize,
    pub integrator: IntegratorConfig,
    pub initial_seed: Option<u64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            step_size: 1e-9,
            max_iterations: 10_000,
            integrator: IntegratorConfig::default(),
            initial_seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IntegratorConfig {
    pub integrator_type: String,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            integrator_type: "rk4".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file
    /// doesn't exist or fails to parse
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {path}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {path} not found. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = SimulationConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.physics.particle_count, config.physics.particle_count);
        assert_eq!(parsed.field.resolution, config.field.resolution);
        assert_eq!(parsed.field.profile, config.field.profile);
    }

    #[test]
    fn profile_variants_parse() {
        let toml_text = r#"
            [field]
            resolution = [32, 32]
            physical_size = [0.5, 0.5]
            profile = { type = "ramp", amplitude = 2.0 }

            [physics]
            particle_count = 10
            step_size = 1e-9
            max_iterations = 100
            integrator = { integrator_type = "heun" }
        "#;

        let config: SimulationConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.field.profile, FieldProfile::Ramp { amplitude: 2.0 });
        assert_eq!(config.physics.integrator.integrator_type, "heun");
        assert_eq!(config.physics.initial_seed, None);
    }
}
