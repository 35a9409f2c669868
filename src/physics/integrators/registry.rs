//! Registry pattern for dynamic integrator management
//!
//! The registry serves as a discovery and factory mechanism for integrators.
//! Each integrator is self-describing, providing its own name, aliases, and
//! convergence order; the registry queries this metadata to build lookup
//! tables for name resolution and instantiation.
//!
//! All shipped integrators are zero-sized types, so `clone_box()` just
//! creates a new Box allocation without any state copying.

use super::Integrator;
use std::collections::HashMap;

/// Registry for runtime integrator registration
///
/// Maintains instances of each integrator indexed by name (canonical and
/// aliases). When an integrator is requested, the registry creates a new
/// boxed instance via `clone_box()`.
pub struct IntegratorRegistry {
    /// Maps names (canonical and aliases) to integrator instances
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// Create an empty registry without any pre-registered integrators.
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Register all standard integrators.
    ///
    /// Returns self for method chaining.
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{
            ExplicitEuler, Heun, RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint,
            SymplecticEuler,
        };

        self.register_integrator(Box::new(ExplicitEuler));
        self.register_integrator(Box::new(SymplecticEuler));
        self.register_integrator(Box::new(Heun));
        self.register_integrator(Box::new(RungeKuttaSecondOrderMidpoint));
        self.register_integrator(Box::new(RungeKuttaFourthOrder));

        self
    }

    /// Register a single integrator.
    ///
    /// Returns self for method chaining.
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        let name = integrator.name();

        // Store the integrator with its canonical name
        self.integrators
            .insert(name.to_string(), integrator.clone_box());

        // Also store integrators for each alias
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>, String> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| {
                let available = self.list_available();
                format!(
                    "Unknown integrator: '{}'. Available integrators: {}",
                    name,
                    available.join(", ")
                )
            })
    }

    pub fn list_available(&self) -> Vec<String> {
        let mut canonical_names = std::collections::HashSet::new();

        for integrator in self.integrators.values() {
            canonical_names.insert(integrator.name().to_string());
        }

        let mut names: Vec<String> = canonical_names.into_iter().collect();
        names.sort();
        names
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = Vec::new();

        for (key, integrator) in &self.integrators {
            let canonical_name = integrator.name();
            if key != canonical_name {
                aliases.push((key.clone(), canonical_name.to_string()));
            }
        }

        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::integrators::AccelerationField;
    use crate::physics::math::{Scalar, Vector};

    #[derive(Debug, Clone)]
    struct TestIntegrator;

    impl Integrator for TestIntegrator {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(
            &self,
            _: Scalar,
            _: &mut Vector,
            _: &mut Vector,
            _: &dyn AccelerationField,
            _: Scalar,
        ) {
            // Minimal implementation for testing
        }

        fn convergence_order(&self) -> usize {
            2
        }

        fn name(&self) -> &'static str {
            "test"
        }

        fn aliases(&self) -> Vec<&'static str> {
            vec!["t", "test_alias"]
        }
    }

    #[test]
    fn registry_discovery() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegrator));

        let available = registry.list_available();
        assert_eq!(available, vec!["test".to_string()]);
    }

    #[test]
    fn alias_resolution() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegrator));

        let canonical = registry.create("test").unwrap();
        let via_alias = registry.create("t").unwrap();
        assert_eq!(canonical.name(), via_alias.name());
        assert_eq!(
            canonical.convergence_order(),
            via_alias.convergence_order()
        );

        let aliases = registry.list_aliases();
        let alias_map: HashMap<_, _> = aliases.into_iter().collect();
        assert_eq!(alias_map.get("t"), Some(&"test".to_string()));
        assert_eq!(alias_map.get("test_alias"), Some(&"test".to_string()));
    }

    #[test]
    fn unknown_integrator_error() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegrator));

        let result = registry.create("nonexistent");
        assert!(result.is_err());

        if let Err(error) = result {
            assert!(error.contains("Unknown integrator"));
            assert!(error.contains("test"));
        }
    }

    #[test]
    fn case_sensitivity() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegrator));

        assert!(registry.create("TEST").is_err());
        assert!(registry.create("test").is_ok());
    }

    #[test]
    fn standard_registry_all_creatable() {
        let registry = IntegratorRegistry::new().with_standard_integrators();

        assert!(
            !registry.list_available().is_empty(),
            "standard registry should have integrators"
        );

        for name in registry.list_available() {
            assert!(
                registry.create(&name).is_ok(),
                "failed to create integrator '{name}'"
            );
        }

        for (alias, canonical) in registry.list_aliases() {
            assert!(
                registry.create(&alias).is_ok(),
                "alias '{alias}' (-> '{canonical}') failed to resolve"
            );
        }
    }

    #[test]
    fn standard_registry_expected_names() {
        let registry = IntegratorRegistry::default();

        assert!(registry.create("explicit_euler").is_ok());
        assert!(registry.create("symplectic_euler").is_ok());
        assert!(registry.create("heun").is_ok());
        assert!(registry.create("rk2").is_ok());
        assert!(registry.create("rk4").is_ok());
    }
}
