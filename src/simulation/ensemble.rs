//! Ensemble orchestration over independent particle simulations
//!
//! A [`ParticleEnsemble`] owns a fixed-count collection of particles plus
//! the shared, read-only field and the step strategy. Particles never
//! couple to each other, so the batch solve distributes them across the
//! rayon thread pool with no synchronization beyond the immutable field.

use crate::physics::fields::PotentialField;
use crate::physics::integrators::Integrator;
use crate::physics::math::{Scalar, Vector};
use crate::resources::SharedRng;
use crate::simulation::particle::Particle;
use crate::simulation::sinks::{ProgressSink, TrajectorySink};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// One detector arrival: the y position on the plate and the flight time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetectorHit {
    pub y: Scalar,
    pub time: Scalar,
}

/// Fixed-size collection of independent electron simulations.
pub struct ParticleEnsemble {
    particles: Vec<Particle>,
    field: Arc<dyn PotentialField>,
    integrator: Box<dyn Integrator>,
    max_iterations: usize,
}

impl ParticleEnsemble {
    /// Eagerly create `count` particles, each sampling its own initial
    /// condition from `rng`. Runs are reproducible exactly when the caller
    /// seeds the RNG.
    pub fn new(
        count: usize,
        field: Arc<dyn PotentialField>,
        physical_size: Vector,
        integrator: Box<dyn Integrator>,
        h: Scalar,
        max_iterations: usize,
        rng: &mut SharedRng,
    ) -> Self {
        assert!(count > 0, "particle count must be positive");

        let particles = (0..count)
            .map(|_| Particle::new(rng, physical_size, h, max_iterations))
            .collect();

        Self {
            particles,
            field,
            integrator,
            max_iterations,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Batch mode: solve every particle to termination or budget, in
    /// parallel, reporting one progress tick per completed particle.
    pub fn run_to_completion(&mut self, progress: &dyn ProgressSink) {
        let field = &*self.field;
        let integrator = &*self.integrator;

        self.particles.par_iter_mut().for_each(|particle| {
            particle.solve(field, integrator);
            progress.tick();
        });

        progress.finish();
    }

    /// Incremental mode: advance every non-terminal particle exactly one
    /// step at iteration index `n`.
    pub fn advance_all(&mut self, n: usize) {
        let field = &*self.field;
        let integrator = &*self.integrator;

        for particle in &mut self.particles {
            particle.advance(n, field, integrator);
        }
    }

    /// Incremental mode with observation: newly written samples are emitted
    /// to `sink`, and a completion notification fires for each particle the
    /// moment it becomes terminal (or exhausts its budget).
    pub fn advance_all_observed(&mut self, n: usize, sink: &mut dyn TrajectorySink) {
        let field = &*self.field;
        let integrator = &*self.integrator;

        for (index, particle) in self.particles.iter_mut().enumerate() {
            if !particle.advance(n, field, integrator) {
                continue;
            }

            sink.sample(index, n + 1, particle.last_sample(), particle.final_time());

            if particle.is_terminal() || particle.exhausted() {
                sink.finished(index, particle.hit_detector(), particle.final_time());
            }
        }
    }

    /// Detector arrivals: y position and flight time per hit, in particle
    /// order. Source data for the detector histogram.
    pub fn detector_hits(&self) -> Vec<DetectorHit> {
        self.particles
            .iter()
            .filter(|p| p.hit_detector())
            .map(|p| DetectorHit {
                y: p.last_sample().position.y,
                time: p.final_time(),
            })
            .collect()
    }

    pub fn hit_count(&self) -> usize {
        self.particles.iter().filter(|p| p.hit_detector()).count()
    }

    pub fn exited_count(&self) -> usize {
        self.particles.iter().filter(|p| p.out_of_domain()).count()
    }

    /// Particles that ran out of budget while still in flight.
    pub fn exhausted_count(&self) -> usize {
        self.particles.iter().filter(|p| p.exhausted()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fields::FieldProfile;
    use crate::physics::integrators::ExplicitEuler;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProgress(AtomicUsize);

    impl ProgressSink for CountingProgress {
        fn tick(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn build_ensemble(count: usize, seed: u64) -> ParticleEnsemble {
        let field = Arc::new(FieldProfile::Constant { value: 0.0 }.build(16, 16));
        let mut rng = SharedRng::from_seed(seed);
        ParticleEnsemble::new(
            count,
            field,
            Vector::new(1.0, 1.0),
            Box::new(ExplicitEuler),
            0.01,
            1000,
            &mut rng,
        )
    }

    #[test]
    fn construction_creates_count_particles() {
        let ensemble = build_ensemble(17, 1);
        assert_eq!(ensemble.particles().len(), 17);
    }

    #[test]
    fn one_progress_tick_per_particle() {
        let mut ensemble = build_ensemble(32, 2);
        let progress = CountingProgress(AtomicUsize::new(0));

        ensemble.run_to_completion(&progress);
        assert_eq!(progress.0.load(Ordering::Relaxed), 32);
    }

    #[test]
    fn advance_all_skips_terminal_particles() {
        let mut ensemble = build_ensemble(8, 3);

        // Zero field, fast particles: everything exits within a few steps
        let mut progress = 0;
        for n in 0..999 {
            ensemble.advance_all(n);
            progress = n;
            if ensemble.particles().iter().all(Particle::is_terminal) {
                break;
            }
        }
        assert!(progress < 998, "zero-field particles should all exit early");

        let lengths: Vec<usize> = ensemble.particles().iter().map(Particle::len).collect();

        // Further ticks must not move anything
        for n in 0..999 {
            ensemble.advance_all(n);
        }
        let after: Vec<usize> = ensemble.particles().iter().map(Particle::len).collect();
        assert_eq!(lengths, after);
    }

    #[test]
    fn observed_advance_reports_each_completion_once() {
        struct Recorder {
            samples: usize,
            finished: Vec<usize>,
        }

        impl TrajectorySink for Recorder {
            fn sample(
                &mut self,
                _particle: usize,
                _n: usize,
                _sample: &crate::simulation::particle::TrajectorySample,
                _t: Scalar,
            ) {
                self.samples += 1;
            }

            fn finished(&mut self, particle: usize, _hit: bool, _t: Scalar) {
                self.finished.push(particle);
            }
        }

        let mut ensemble = build_ensemble(8, 4);
        let mut recorder = Recorder {
            samples: 0,
            finished: Vec::new(),
        };

        for n in 0..999 {
            ensemble.advance_all_observed(n, &mut recorder);
        }

        assert!(recorder.samples > 0);
        let mut finished = recorder.finished.clone();
        finished.sort_unstable();
        finished.dedup();
        assert_eq!(
            finished.len(),
            recorder.finished.len(),
            "each particle finishes exactly once"
        );
        assert_eq!(finished, (0..8).collect::<Vec<_>>());
    }
}
