use anyhow::{Context, anyhow};
use clap::Parser;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use cathode::cli::{Args, handle_list_integrators, load_and_apply_config};
use cathode::config::SimulationConfig;
use cathode::output;
use cathode::prelude::*;

/// Sink for animated runs: logs each particle as it reaches a terminal
/// state, so step-by-step progress is visible without a plot attached.
struct AnimationLog;

impl TrajectorySink for AnimationLog {
    fn sample(&mut self, _particle: usize, _n: usize, _sample: &TrajectorySample, _t: Scalar) {}

    fn finished(&mut self, particle: usize, hit_detector: bool, final_time: Scalar) {
        if hit_detector {
            debug!("particle {particle} hit the detector at t = {final_time:.3e}");
        } else {
            debug!("particle {particle} finished at t = {final_time:.3e}");
        }
    }
}

fn build_ensemble(config: &SimulationConfig) -> anyhow::Result<ParticleEnsemble> {
    let [nx, ny] = config.field.resolution;
    let field = Arc::new(config.field.profile.build(nx, ny));
    let physical_size = Vector::new(config.field.physical_size[0], config.field.physical_size[1]);

    let integrator = IntegratorRegistry::default()
        .create(&config.physics.integrator.integrator_type)
        .map_err(|e| anyhow!(e))?;
    info!(
        "integrator: {} (order {})",
        integrator.name(),
        integrator.convergence_order()
    );

    let mut rng = SharedRng::from_optional_seed(config.physics.initial_seed);
    if let Some(seed) = config.physics.initial_seed {
        info!("random seed: {seed}");
    }

    Ok(ParticleEnsemble::new(
        config.physics.particle_count,
        field,
        physical_size,
        integrator,
        config.physics.step_size,
        config.physics.max_iterations,
        &mut rng,
    ))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.list_integrators {
        handle_list_integrators();
        return Ok(());
    }

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!(
        "cathode {} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );

    let config = load_and_apply_config(&args)?;
    info!(
        "simulating {} particles, h = {:.1e}, budget {} steps",
        config.physics.particle_count, config.physics.step_size, config.physics.max_iterations
    );

    let mut ensemble = build_ensemble(&config)?;

    if args.animate {
        // Incremental mode: one tick per iteration index across the whole
        // population, observation hooks active
        let mut sink = AnimationLog;
        for n in 0..config.physics.max_iterations.saturating_sub(1) {
            ensemble.advance_all_observed(n, &mut sink);
            if ensemble.particles().iter().all(Particle::is_terminal) {
                break;
            }
        }
    } else {
        let progress = LogProgress::new(config.physics.particle_count);
        ensemble.run_to_completion(&progress);
    }

    let hits = ensemble.hit_count();
    let exited = ensemble.exited_count();
    let exhausted = ensemble.exhausted_count();
    info!(
        "done: {hits} detector hits, {exited} exited the domain, {exhausted} ran out of budget"
    );
    if exhausted > 0 {
        log::warn!(
            "{exhausted} trajectories are inconclusive; consider a larger --max-iterations"
        );
    }

    let out_dir = Path::new(&args.output);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    if !args.no_trajectories {
        let path = out_dir.join("trajectories.jsonl");
        output::write_trajectories(&ensemble, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    let summary_path = out_dir.join("summary.jsonl");
    output::write_summary(&ensemble, &summary_path)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    let hits_path = out_dir.join("detector_hits.jsonl");
    output::write_detector_hits(&ensemble, &hits_path)
        .with_context(|| format!("writing {}", hits_path.display()))?;
    info!("wrote {} and {}", summary_path.display(), hits_path.display());

    Ok(())
}
