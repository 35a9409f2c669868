//! JSON-lines result files for external plotting
//!
//! The simulation core only fills buffers; these helpers flatten them into
//! line-delimited JSON that downstream plotting scripts can stream. One
//! line per trajectory sample, and a separate file with one line per
//! detector arrival.

use crate::physics::math::Scalar;
use crate::simulation::ParticleEnsemble;
use anyhow::Result;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct SampleRecord {
    particle: usize,
    n: usize,
    t: Scalar,
    x: Scalar,
    y: Scalar,
    vx: Scalar,
    vy: Scalar,
}

#[derive(Serialize)]
struct ParticleSummary {
    particle: usize,
    steps: usize,
    hit_detector: bool,
    out_of_domain: bool,
    final_time: Scalar,
}

// Will delete the contents of the file if it already exists
fn create_writer(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(BufWriter::new(file))
}

/// Write every valid trajectory sample, one JSON object per line.
pub fn write_trajectories(ensemble: &ParticleEnsemble, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    for (particle, p) in ensemble.particles().iter().enumerate() {
        for (n, (sample, t)) in p.trajectory().iter().zip(p.times()).enumerate() {
            let record = SampleRecord {
                particle,
                n,
                t: *t,
                x: sample.position.x,
                y: sample.position.y,
                vx: sample.velocity.x,
                vy: sample.velocity.y,
            };
            let line = serde_json::to_string(&record)?;
            writeln!(writer, "{line}")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write one summary line per particle followed by nothing else; the
/// detector histogram plots straight from the hits file.
pub fn write_summary(ensemble: &ParticleEnsemble, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    for (particle, p) in ensemble.particles().iter().enumerate() {
        let record = ParticleSummary {
            particle,
            steps: p.len() - 1,
            hit_detector: p.hit_detector(),
            out_of_domain: p.out_of_domain(),
            final_time: p.final_time(),
        };
        let line = serde_json::to_string(&record)?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Write one line per detector arrival (y position on the plate and flight
/// time), the source data for the hit/energy histogram.
pub fn write_detector_hits(ensemble: &ParticleEnsemble, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    for hit in ensemble.detector_hits() {
        let line = serde_json::to_string(&hit)?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}
