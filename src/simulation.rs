//! Simulation context: particles, clock, stepping and regeneration.
//!
//! A [`Simulation`] owns one generation: the immutable parameter bundle,
//! the particle list with their trace buffers, and the shared step clock.
//! The caller drives it with [`step`](Simulation::step), once per due
//! tick, and reads particle positions and traces back out for rendering.
//!
//! Everything is single-threaded and step-driven. Each particle's state
//! and buffer are exclusively owned and mutated only within its own slice
//! of a step; no particle reads another's state. Regeneration replaces
//! state wholesale and must be sequenced between ticks, never inside one.
//!
//! # Example
//!
//! ```ignore
//! use chaotic_attraction::prelude::*;
//!
//! let seed = Seed::random();
//! let params = Parameters::derive(&seed);
//! let mut sim = Simulation::generate(params);
//!
//! loop {
//!     sim.step();
//!     for particle in sim.particles() {
//!         draw(particle.position, particle.color, particle.trace().positions());
//!     }
//! }
//! ```

use crate::integrate;
use crate::params::Parameters;
use crate::spawn::InitialConditions;
use crate::trace::TraceBuffer;
use glam::{DVec3, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One flying particle.
///
/// Owns a mutable position, an assigned color and its trace buffer.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: DVec3,
    /// Assigned color, fixed for the particle's lifetime.
    pub color: Vec3,
    /// Index of `color` in the parameter bundle's particle color list.
    pub color_index: usize,
    trace: TraceBuffer,
}

impl Particle {
    /// The particle's recent-position history.
    #[inline]
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }
}

/// One generation of the attractor simulation.
pub struct Simulation {
    params: Parameters,
    particles: Vec<Particle>,
    /// Monotonic step counter shared by all particles.
    time: u64,
    /// Seed of every generation-time random draw. `reset` respawns from
    /// this same seed, so a reset run replays the original generation.
    rng_seed: u64,
    /// Stream for reposition draws, derived from `rng_seed`.
    rng: SmallRng,
}

impl Simulation {
    /// Generate a fresh simulation from a parameter bundle.
    ///
    /// Random draws (pattern resolution, per-generation layout values,
    /// per-particle perturbations) come from entropy. Use
    /// [`generate_seeded`](Self::generate_seeded) to pin them.
    pub fn generate(params: Parameters) -> Self {
        Self::generate_seeded(params, SmallRng::from_entropy().gen())
    }

    /// Generate with all random draws pinned to `rng_seed`.
    ///
    /// Two simulations generated from an identical bundle and identical
    /// `rng_seed` produce identical particles and identical trajectories.
    pub fn generate_seeded(params: Parameters, rng_seed: u64) -> Self {
        let particles = Self::spawn_all(&params, rng_seed);
        Self {
            params,
            particles,
            time: 0,
            rng_seed,
            rng: SmallRng::seed_from_u64(rng_seed),
        }
    }

    fn spawn_all(params: &Parameters, rng_seed: u64) -> Vec<Particle> {
        let mut init = InitialConditions::new(params, SmallRng::seed_from_u64(rng_seed));
        (0..params.particle_count)
            .map(|_| {
                let (color_index, color) = init.next_color();
                Particle {
                    position: init.initial_position(color_index),
                    color,
                    color_index,
                    trace: TraceBuffer::new(params.trail_capacity),
                }
            })
            .collect()
    }

    /// Advance the whole simulation by one discrete step.
    ///
    /// For every particle: record the current position in its trace,
    /// compute the next position with the bundle's integrator, then commit
    /// it. The shared clock advances once per call, after all particles.
    pub fn step(&mut self) {
        let system = self.params.system;
        let dt = self.params.dt;
        let method = self.params.integrator;

        for particle in &mut self.particles {
            particle.trace.push(particle.position);
            // Compute from the current state, then commit.
            let next = integrate::step(particle.position, &system, dt, method);
            particle.position = next;
        }
        self.time += 1;
    }

    /// Reposition in place: keep particle identities and colors, redraw
    /// every initial position with a fresh set of per-generation draws,
    /// clear all traces and zero the clock.
    pub fn reposition(&mut self) {
        let rng = SmallRng::seed_from_u64(self.rng.gen());
        let mut init = InitialConditions::new(&self.params, rng);
        for particle in &mut self.particles {
            particle.position = init.initial_position(particle.color_index);
            particle.trace.clear();
        }
        self.time = 0;
    }

    /// Full regeneration: replace every particle and buffer and zero the
    /// clock, replaying the original generation's random draws. Stepping
    /// `k` times after a reset reproduces the first `k` steps exactly.
    /// The parameter bundle is kept; swap the bundle by building a new
    /// `Simulation` instead.
    pub fn reset(&mut self) {
        self.particles = Self::spawn_all(&self.params, self.rng_seed);
        self.time = 0;
    }

    /// The generation's parameter bundle.
    #[inline]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// All particles, in spawn order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Steps taken since generation, reposition or reset.
    #[inline]
    pub fn time(&self) -> u64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    fn params() -> Parameters {
        Parameters::derive(&Seed::new("0000000000000000000000").unwrap())
    }

    #[test]
    fn test_generate_spawns_full_count() {
        let sim = Simulation::generate_seeded(params(), 1);
        assert_eq!(sim.particles().len(), sim.params().particle_count as usize);
        assert_eq!(sim.time(), 0);
    }

    #[test]
    fn test_colors_round_robin() {
        let sim = Simulation::generate_seeded(params(), 1);
        let step = sim.params().step;
        for (i, particle) in sim.particles().iter().enumerate() {
            assert_eq!(particle.color_index, i % step);
            assert_eq!(
                particle.color,
                sim.params().particle_colors[i % step]
            );
        }
    }

    #[test]
    fn test_step_records_pre_step_position() {
        let mut sim = Simulation::generate_seeded(params(), 2);
        let before: Vec<DVec3> = sim.particles().iter().map(|p| p.position).collect();
        sim.step();
        assert_eq!(sim.time(), 1);
        for (particle, start) in sim.particles().iter().zip(&before) {
            assert_eq!(particle.trace().positions(), &[*start]);
            assert_ne!(particle.position, *start);
        }
    }

    #[test]
    fn test_seeded_generations_are_identical() {
        let mut a = Simulation::generate_seeded(params(), 7);
        let mut b = Simulation::generate_seeded(params(), 7);
        for _ in 0..25 {
            a.step();
            b.step();
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.trace().positions(), pb.trace().positions());
        }
    }

    #[test]
    fn test_reposition_keeps_colors_and_clears() {
        let mut sim = Simulation::generate_seeded(params(), 3);
        for _ in 0..10 {
            sim.step();
        }
        let colors: Vec<Vec3> = sim.particles().iter().map(|p| p.color).collect();

        sim.reposition();
        assert_eq!(sim.time(), 0);
        for (particle, color) in sim.particles().iter().zip(&colors) {
            assert_eq!(particle.color, *color);
            assert!(particle.trace().is_empty());
        }
    }

    #[test]
    fn test_reset_replays_original_generation() {
        let mut sim = Simulation::generate_seeded(params(), 4);
        let initial: Vec<DVec3> = sim.particles().iter().map(|p| p.position).collect();
        for _ in 0..5 {
            sim.step();
        }

        sim.reset();
        assert_eq!(sim.time(), 0);
        assert_eq!(sim.particles().len(), sim.params().particle_count as usize);
        for (particle, start) in sim.particles().iter().zip(&initial) {
            assert_eq!(particle.position, *start);
            assert!(particle.trace().is_empty());
        }
    }

    #[test]
    fn test_reposition_draws_fresh_layout() {
        let mut sim = Simulation::generate_seeded(params(), 6);
        let initial: Vec<DVec3> = sim.particles().iter().map(|p| p.position).collect();
        sim.reposition();
        let moved: Vec<DVec3> = sim.particles().iter().map(|p| p.position).collect();
        assert_ne!(initial, moved);
    }

    #[test]
    fn test_trace_respects_capacity() {
        let mut sim = Simulation::generate_seeded(params(), 5);
        let capacity = sim.params().trail_capacity;
        for _ in 0..capacity + 10 {
            sim.step();
        }
        for particle in sim.particles() {
            assert_eq!(particle.trace().len(), capacity);
        }
    }
}
