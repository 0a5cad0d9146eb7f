//! # Chaotic Attraction - seed-derived Lorenz attractor core
//!
//! Deterministic, seed-driven particle trajectories on the Lorenz system.
//!
//! An opaque hexadecimal seed selects every visual and physical parameter
//! of a generation: gradient, particle count, trail length, particle size,
//! background, time step, integrator, spatial starting pattern and the
//! `(sigma, rho, beta)` triple. Particles are then integrated step by step
//! and each keeps a fixed-capacity trail of its recent positions for the
//! renderer to draw as a polyline.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chaotic_attraction::prelude::*;
//!
//! let seed = Seed::new("a3f09c214d5e7b8812fe66")?;
//! let params = Parameters::derive(&seed);
//! let mut sim = Simulation::generate(params);
//! let mut timer = TickTimer::from_hz(30.0);
//!
//! // In your render loop:
//! for _ in 0..timer.poll() {
//!     sim.step();
//! }
//! for particle in sim.particles() {
//!     draw_sphere(particle.position, sim.params().particle_radius, particle.color);
//!     draw_polyline(particle.trace().positions(), particle.color);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Seeds
//!
//! Identical seeds always derive identical [`Parameters`]. The one
//! intentionally non-deterministic branch is the `Random` starting
//! pattern, which re-draws uniformly from the seven concrete patterns at
//! generation time; pin it (and all other random draws) with
//! [`Simulation::generate_seeded`].
//!
//! ### Patterns
//!
//! The eight [`Pattern`]s shape where particles start: a cloud, a single
//! cluster, one cluster per color, a ring, a near-origin clump, a plane,
//! radiating arms, or a random pick among those seven. Shared random
//! values (cloud radius, cluster anchors, arm directions) are drawn once
//! per generation so each pattern's structure is visible.
//!
//! ### Stepping
//!
//! One [`Simulation::step`] pushes every particle's position into its
//! [`TraceBuffer`] and advances it one time step with the selected
//! integrator (forward Euler or classical RK4). [`TickTimer`] decouples
//! stepping from the caller's frame rate.
//!
//! Rendering, cameras and scene management are external collaborators:
//! this crate only produces positions, traces, colors and the bundle's
//! visual constants.

pub mod error;
pub mod integrate;
pub mod palette;
pub mod params;
pub mod seed;
mod simulation;
pub mod spawn;
pub mod time;
mod trace;

pub use error::SeedError;
pub use glam::{DVec3, Vec3};
pub use integrate::{Integrator, LorenzSystem};
pub use params::{EquilibriumPoint, Parameters};
pub use seed::{AttributeRecord, Seed};
pub use simulation::{Particle, Simulation};
pub use spawn::{InitialConditions, Pattern};
pub use time::TickTimer;
pub use trace::TraceBuffer;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use chaotic_attraction::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SeedError;
    pub use crate::integrate::{Integrator, LorenzSystem};
    pub use crate::params::{EquilibriumPoint, Parameters};
    pub use crate::seed::{AttributeRecord, Seed};
    pub use crate::simulation::{Particle, Simulation};
    pub use crate::spawn::{InitialConditions, Pattern};
    pub use crate::time::TickTimer;
    pub use crate::trace::TraceBuffer;
    pub use crate::{DVec3, Vec3};
}
