//! Numerical integration of the Lorenz system.
//!
//! The governing equations are fixed:
//!
//! ```text
//! dx/dt = sigma * (y - x)
//! dy/dt = x * (rho - z) - y
//! dz/dt = x * y - beta * z
//! ```
//!
//! One call to [`step`] advances a single particle by one time step with
//! either the forward Euler method or classical fourth-order Runge-Kutta.
//! The system is chaotic: nearby trajectories diverge exponentially, so
//! both methods reproduce the classical coefficients exactly and nothing
//! here traps NaN or infinity. A runaway trajectory is a valid trajectory;
//! the rendering side decides what to do with it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// The three physical constants of the Lorenz system.
///
/// Constants are always selected as a triple from [`EQUATION_PARAMETERS`],
/// never mixed independently, so every reachable combination is a known
/// chaos-producing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzSystem {
    /// Prandtl number.
    pub sigma: f64,
    /// Rayleigh number.
    pub rho: f64,
    /// Geometric factor.
    pub beta: f64,
}

impl LorenzSystem {
    /// The classic 1963 Lorenz parameters.
    pub const CLASSIC: LorenzSystem = LorenzSystem {
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
    };

    /// Height of the attractor's two lobes: `rho - 1`.
    #[inline]
    pub fn zp(&self) -> f64 {
        self.rho - 1.0
    }

    /// The two nontrivial equilibrium points,
    /// `(±√(beta·(rho−1)), ±√(beta·(rho−1)), rho−1)`.
    pub fn equilibrium_points(&self) -> (DVec3, DVec3) {
        let xy = (self.beta * (self.rho - 1.0)).sqrt();
        let z = self.rho - 1.0;
        (DVec3::new(xy, xy, z), DVec3::new(-xy, -xy, z))
    }

    /// The time derivative of the state at `p`.
    #[inline]
    pub fn derivative(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            self.sigma * (p.y - p.x),
            p.x * (self.rho - p.z) - p.y,
            p.x * p.y - self.beta * p.z,
        )
    }
}

/// Parameter triples known to produce chaotic trajectories.
///
/// Seed derivation picks one row modulo the table length. Row order is
/// part of the seed mapping and must stay stable.
pub const EQUATION_PARAMETERS: &[LorenzSystem] = &[
    LorenzSystem {
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
    },
    LorenzSystem {
        sigma: 10.0,
        rho: 35.0,
        beta: 8.0 / 3.0,
    },
    LorenzSystem {
        sigma: 14.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
    },
    LorenzSystem {
        sigma: 16.0,
        rho: 45.92,
        beta: 4.0,
    },
    LorenzSystem {
        sigma: 10.0,
        rho: 60.0,
        beta: 8.0 / 3.0,
    },
    LorenzSystem {
        sigma: 13.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
    },
];

/// Numerical integration method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrator {
    /// Forward Euler: one derivative evaluation per step.
    Euler,
    /// Classical fourth-order Runge-Kutta: four evaluations per step.
    Rk4,
}

impl Integrator {
    /// Candidate table used by seed derivation, in seed order.
    pub const CANDIDATES: [Integrator; 2] = [Integrator::Euler, Integrator::Rk4];
}

/// One forward Euler step: `p + dt * f(p)`.
#[inline]
pub fn euler_step(p: DVec3, system: &LorenzSystem, dt: f64) -> DVec3 {
    p + dt * system.derivative(p)
}

/// One classical RK4 step with `(k0 + 2k1 + 2k2 + k3) / 6` weighting.
pub fn rk4_step(p: DVec3, system: &LorenzSystem, dt: f64) -> DVec3 {
    let k0 = dt * system.derivative(p);
    let k1 = dt * system.derivative(p + k0 / 2.0);
    let k2 = dt * system.derivative(p + k1 / 2.0);
    let k3 = dt * system.derivative(p + k2);
    p + (k0 + 2.0 * k1 + 2.0 * k2 + k3) / 6.0
}

/// Advance one particle state by one time step with the chosen method.
#[inline]
pub fn step(p: DVec3, system: &LorenzSystem, dt: f64, method: Integrator) -> DVec3 {
    match method {
        Integrator::Euler => euler_step(p, system, dt),
        Integrator::Rk4 => rk4_step(p, system, dt),
    }
}
