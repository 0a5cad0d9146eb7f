//! Initial-condition generation for particle spawning.
//!
//! Each generation resolves one spatial [`Pattern`] and draws the pattern's
//! shared random values (a cloud radius, a cluster anchor, a set of arm
//! directions) exactly once. Those draws live as explicit fields on
//! [`InitialConditions`] so that every particle spawned in the generation
//! sees the same coherent structure: `Single` particles cluster tightly,
//! `Lines` particles form radiating arms, and so on.
//!
//! Colors are handed out round-robin so every color receives an equal
//! share of particles regardless of the total count.

use crate::params::Parameters;
use glam::{DVec3, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Spatial rule governing particles' initial positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Uniform ball around the attractor center.
    Cloud,
    /// Tight cluster around one random point.
    Single,
    /// One tight cluster per color.
    Fusion,
    /// Uniform points on a random-radius ring.
    Ring,
    /// Tight cluster around a point on a small ring.
    Origin,
    /// Uniform points on a plane spanning the attractor.
    Plane,
    /// Evenly spaced points along one arm per color.
    Lines,
    /// Resolved at generation time to one of the other seven.
    Random,
}

impl Pattern {
    /// Candidate table used by seed derivation, in seed order.
    pub const CANDIDATES: [Pattern; 8] = [
        Pattern::Cloud,
        Pattern::Single,
        Pattern::Fusion,
        Pattern::Ring,
        Pattern::Origin,
        Pattern::Plane,
        Pattern::Lines,
        Pattern::Random,
    ];

    /// The concrete patterns `Random` may resolve to.
    pub const CONCRETE: [Pattern; 7] = [
        Pattern::Cloud,
        Pattern::Single,
        Pattern::Fusion,
        Pattern::Ring,
        Pattern::Origin,
        Pattern::Plane,
        Pattern::Lines,
    ];
}

/// Scale of the random cloud radius.
const CLOUD_SCALE: f64 = 100.0;
/// Scale of the random anchor box for `Single` and `Fusion`.
const ANCHOR_SCALE: f64 = 40.0;
/// Perturbation radius around cluster anchors.
const ANCHOR_DELTA: f64 = 0.5;
/// Scale of the random arm length for `Lines`.
const LINES_SCALE: f64 = 100.0;
/// Scale of the random ring radius for `Ring`.
const RING_SCALE: f64 = 100.0;
/// Fixed ring radius for `Origin`.
const ORIGIN_RING_RADIUS: f64 = 3.0;

/// Per-generation shared draws, fixed once at construction.
#[derive(Debug, Clone)]
enum Layout {
    Cloud {
        radius: f64,
    },
    Single {
        anchor: DVec3,
    },
    Fusion {
        /// One anchor per color index.
        anchors: Vec<DVec3>,
    },
    Ring {
        radius: f64,
    },
    Origin {
        anchor: DVec3,
    },
    Plane {
        x_scale: f64,
        y_scale: f64,
        /// Shared Z, drawn once for the whole generation.
        z: f64,
    },
    Lines {
        /// One unit arm direction per color index, rotated around a
        /// shared random base point on the unit ring.
        arms: Vec<DVec3>,
        /// Distance between consecutive points on one arm.
        spacing: f64,
    },
}

/// Generator of starting positions and colors for one generation.
///
/// Construction resolves `Random` to a concrete pattern and fixes all
/// once-per-generation draws; afterwards [`next_color_index`](Self::next_color_index)
/// and [`initial_position`](Self::initial_position) only advance internal
/// counters and per-particle randomness.
#[derive(Debug)]
pub struct InitialConditions {
    pattern: Pattern,
    step: usize,
    zp: f64,
    /// The bundle's particle color list, indexed round-robin.
    colors: Vec<Vec3>,
    layout: Layout,
    rng: SmallRng,
    /// Round-robin color cursor.
    color_cursor: usize,
    /// `Lines` placement cursor: how many particles have been placed.
    placement_cursor: usize,
}

impl InitialConditions {
    /// Set up initial conditions for one generation.
    ///
    /// Resolves the parameter bundle's pattern (redrawing uniformly from
    /// the concrete patterns when it is `Random`, the one intentionally
    /// non-deterministic branch) and fixes the generation's shared draws.
    pub fn new(params: &Parameters, mut rng: SmallRng) -> Self {
        let pattern = match params.pattern {
            Pattern::Random => Pattern::CONCRETE[rng.gen_range(0..Pattern::CONCRETE.len())],
            concrete => concrete,
        };

        let zp = params.system.zp();
        let step = params.step;
        let layout = match pattern {
            Pattern::Cloud => Layout::Cloud {
                radius: CLOUD_SCALE * rng.gen::<f64>(),
            },
            Pattern::Single => Layout::Single {
                anchor: random_near_attractor(&mut rng, ANCHOR_SCALE, zp),
            },
            Pattern::Fusion => Layout::Fusion {
                anchors: (0..step)
                    .map(|_| random_near_attractor(&mut rng, ANCHOR_SCALE, zp))
                    .collect(),
            },
            Pattern::Ring => Layout::Ring {
                radius: RING_SCALE * rng.gen::<f64>(),
            },
            Pattern::Origin => Layout::Origin {
                anchor: random_on_ring(&mut rng, ORIGIN_RING_RADIUS),
            },
            Pattern::Plane => {
                let (p1, _) = params.system.equilibrium_points();
                Layout::Plane {
                    x_scale: 2.0 * p1.x,
                    y_scale: 2.0 * p1.y,
                    z: 0.8 * zp * (3.0 * rng.gen::<f64>() - 1.0),
                }
            }
            Pattern::Lines => {
                let length = LINES_SCALE * rng.gen::<f64>();
                let theta = TAU / step as f64;
                let base = random_on_ring(&mut rng, 1.0);
                Layout::Lines {
                    arms: (0..step)
                        .map(|n| rotate_xy(base, theta * n as f64))
                        .collect(),
                    spacing: length / params.multiplier as f64,
                }
            }
            Pattern::Random => unreachable!("Random resolved above"),
        };

        Self {
            pattern,
            step,
            zp,
            colors: params.particle_colors.clone(),
            layout,
            rng,
            color_cursor: 0,
            placement_cursor: 0,
        }
    }

    /// The concrete pattern this generation resolved to.
    #[inline]
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Next color index, round-robin over the particle color list.
    ///
    /// Calling this once per spawned particle gives every color exactly
    /// `⌊N/step⌋` or `⌈N/step⌉` particles out of `N`.
    pub fn next_color_index(&mut self) -> usize {
        let index = self.color_cursor % self.step;
        self.color_cursor += 1;
        index
    }

    /// Next color and its index in the particle color list.
    pub fn next_color(&mut self) -> (usize, Vec3) {
        let index = self.next_color_index();
        (index, self.colors[index])
    }

    /// Starting position for a particle of the given color index.
    pub fn initial_position(&mut self, color_index: usize) -> DVec3 {
        match &self.layout {
            Layout::Cloud { radius } => {
                let center = DVec3::new(0.0, 0.0, self.zp);
                center + random_in_sphere(&mut self.rng, *radius)
            }
            Layout::Single { anchor } => *anchor + random_in_sphere(&mut self.rng, ANCHOR_DELTA),
            Layout::Fusion { anchors } => {
                anchors[color_index % anchors.len()]
                    + random_in_sphere(&mut self.rng, ANCHOR_DELTA)
            }
            Layout::Ring { radius } => random_on_ring(&mut self.rng, *radius),
            Layout::Origin { anchor } => {
                *anchor + random_in_sphere(&mut self.rng, ORIGIN_RING_RADIUS / 2.0)
            }
            Layout::Plane { x_scale, y_scale, z } => DVec3::new(
                x_scale * (2.0 * self.rng.gen::<f64>() - 1.0),
                y_scale * (2.0 * self.rng.gen::<f64>() - 1.0),
                *z,
            ),
            Layout::Lines { arms, spacing } => {
                let arm = arms[color_index % arms.len()];
                // Integer division: every full round of colors moves one
                // slot further out along each arm.
                let distance = spacing * (1 + self.placement_cursor / self.step) as f64;
                self.placement_cursor += 1;
                DVec3::new(distance * arm.x, distance * arm.y, self.zp)
            }
        }
    }
}

// ========== Random position helpers ==========

/// Random point inside a sphere of given radius, centered at origin.
///
/// Colatitude via `acos(2v - 1)` and cube-root radius give a uniform
/// distribution throughout the volume.
pub fn random_in_sphere(rng: &mut impl Rng, radius: f64) -> DVec3 {
    let theta = TAU * rng.gen::<f64>();
    let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();
    let r = radius * rng.gen::<f64>().cbrt();

    DVec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Random point on a ring of given radius in the XY plane, z = 0.
pub fn random_on_ring(rng: &mut impl Rng, radius: f64) -> DVec3 {
    let theta = TAU * rng.gen::<f64>();
    DVec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
}

/// Random point in a cube of half-size `scale` around the attractor
/// center `(0, 0, zp)`.
pub fn random_near_attractor(rng: &mut impl Rng, scale: f64, zp: f64) -> DVec3 {
    DVec3::new(
        scale * (2.0 * rng.gen::<f64>() - 1.0),
        scale * (2.0 * rng.gen::<f64>() - 1.0),
        zp + scale * (2.0 * rng.gen::<f64>() - 1.0),
    )
}

/// Rotate a vector by `theta` radians in the XY plane.
pub fn rotate_xy(v: DVec3, theta: f64) -> DVec3 {
    let (sin, cos) = theta.sin_cos();
    DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameters;
    use crate::seed::Seed;
    use rand::SeedableRng;

    fn params_with_pattern(pattern: Pattern) -> Parameters {
        let seed = Seed::new("0000000000000000000000").unwrap();
        let mut params = Parameters::derive(&seed);
        params.pattern = pattern;
        params
    }

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_balanced_coloring() {
        let params = params_with_pattern(Pattern::Cloud);
        let step = params.step;
        let mut init = InitialConditions::new(&params, rng(1));

        let total = step * 10 + 3;
        let mut counts = vec![0usize; step];
        for _ in 0..total {
            counts[init.next_color_index()] += 1;
        }
        let min = *counts.iter().min().unwrap();
        let max = *counts.iter().max().unwrap();
        assert!(max - min <= 1, "unbalanced counts: {:?}", counts);
        assert_eq!(counts.iter().sum::<usize>(), total);
    }

    #[test]
    fn test_cloud_positions_inside_shared_radius() {
        let params = params_with_pattern(Pattern::Cloud);
        let mut init = InitialConditions::new(&params, rng(2));
        let center = DVec3::new(0.0, 0.0, params.system.zp());

        for _ in 0..100 {
            let p = init.initial_position(0);
            assert!((p - center).length() <= CLOUD_SCALE + 1e-9);
        }
    }

    #[test]
    fn test_single_clusters_tightly() {
        let params = params_with_pattern(Pattern::Single);
        let mut init = InitialConditions::new(&params, rng(3));

        let first = init.initial_position(0);
        for _ in 0..50 {
            let p = init.initial_position(0);
            // All positions perturb one shared anchor by at most 0.5.
            assert!((p - first).length() <= 2.0 * ANCHOR_DELTA + 1e-9);
        }
    }

    #[test]
    fn test_fusion_same_color_clusters() {
        let params = params_with_pattern(Pattern::Fusion);
        let mut init = InitialConditions::new(&params, rng(4));

        let a = init.initial_position(0);
        let b = init.initial_position(0);
        assert!((a - b).length() <= 2.0 * ANCHOR_DELTA + 1e-9);
    }

    #[test]
    fn test_ring_positions_on_shared_ring() {
        let params = params_with_pattern(Pattern::Ring);
        let mut init = InitialConditions::new(&params, rng(5));

        let first = init.initial_position(0);
        let radius = first.truncate().length();
        for _ in 0..50 {
            let p = init.initial_position(0);
            assert_eq!(p.z, 0.0);
            assert!((p.truncate().length() - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_plane_shares_z() {
        let params = params_with_pattern(Pattern::Plane);
        let mut init = InitialConditions::new(&params, rng(6));

        let first = init.initial_position(0);
        for _ in 0..50 {
            assert_eq!(init.initial_position(0).z, first.z);
        }
    }

    #[test]
    fn test_lines_spacing_along_arm() {
        let params = params_with_pattern(Pattern::Lines);
        let step = params.step;
        let mut init = InitialConditions::new(&params, rng(7));

        // Place two full rounds of colors; same-color particles must sit
        // at consecutive multiples of the arm spacing.
        let mut first_round = Vec::new();
        let mut second_round = Vec::new();
        for _ in 0..step {
            let color_index = init.next_color_index();
            first_round.push(init.initial_position(color_index));
        }
        for _ in 0..step {
            let color_index = init.next_color_index();
            second_round.push(init.initial_position(color_index));
        }
        for (a, b) in first_round.iter().zip(&second_round) {
            let ra = a.truncate().length();
            let rb = b.truncate().length();
            assert!((rb - 2.0 * ra).abs() < 1e-9, "spacing not even: {ra} {rb}");
            assert_eq!(a.z, params.system.zp());
        }
    }

    #[test]
    fn test_random_resolves_to_concrete() {
        let params = params_with_pattern(Pattern::Random);
        for i in 0..20 {
            let init = InitialConditions::new(&params, rng(i));
            assert_ne!(init.pattern(), Pattern::Random);
        }
    }

    #[test]
    fn test_pinned_rng_reproduces_draws() {
        let params = params_with_pattern(Pattern::Cloud);
        let mut a = InitialConditions::new(&params, rng(42));
        let mut b = InitialConditions::new(&params, rng(42));
        for _ in 0..10 {
            assert_eq!(a.initial_position(0), b.initial_position(0));
        }
    }

    #[test]
    fn test_random_in_sphere_bounds() {
        let mut r = rng(8);
        for _ in 0..200 {
            assert!(random_in_sphere(&mut r, 2.5).length() <= 2.5 + 1e-9);
        }
    }

    #[test]
    fn test_rotate_xy_quarter_turn() {
        let v = rotate_xy(DVec3::X, std::f64::consts::FRAC_PI_2);
        assert!((v - DVec3::Y).length() < 1e-12);
    }
}
