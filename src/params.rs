//! Seed derivation: from an opaque seed to the full parameter bundle.
//!
//! [`Parameters::derive`] is pure and deterministic: it partitions the
//! seed into disjoint fixed-offset substrings, parses each as a hex
//! integer and reduces it modulo the length of that stage's candidate
//! table. The resulting bundle is immutable for the lifetime of one
//! generation and replaced wholesale on regeneration.
//!
//! The alternate input mode, [`Parameters::from_record`], validates a
//! pre-resolved [`AttributeRecord`] against the same candidate tables.

use crate::error::SeedError;
use crate::integrate::{Integrator, LorenzSystem, EQUATION_PARAMETERS};
use crate::palette;
use crate::seed::{parse_color, AttributeRecord, Seed};
use crate::spawn::Pattern;
use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

// Candidate tables. Order is part of the seed mapping and must stay stable.
const STEP_CANDIDATES: [usize; 6] = [2, 3, 4, 5, 6, 7];
const MULTIPLIER_CANDIDATES: [u32; 2] = [10, 100];
const TRAIL_CANDIDATES: [usize; 4] = [10, 100, 1000, 10000];
const RADIUS_CANDIDATES: [f64; 2] = [0.1, 1.0];
const BACKGROUND_CANDIDATES: [Vec3; 2] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(238.0 / 255.0, 238.0 / 255.0, 238.0 / 255.0),
];
const DT_CANDIDATES: [f64; 2] = [0.001, 0.005];

/// A static marker at one of the system's nontrivial fixed points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    /// Position of the fixed point.
    pub position: DVec3,
    /// Marker color, reserved from the expanded gradient.
    pub color: Vec3,
}

/// The full derived configuration for one generation.
///
/// Created once per generation event, immutable afterwards. All fields are
/// plain data so the bundle can be serialized as a flat record for
/// reproducibility and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Display name of the selected gradient.
    pub gradient_name: String,
    /// Expanded gradient: `step + 2` colors, endpoints reserved for the
    /// equilibrium markers.
    pub palette: Vec<Vec3>,
    /// Colors available to particles: the palette minus its endpoints.
    pub particle_colors: Vec<Vec3>,
    /// Number of distinct particle colors.
    pub step: usize,
    /// Particle count multiplier.
    pub multiplier: u32,
    /// Total particle count: `step * multiplier`.
    pub particle_count: u32,
    /// Per-particle trail capacity in positions.
    pub trail_capacity: usize,
    /// Particle visual radius.
    pub particle_radius: f64,
    /// Scene background color.
    pub background: Vec3,
    /// Integration time step.
    pub dt: f64,
    /// Integration method.
    pub integrator: Integrator,
    /// Physical constants, always a tabled triple.
    pub system: LorenzSystem,
    /// Spatial initial-condition pattern.
    pub pattern: Pattern,
    /// Equilibrium marker at `(+√(beta·(rho−1)), +√(beta·(rho−1)), rho−1)`.
    pub point1: EquilibriumPoint,
    /// Equilibrium marker at `(−√(beta·(rho−1)), −√(beta·(rho−1)), rho−1)`.
    pub point2: EquilibriumPoint,
}

impl Parameters {
    /// Derive the full parameter bundle from a validated seed.
    ///
    /// Deterministic and total: a fixed seed always yields an identical
    /// bundle, and every possible seed maps to some bundle.
    pub fn derive(seed: &Seed) -> Self {
        let gradient = &palette::CATALOG[seed.field(0..5) as usize % palette::CATALOG.len()];
        let step = STEP_CANDIDATES[seed.field(5..7) as usize % STEP_CANDIDATES.len()];
        let multiplier =
            MULTIPLIER_CANDIDATES[seed.field(7..9) as usize % MULTIPLIER_CANDIDATES.len()];
        let trail_capacity = TRAIL_CANDIDATES[seed.field(9..11) as usize % TRAIL_CANDIDATES.len()];
        let particle_radius =
            RADIUS_CANDIDATES[seed.field(11..13) as usize % RADIUS_CANDIDATES.len()];
        let background =
            BACKGROUND_CANDIDATES[seed.field(13..14) as usize % BACKGROUND_CANDIDATES.len()];
        let dt = DT_CANDIDATES[seed.field(14..15) as usize % DT_CANDIDATES.len()];
        let integrator = Integrator::CANDIDATES
            [seed.field(15..16) as usize % Integrator::CANDIDATES.len()];
        let pattern =
            Pattern::CANDIDATES[seed.field(16..18) as usize % Pattern::CANDIDATES.len()];
        let system = EQUATION_PARAMETERS[seed.field(18..22) as usize % EQUATION_PARAMETERS.len()];

        Self::assemble(
            gradient.name.to_string(),
            palette::expand(gradient.anchors, step + 2),
            step,
            multiplier,
            trail_capacity,
            particle_radius,
            background,
            dt,
            integrator,
            system,
            pattern,
        )
    }

    /// Resolve a pre-resolved attribute record into a parameter bundle.
    ///
    /// Code-typed fields are validated against the same candidate tables
    /// seed derivation indexes; an out-of-range code is rejected before
    /// any state is constructed.
    pub fn from_record(record: &AttributeRecord) -> Result<Self, SeedError> {
        let anchors: Vec<Vec3> = record
            .gradient_colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<_, _>>()?;
        if anchors.len() < 2 {
            return Err(SeedError::InvalidField {
                field: "gc",
                value: anchors.len() as u64,
            });
        }
        if record.step < 1 {
            return Err(SeedError::InvalidField { field: "pc", value: 0 });
        }
        if record.trail < 1 {
            return Err(SeedError::InvalidField { field: "pt", value: 0 });
        }

        let particle_radius = *RADIUS_CANDIDATES
            .get(record.size_code as usize)
            .ok_or(SeedError::InvalidField {
                field: "ps",
                value: record.size_code as u64,
            })?;
        let dt = *DT_CANDIDATES
            .get(record.dt_code as usize)
            .ok_or(SeedError::InvalidField {
                field: "is",
                value: record.dt_code as u64,
            })?;
        let integrator = *Integrator::CANDIDATES
            .get(record.integrator_code as usize)
            .ok_or(SeedError::InvalidField {
                field: "im",
                value: record.integrator_code as u64,
            })?;
        let background = *BACKGROUND_CANDIDATES
            .get(record.background_code as usize)
            .ok_or(SeedError::InvalidField {
                field: "bg",
                value: record.background_code as u64,
            })?;
        // Pattern codes are 1-based in the record format.
        let pattern = *record
            .pattern_code
            .checked_sub(1)
            .and_then(|i| Pattern::CANDIDATES.get(i as usize))
            .ok_or(SeedError::InvalidField {
                field: "ic",
                value: record.pattern_code as u64,
            })?;

        let system = LorenzSystem {
            sigma: record.sigma,
            rho: record.rho,
            beta: record.beta,
        };

        Ok(Self::assemble(
            String::new(),
            palette::expand(&anchors, record.step + 2),
            record.step,
            record.multiplier,
            record.trail,
            particle_radius,
            background,
            dt,
            integrator,
            system,
            pattern,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        gradient_name: String,
        expanded: Vec<Vec3>,
        step: usize,
        multiplier: u32,
        trail_capacity: usize,
        particle_radius: f64,
        background: Vec3,
        dt: f64,
        integrator: Integrator,
        system: LorenzSystem,
        pattern: Pattern,
    ) -> Self {
        // First and last expanded colors belong to the equilibrium markers.
        let particle_colors = expanded[1..expanded.len() - 1].to_vec();
        let (p1, p2) = system.equilibrium_points();
        let point1 = EquilibriumPoint {
            position: p1,
            color: expanded[0],
        };
        let point2 = EquilibriumPoint {
            position: p2,
            color: expanded[expanded.len() - 1],
        };

        Self {
            gradient_name,
            palette: expanded,
            particle_colors,
            step,
            multiplier,
            particle_count: step as u32 * multiplier,
            trail_capacity,
            particle_radius,
            background,
            dt,
            integrator,
            system,
            pattern,
            point1,
            point2,
        }
    }
}
