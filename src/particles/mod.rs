//! Particle trajectory generation
//!
//! Trajectories are sampled fresh each time a screen activates and thrown away
//! when it deactivates. Randomness and wind drift are both injected:
//! - Production seeds a `Pcg32` from the page clock
//! - Tests pass a fixed seed and `NoDrift` (or a frozen `WindDrift`)
//! - Nothing here reads a global clock or a thread-local RNG

pub mod drift;
pub mod profile;
pub mod trajectory;

pub use drift::{DriftField, NoDrift, WindDrift};
pub use profile::{DistributionProfile, ProfileRanges};
pub use trajectory::{
    BURST_PARTICLE_COUNT, ParticleShape, ParticleSpec, ParticleTrajectory, STAR_OUTLINE,
    ShapeStyle, SpeedClass, UNLOCK_PARTICLE_COUNT, generate_particles, parse_particle_count,
};
