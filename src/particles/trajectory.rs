//! Per-particle "float away" trajectories

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::drift::DriftField;
use super::profile::DistributionProfile;
use crate::color::Color;
use crate::error::{PortalError, Result, ensure_finite};
use crate::polar_to_cartesian;

/// Particles in the gateway burst
pub const BURST_PARTICLE_COUNT: usize = 40;
/// Particles released when the vault unlocks
pub const UNLOCK_PARTICLE_COUNT: usize = 60;
/// Hard ceiling for counts coming from untyped input
pub const MAX_PARTICLE_COUNT: usize = 1000;

/// Shared start-delay range (seconds)
const DELAY_RANGE: [f32; 2] = [0.0, 2.0];
/// Shared diameter range
const SIZE_RANGE: [f32; 2] = [2.0, 6.0];

/// Ten-point star outline, percentages of the particle box
pub const STAR_OUTLINE: [(f32, f32); 10] = [
    (50.0, 0.0),
    (61.0, 35.0),
    (98.0, 35.0),
    (68.0, 57.0),
    (79.0, 91.0),
    (50.0, 70.0),
    (21.0, 91.0),
    (32.0, 57.0),
    (2.0, 35.0),
    (39.0, 35.0),
];

/// Animation speed category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedClass {
    Fast,
    #[default]
    Normal,
    Slow,
}

impl SpeedClass {
    /// Duration multiplier
    pub fn multiplier(&self) -> f32 {
        match self {
            SpeedClass::Fast => 0.2,
            SpeedClass::Normal => 1.0,
            SpeedClass::Slow => 3.0,
        }
    }
}

/// Particle silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
    Diamond,
    Star,
}

impl ParticleShape {
    pub fn style(&self) -> ShapeStyle {
        match self {
            ParticleShape::Circle => ShapeStyle {
                rounded: true,
                rotation_deg: 0.0,
                outline: None,
            },
            ParticleShape::Square => ShapeStyle {
                rounded: false,
                rotation_deg: 0.0,
                outline: None,
            },
            ParticleShape::Diamond => ShapeStyle {
                rounded: false,
                rotation_deg: 45.0,
                outline: None,
            },
            ParticleShape::Star => ShapeStyle {
                rounded: false,
                rotation_deg: 0.0,
                outline: Some(&STAR_OUTLINE),
            },
        }
    }
}

/// Presentation metadata attached to each trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeStyle {
    /// Fully rounded corners
    pub rounded: bool,
    /// Fixed rotation in degrees
    pub rotation_deg: f32,
    /// Polygon clip in box percentages
    pub outline: Option<&'static [(f32, f32)]>,
}

/// What to emit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub count: usize,
    pub color: Color,
    pub shape: ParticleShape,
    pub speed: SpeedClass,
    pub profile: DistributionProfile,
}

impl ParticleSpec {
    /// Gateway-style outward burst
    pub fn burst(count: usize, color: Color) -> Self {
        Self {
            count,
            color,
            shape: ParticleShape::Circle,
            speed: SpeedClass::Normal,
            profile: DistributionProfile::Burst,
        }
    }

    /// Idle/hover emitter themed by a distribution profile
    pub fn hover(count: usize, color: Color, profile: DistributionProfile) -> Self {
        Self {
            count,
            color,
            shape: ParticleShape::Star,
            speed: SpeedClass::Slow,
            profile,
        }
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_speed(mut self, speed: SpeedClass) -> Self {
        self.speed = speed;
        self
    }
}

/// One particle's outward animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleTrajectory {
    /// Seconds before the particle starts moving
    pub start_delay: f32,
    /// Seconds, already scaled by the speed class
    pub duration: f32,
    /// Final offset from the emitter origin
    pub end_offset: Vec2,
    /// Diameter
    pub size: f32,
    pub shape_style: ShapeStyle,
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f32; 2]) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Sample `spec.count` trajectories
///
/// Not reproducible by design unless the caller fixes both `rng` and `drift`.
/// Draw order per particle is angle, radius, duration, delay, size, so two
/// specs that differ only in speed class consume identical random streams.
pub fn generate_particles<R, D>(
    spec: &ParticleSpec,
    rng: &mut R,
    drift: &D,
) -> Result<Vec<ParticleTrajectory>>
where
    R: Rng + ?Sized,
    D: DriftField + ?Sized,
{
    let ranges = spec.profile.ranges();
    let speed = spec.speed.multiplier();
    let shape_style = spec.shape.style();

    let mut trajectories = Vec::with_capacity(spec.count);
    for i in 0..spec.count {
        let angle = rng.random::<f32>() * TAU;
        let distance = sample(rng, ranges.radius);
        let duration = sample(rng, ranges.duration) * speed;
        let start_delay = sample(rng, DELAY_RANGE);
        let size = sample(rng, SIZE_RANGE);

        let wind = ensure_finite("drift", drift.offset(i))?;
        let end_offset = polar_to_cartesian(distance, angle) + Vec2::new(wind, 0.0);

        trajectories.push(ParticleTrajectory {
            start_delay,
            duration,
            end_offset,
            size,
            shape_style,
        });
    }

    log::trace!(
        "Sampled {} {} particles",
        trajectories.len(),
        spec.profile.as_str()
    );
    Ok(trajectories)
}

/// Parse a particle count from a query string or stored setting
///
/// Rejects negative, fractional and non-finite input instead of letting it
/// wrap or truncate into a surprising count.
pub fn parse_particle_count(raw: &str) -> Result<usize> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PortalError::invalid("count", format!("`{raw}` is not a number")))?;

    if !value.is_finite() {
        return Err(PortalError::invalid("count", "must be finite"));
    }
    if value < 0.0 {
        return Err(PortalError::invalid("count", "must not be negative"));
    }
    if value.fract() != 0.0 {
        return Err(PortalError::invalid("count", "must be a whole number"));
    }
    if value > MAX_PARTICLE_COUNT as f64 {
        return Err(PortalError::invalid(
            "count",
            format!("must be at most {MAX_PARTICLE_COUNT}"),
        ));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{NoDrift, WindDrift};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_counts() {
        for count in [0, 1, BURST_PARTICLE_COUNT, UNLOCK_PARTICLE_COUNT] {
            let spec = ParticleSpec::burst(count, Color::WHITE);
            let out = generate_particles(&spec, &mut rng(1), &NoDrift).unwrap();
            assert_eq!(out.len(), count);
        }
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let spec = ParticleSpec::burst(UNLOCK_PARTICLE_COUNT, Color::WHITE);
        let wind = WindDrift::at(12.25);
        let a = generate_particles(&spec, &mut rng(42), &wind).unwrap();
        let b = generate_particles(&spec, &mut rng(42), &wind).unwrap();
        assert_eq!(a, b);

        let c = generate_particles(&spec, &mut rng(43), &wind).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_drift_changes_output_for_same_seed() {
        let spec = ParticleSpec::burst(10, Color::WHITE);
        let a = generate_particles(&spec, &mut rng(7), &WindDrift::at(0.0)).unwrap();
        let b = generate_particles(&spec, &mut rng(7), &WindDrift::at(3.0)).unwrap();
        assert_ne!(a, b);
        // Drift is horizontal only
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.end_offset.y, pb.end_offset.y);
            assert_eq!(pa.duration, pb.duration);
        }
    }

    #[test]
    fn test_fast_is_shorter_than_slow() {
        let fast = ParticleSpec::burst(40, Color::WHITE).with_speed(SpeedClass::Fast);
        let slow = ParticleSpec::burst(40, Color::WHITE).with_speed(SpeedClass::Slow);
        let a = generate_particles(&fast, &mut rng(9), &NoDrift).unwrap();
        let b = generate_particles(&slow, &mut rng(9), &NoDrift).unwrap();

        for (f, s) in a.iter().zip(&b) {
            assert!(f.duration < s.duration);
            assert!((f.duration / s.duration - 0.2 / 3.0).abs() < 1e-5);
            assert_eq!(f.end_offset, s.end_offset);
        }
    }

    #[test]
    fn test_burst_ranges() {
        let spec = ParticleSpec::burst(500, Color::WHITE);
        for p in generate_particles(&spec, &mut rng(3), &NoDrift).unwrap() {
            let r = p.end_offset.length();
            assert!((80.0 - 1e-3..=130.0 + 1e-3).contains(&r), "radius {r}");
            assert!((2.0..=5.0).contains(&p.duration));
            assert!((0.0..=2.0).contains(&p.start_delay));
            assert!((2.0..=6.0).contains(&p.size));
        }
    }

    #[test]
    fn test_non_finite_drift_is_rejected() {
        let spec = ParticleSpec::burst(3, Color::WHITE);
        let broken = |_: usize| f32::NAN;
        let err = generate_particles(&spec, &mut rng(1), &broken).unwrap_err();
        assert!(matches!(err, PortalError::InvalidArgument { name: "drift", .. }));

        // Zero particles never consult the drift
        let empty = ParticleSpec::burst(0, Color::WHITE);
        assert!(generate_particles(&empty, &mut rng(1), &broken).unwrap().is_empty());
    }

    #[test]
    fn test_shape_styles() {
        assert!(ParticleShape::Circle.style().rounded);
        assert!(!ParticleShape::Square.style().rounded);
        assert_eq!(ParticleShape::Diamond.style().rotation_deg, 45.0);
        assert_eq!(ParticleShape::Star.style().outline.map(|o| o.len()), Some(10));

        let spec = ParticleSpec::hover(5, Color::WHITE, DistributionProfile::Neon);
        for p in generate_particles(&spec, &mut rng(2), &NoDrift).unwrap() {
            assert_eq!(p.shape_style, ParticleShape::Star.style());
        }
    }

    #[test]
    fn test_parse_particle_count() {
        assert_eq!(parse_particle_count("60"), Ok(60));
        assert_eq!(parse_particle_count(" 0 "), Ok(0));
        assert_eq!(parse_particle_count("40.0"), Ok(40));
        assert!(parse_particle_count("-3").is_err());
        assert!(parse_particle_count("NaN").is_err());
        assert!(parse_particle_count("inf").is_err());
        assert!(parse_particle_count("2.5").is_err());
        assert!(parse_particle_count("lots").is_err());
        assert!(parse_particle_count("100000").is_err());
    }

    proptest! {
        #[test]
        fn prop_profile_radius_respected(seed in any::<u64>(), count in 0usize..80) {
            for profile in [
                DistributionProfile::MagicalFlow,
                DistributionProfile::Neon,
                DistributionProfile::Stardust,
                DistributionProfile::Abyss,
            ] {
                let ranges = profile.ranges();
                let spec = ParticleSpec::hover(count, Color::WHITE, profile)
                    .with_speed(SpeedClass::Normal);
                let out = generate_particles(&spec, &mut rng(seed), &NoDrift).unwrap();
                prop_assert_eq!(out.len(), count);
                for p in out {
                    let r = p.end_offset.length();
                    prop_assert!(r >= ranges.radius[0] - 1e-3 && r <= ranges.radius[1] + 1e-3);
                    prop_assert!(p.duration >= ranges.duration[0] && p.duration <= ranges.duration[1]);
                }
            }
        }
    }
}
