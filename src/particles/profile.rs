//! Named radius/duration distributions for particle emitters

use serde::{Deserialize, Serialize};

/// Sampling ranges for one profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRanges {
    /// Travel distance from the origin
    pub radius: [f32; 2],
    /// Base animation length in seconds, before the speed multiplier
    pub duration: [f32; 2],
}

/// Particle distribution per visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributionProfile {
    /// Outward explosion used by the gateway and vault unlock
    Burst,
    /// Default idle/hover drift
    #[default]
    MagicalFlow,
    /// Short, snappy sparks
    Neon,
    /// Wide, slow-settling dust
    Stardust,
    /// Tight, sluggish bubbles
    Abyss,
}

impl DistributionProfile {
    pub fn ranges(&self) -> ProfileRanges {
        match self {
            DistributionProfile::Burst => ProfileRanges {
                radius: [80.0, 130.0],
                duration: [2.0, 5.0],
            },
            DistributionProfile::MagicalFlow => ProfileRanges {
                radius: [30.0, 90.0],
                duration: [3.0, 6.0],
            },
            DistributionProfile::Neon => ProfileRanges {
                radius: [40.0, 70.0],
                duration: [0.8, 1.6],
            },
            DistributionProfile::Stardust => ProfileRanges {
                radius: [60.0, 160.0],
                duration: [4.0, 8.0],
            },
            DistributionProfile::Abyss => ProfileRanges {
                radius: [20.0, 50.0],
                duration: [5.0, 9.0],
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionProfile::Burst => "burst",
            DistributionProfile::MagicalFlow => "magical-flow",
            DistributionProfile::Neon => "neon",
            DistributionProfile::Stardust => "stardust",
            DistributionProfile::Abyss => "abyss",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_well_formed() {
        for profile in [
            DistributionProfile::Burst,
            DistributionProfile::MagicalFlow,
            DistributionProfile::Neon,
            DistributionProfile::Stardust,
            DistributionProfile::Abyss,
        ] {
            let r = profile.ranges();
            assert!(r.radius[0] > 0.0 && r.radius[0] < r.radius[1], "{profile:?}");
            assert!(r.duration[0] > 0.0 && r.duration[0] < r.duration[1], "{profile:?}");
        }
    }

    #[test]
    fn test_burst_matches_gateway_explosion() {
        let r = DistributionProfile::Burst.ranges();
        assert_eq!(r.radius, [80.0, 130.0]);
        assert_eq!(r.duration, [2.0, 5.0]);
    }

    #[test]
    fn test_default_is_magical_flow() {
        assert_eq!(DistributionProfile::default(), DistributionProfile::MagicalFlow);
    }
}
