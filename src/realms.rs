//! Realities reachable through the portal
//!
//! A deep link names a reality; the reality decides which relics fill the
//! vault, the accent color and how idle particles drift.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PortalError, Result};
use crate::layout::GalleryItem;
use crate::particles::DistributionProfile;

/// Reality identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RealityId {
    /// Home reality, shown when no deep link is given
    #[default]
    Nexus,
    Neon,
    Celestial,
    Abyss,
}

/// Display metadata for a reality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealityMeta {
    pub title: &'static str,
    pub tagline: &'static str,
    pub accent: Color,
    /// How idle/hover particles behave while this reality is shown
    pub hover_profile: DistributionProfile,
}

impl RealityId {
    pub const ALL: [RealityId; 4] = [
        RealityId::Nexus,
        RealityId::Neon,
        RealityId::Celestial,
        RealityId::Abyss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RealityId::Nexus => "nexus",
            RealityId::Neon => "neon",
            RealityId::Celestial => "celestial",
            RealityId::Abyss => "abyss",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nexus" | "" => Ok(RealityId::Nexus),
            "neon" | "cyber" => Ok(RealityId::Neon),
            "celestial" | "stars" => Ok(RealityId::Celestial),
            "abyss" | "deep" => Ok(RealityId::Abyss),
            _ => Err(PortalError::UnknownReality(s.to_string())),
        }
    }

    pub fn meta(&self) -> RealityMeta {
        match self {
            RealityId::Nexus => RealityMeta {
                title: "The Nexus",
                tagline: "Where every path begins",
                accent: Color::rgb(0x8a, 0x2b, 0xe2),
                hover_profile: DistributionProfile::MagicalFlow,
            },
            RealityId::Neon => RealityMeta {
                title: "Neon Sprawl",
                tagline: "A city that never powers down",
                accent: Color::rgb(0x00, 0xff, 0xcc),
                hover_profile: DistributionProfile::Neon,
            },
            RealityId::Celestial => RealityMeta {
                title: "Celestial Archive",
                tagline: "Starlight catalogued by hand",
                accent: Color::rgb(0xff, 0xd7, 0x00),
                hover_profile: DistributionProfile::Stardust,
            },
            RealityId::Abyss => RealityMeta {
                title: "The Abyss",
                tagline: "Pressure, silence, bioluminescence",
                accent: Color::rgb(0x1e, 0x90, 0xff),
                hover_profile: DistributionProfile::Abyss,
            },
        }
    }

    fn relic_names(&self) -> &'static [&'static str] {
        match self {
            RealityId::Nexus => &[
                "Prism Key",
                "Echo Lantern",
                "Threadbound Atlas",
                "Mirror Seed",
                "Quiet Compass",
                "Gate Shard",
                "Hollow Crown",
                "First Door",
            ],
            RealityId::Neon => &[
                "Glitch Relay",
                "Chrome Koi",
                "Signal Mask",
                "Overclock Heart",
                "Rain Terminal",
                "Ghost Ticket",
            ],
            RealityId::Celestial => &[
                "Comet Quill",
                "Orrery Bloom",
                "Nebula Jar",
                "Meridian Bell",
                "Eclipse Lens",
                "Polaris Thread",
                "Solstice Coin",
                "Aurora Veil",
                "Zenith Map",
                "Halo Fragment",
            ],
            RealityId::Abyss => &[
                "Lantern Fin",
                "Pressure Pearl",
                "Trench Idol",
                "Kelp Codex",
                "Siren Shell",
            ],
        }
    }

    /// Vault contents in display order
    pub fn gallery_items(&self) -> Vec<GalleryItem> {
        let accent = self.meta().accent;
        self.relic_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let slug = name.to_lowercase().replace(' ', "-");
                GalleryItem::new(
                    format!("{}-{i:02}", self.as_str()),
                    *name,
                    format!("assets/{}/{slug}.webp", self.as_str()),
                    accent,
                )
            })
            .collect()
    }
}
