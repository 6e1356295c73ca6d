//! Helix Portal - a cinematic gateway into a double-helix vault
//!
//! Core modules:
//! - `layout`: Pure double-helix placement for vault items
//! - `particles`: Float-away particle trajectories with injected RNG and drift
//! - `portal`: Screen state machine with cancellable timed transitions
//! - `realms`: Deep-linkable realities and their vault contents
//! - `renderer`: Placement/trajectory to CSS, DOM mounting on the web
//! - `audio`: Oscillator-synthesized sound cues
//! - `platform`: Haptics, fullscreen and query parsing

pub mod audio;
pub mod color;
pub mod error;
pub mod layout;
pub mod particles;
pub mod platform;
pub mod portal;
pub mod realms;
pub mod renderer;
pub mod settings;

pub use color::Color;
pub use error::{PortalError, Result};
pub use layout::{GalleryItem, HelixParams, HelixPlacement, Strand, layout_helix};
pub use particles::{ParticleSpec, ParticleTrajectory, generate_particles};
pub use portal::{PortalEvent, PortalState, Screen};
pub use realms::RealityId;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
