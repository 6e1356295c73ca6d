//! DOM/CSS rendering
//!
//! Placements and trajectories become inline CSS; keyframes in the page
//! stylesheet do the actual animation.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod style;

pub use style::{particle_style, placement_style, shape_css, tilt_style};
