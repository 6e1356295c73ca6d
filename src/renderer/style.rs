//! Inline style generation for cards and particles

use std::fmt::Write;

use glam::Vec2;

use crate::color::Color;
use crate::layout::HelixPlacement;
use crate::particles::{ParticleTrajectory, ShapeStyle};

/// Vault card style; the card is centered on `50% + horizontal_offset`
pub fn placement_style(p: &HelixPlacement) -> String {
    format!(
        "left: calc(50% + {:.1}px); top: {:.1}px; \
         transform: translateX(-50%) scale({:.3}) rotate({:.2}deg); \
         opacity: {:.3}; z-index: {}; animation-delay: {:.2}s;",
        p.horizontal_offset,
        p.vertical_position,
        p.scale,
        p.rotation,
        p.opacity,
        p.z_order,
        p.animation_delay,
    )
}

/// Border radius, rotation and clip path for a particle silhouette
pub fn shape_css(style: &ShapeStyle) -> String {
    let mut css = String::new();
    let radius = if style.rounded { "50%" } else { "0" };
    let _ = write!(css, "border-radius: {radius};");

    // Keyframes compose this with the travel translate via --rot
    if style.rotation_deg != 0.0 {
        let _ = write!(css, " --rot: {}deg;", style.rotation_deg);
    }

    if let Some(outline) = style.outline {
        let points: Vec<String> = outline
            .iter()
            .map(|(x, y)| format!("{x}% {y}%"))
            .collect();
        let _ = write!(css, " clip-path: polygon({});", points.join(", "));
    }
    css
}

/// Particle style; `--dx`/`--dy` feed the float-away keyframes
pub fn particle_style(t: &ParticleTrajectory, color: Color) -> String {
    format!(
        "--dx: {:.1}px; --dy: {:.1}px; width: {:.1}px; height: {:.1}px; \
         background: {}; box-shadow: 0 0 {:.1}px {}; \
         animation-duration: {:.2}s; animation-delay: {:.2}s; {}",
        t.end_offset.x,
        t.end_offset.y,
        t.size,
        t.size,
        color.to_hex(),
        t.size * 2.0,
        color.to_css_rgba(0.8),
        t.duration,
        t.start_delay,
        shape_css(&t.shape_style),
    )
}

/// 3D hover tilt for a card (x = rotateX, y = rotateY)
pub fn tilt_style(tilt: Vec2) -> String {
    format!(
        "transform: perspective(800px) rotateX({:.2}deg) rotateY({:.2}deg);",
        tilt.x, tilt.y
    )
}
