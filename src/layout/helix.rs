//! Double-helix placement for the vault gallery
//!
//! Items alternate between two strands a half turn apart. Each strand is a
//! sine wave in x; the matching cosine is treated as depth and drives scale,
//! opacity and stacking so the 2D cards read as a spiral receding from the
//! viewer:
//!
//! ```text
//! angle  = i * angular_frequency + (0 | π)
//! x      = sin(angle) * amplitude
//! depth  = cos(angle)            ∈ [-1, 1]
//! t      = (depth + 1) / 2       ∈ [0, 1]
//! scale  = lerp(scale_range, t)
//! alpha  = lerp(opacity_range, t)
//! ```

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::item::GalleryItem;
use crate::error::{PortalError, Result, ensure_finite, ensure_range};

/// Which of the two interleaved strands an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    /// Even indices, phase offset 0
    A,
    /// Odd indices, phase offset π
    B,
}

impl Strand {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Strand::A } else { Strand::B }
    }

    pub fn phase_offset(&self) -> f32 {
        match self {
            Strand::A => 0.0,
            Strand::B => PI,
        }
    }

    /// CSS class suffix used by the vault stylesheet
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::A => "a",
            Strand::B => "b",
        }
    }
}

fn default_vertical_spacing() -> f32 {
    110.0
}
fn default_amplitude() -> f32 {
    90.0
}
fn default_angular_frequency() -> f32 {
    0.4
}
fn default_scale_range() -> [f32; 2] {
    [0.6, 1.1]
}
fn default_opacity_range() -> [f32; 2] {
    [0.4, 1.0]
}
fn default_rotation_amplitude() -> f32 {
    10.0
}
fn default_delay_step() -> f32 {
    0.05
}
fn default_base_offset() -> f32 {
    80.0
}

/// Helix tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelixParams {
    /// Vertical distance between consecutive items
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f32,
    /// Horizontal swing either side of center
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    /// Radians of phase advance per index step
    #[serde(default = "default_angular_frequency")]
    pub angular_frequency: f32,
    /// Scale at depth -1 and +1
    #[serde(default = "default_scale_range")]
    pub scale_range: [f32; 2],
    /// Opacity at depth -1 and +1
    #[serde(default = "default_opacity_range")]
    pub opacity_range: [f32; 2],
    /// Peak card tilt in degrees
    #[serde(default = "default_rotation_amplitude")]
    pub rotation_amplitude: f32,
    /// Entrance stagger per index (seconds)
    #[serde(default = "default_delay_step")]
    pub delay_step: f32,
    /// Gap above the first item
    #[serde(default = "default_base_offset")]
    pub base_offset: f32,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            vertical_spacing: default_vertical_spacing(),
            amplitude: default_amplitude(),
            angular_frequency: default_angular_frequency(),
            scale_range: default_scale_range(),
            opacity_range: default_opacity_range(),
            rotation_amplitude: default_rotation_amplitude(),
            delay_step: default_delay_step(),
            base_offset: default_base_offset(),
        }
    }
}

impl HelixParams {
    /// Check every field is usable before any placement is computed
    pub fn validate(&self) -> Result<()> {
        ensure_finite("vertical_spacing", self.vertical_spacing)?;
        ensure_finite("amplitude", self.amplitude)?;
        ensure_finite("angular_frequency", self.angular_frequency)?;
        ensure_range("scale_range", self.scale_range)?;
        ensure_range("opacity_range", self.opacity_range)?;
        ensure_finite("rotation_amplitude", self.rotation_amplitude)?;
        ensure_finite("base_offset", self.base_offset)?;
        if ensure_finite("delay_step", self.delay_step)? < 0.0 {
            return Err(PortalError::invalid("delay_step", "must not be negative"));
        }
        Ok(())
    }

    /// Scroll height needed to show `count` items plus one spacing of slack
    pub fn content_height(&self, count: usize) -> f32 {
        self.base_offset + count as f32 * self.vertical_spacing
    }
}

/// Where and how one gallery item is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelixPlacement {
    /// Signed offset from the horizontal center (caller adds the 50% baseline)
    pub horizontal_offset: f32,
    pub vertical_position: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Stacking order, `floor(scale * 100)`
    pub z_order: i32,
    /// Degrees
    pub rotation: f32,
    pub strand: Strand,
    /// Seconds
    pub animation_delay: f32,
}

impl HelixPlacement {
    /// Place the item at `index` (pure, params assumed valid)
    pub fn at(index: usize, params: &HelixParams) -> Self {
        let strand = Strand::for_index(index);
        let i = index as f32;
        let angle = i * params.angular_frequency + strand.phase_offset();
        let (sin, cos) = angle.sin_cos();

        // Normalized depth: 1 = nearest the viewer
        let t = (cos + 1.0) / 2.0;
        let scale = lerp(params.scale_range, t);
        let opacity = lerp(params.opacity_range, t);

        Self {
            horizontal_offset: sin * params.amplitude,
            vertical_position: params.base_offset + i * params.vertical_spacing,
            scale,
            opacity,
            z_order: (scale * 100.0).floor() as i32,
            rotation: sin * params.rotation_amplitude,
            strand,
            animation_delay: i * params.delay_step,
        }
    }
}

#[inline]
fn lerp([min, max]: [f32; 2], t: f32) -> f32 {
    min + t * (max - min)
}

/// Lay out `items` along the double helix
///
/// Output has the same length and order as the input. An empty slice yields an
/// empty vector; bad params yield `InvalidArgument` rather than NaN positions.
pub fn layout_helix(items: &[GalleryItem], params: &HelixParams) -> Result<Vec<HelixPlacement>> {
    params.validate()?;

    let placements: Vec<HelixPlacement> = (0..items.len())
        .map(|i| HelixPlacement::at(i, params))
        .collect();

    log::debug!("Laid out {} vault items", placements.len());
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| {
                GalleryItem::new(
                    format!("item-{i}"),
                    format!("Relic {i}"),
                    format!("img/{i}.webp"),
                    Color::WHITE,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let out = layout_helix(&[], &HelixParams::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_index_two_matches_hand_computation() {
        let out = layout_helix(&items(4), &HelixParams::default()).unwrap();
        let p = out[2];

        // angle = 2 * 0.4 = 0.8 on strand A
        assert_eq!(p.strand, Strand::A);
        assert!((p.horizontal_offset - 0.8_f32.sin() * 90.0).abs() < 1e-4);
        assert!((p.horizontal_offset - 64.4).abs() < 0.5);
        assert!((p.scale - 1.024).abs() < 1e-3);
        assert!((p.opacity - 0.909).abs() < 1e-3);
        assert_eq!(p.z_order, 102);
        assert!((p.vertical_position - (80.0 + 2.0 * 110.0)).abs() < 1e-4);
        assert!((p.animation_delay - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_strand_b_is_half_turn_ahead() {
        let params = HelixParams::default();
        let p1 = HelixPlacement::at(1, &params);
        assert_eq!(p1.strand, Strand::B);

        // angle = 0.4 + π, so x and depth flip sign relative to 0.4
        assert!((p1.horizontal_offset + 0.4_f32.sin() * 90.0).abs() < 1e-3);
        let t = (-(0.4_f32.cos()) + 1.0) / 2.0;
        assert!((p1.scale - (0.6 + t * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_first_item_is_front_and_center() {
        let p0 = HelixPlacement::at(0, &HelixParams::default());
        assert_eq!(p0.horizontal_offset, 0.0);
        assert!((p0.scale - 1.1).abs() < 1e-6);
        assert!((p0.opacity - 1.0).abs() < 1e-6);
        assert_eq!(p0.rotation, 0.0);
        assert_eq!(p0.animation_delay, 0.0);
    }

    #[test]
    fn test_rejects_non_finite_params() {
        let params = HelixParams {
            amplitude: f32::NAN,
            ..Default::default()
        };
        let err = layout_helix(&items(3), &params).unwrap_err();
        assert!(matches!(err, PortalError::InvalidArgument { name: "amplitude", .. }));

        let params = HelixParams {
            scale_range: [1.1, 0.6],
            ..Default::default()
        };
        assert!(layout_helix(&items(3), &params).is_err());

        let params = HelixParams {
            delay_step: -0.05,
            ..Default::default()
        };
        assert!(layout_helix(&items(3), &params).is_err());
    }

    #[test]
    fn test_params_fill_missing_fields_from_defaults() {
        let params: HelixParams = serde_json::from_str(r#"{"amplitude": 120.0}"#).unwrap();
        assert_eq!(params.amplitude, 120.0);
        assert_eq!(params.vertical_spacing, 110.0);
        assert_eq!(params.scale_range, [0.6, 1.1]);
    }

    #[test]
    fn test_content_height() {
        let params = HelixParams::default();
        assert_eq!(params.content_height(0), 80.0);
        assert_eq!(params.content_height(10), 80.0 + 1100.0);
    }

    proptest! {
        #[test]
        fn prop_length_order_and_strands(n in 0usize..200) {
            let input = items(n);
            let out = layout_helix(&input, &HelixParams::default()).unwrap();
            prop_assert_eq!(out.len(), n);
            for (i, p) in out.iter().enumerate() {
                prop_assert_eq!(p.strand == Strand::A, i % 2 == 0);
                // Order is preserved: placement i is the one computed for index i
                prop_assert_eq!(*p, HelixPlacement::at(i, &HelixParams::default()));
            }
        }

        #[test]
        fn prop_ranges_and_z_order(n in 1usize..300) {
            let params = HelixParams::default();
            for p in layout_helix(&items(n), &params).unwrap() {
                prop_assert!((0.6..=1.1).contains(&p.scale));
                prop_assert!((0.4..=1.0).contains(&p.opacity));
                prop_assert!(p.rotation.abs() <= 10.0);
                prop_assert!(p.animation_delay >= 0.0);
                prop_assert_eq!(p.z_order, (p.scale * 100.0).floor() as i32);
            }
        }

        #[test]
        fn prop_vertical_strictly_increasing(n in 2usize..200, spacing in 1.0f32..400.0) {
            let params = HelixParams { vertical_spacing: spacing, ..Default::default() };
            let out = layout_helix(&items(n), &params).unwrap();
            for pair in out.windows(2) {
                prop_assert!(pair[1].vertical_position > pair[0].vertical_position);
                prop_assert!(pair[1].animation_delay >= pair[0].animation_delay);
            }
        }

        #[test]
        fn prop_scale_and_opacity_follow_depth(i in 0usize..500, j in 0usize..500) {
            let params = HelixParams::default();
            let depth = |k: usize| {
                let angle = k as f32 * params.angular_frequency + Strand::for_index(k).phase_offset();
                angle.cos()
            };
            let (pi, pj) = (HelixPlacement::at(i, &params), HelixPlacement::at(j, &params));
            if depth(i) > depth(j) {
                prop_assert!(pi.scale >= pj.scale);
                prop_assert!(pi.opacity >= pj.opacity);
            }
        }
    }
}
