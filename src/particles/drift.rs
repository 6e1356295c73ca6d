//! Horizontal wind bias applied to particle end points

/// Source of the per-particle horizontal drift
pub trait DriftField {
    /// Extra x offset for the particle at `index`
    fn offset(&self, index: usize) -> f32;
}

/// Still air
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoDrift;

impl DriftField for NoDrift {
    fn offset(&self, _index: usize) -> f32 {
        0.0
    }
}

/// Gentle sine-shaped breeze keyed off a caller-supplied time
///
/// Two emitters built at different moments drift differently even with the
/// same RNG seed. Freeze `time_secs` to make output reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindDrift {
    /// Page time in seconds
    pub time_secs: f64,
    /// Peak drift in layout units
    pub strength: f32,
}

impl WindDrift {
    pub const DEFAULT_STRENGTH: f32 = 12.0;

    pub fn at(time_secs: f64) -> Self {
        Self {
            time_secs,
            strength: Self::DEFAULT_STRENGTH,
        }
    }
}

impl DriftField for WindDrift {
    fn offset(&self, index: usize) -> f32 {
        let phase = self.time_secs * 0.8 + index as f64 * 0.35;
        phase.sin() as f32 * self.strength
    }
}

impl<F> DriftField for F
where
    F: Fn(usize) -> f32,
{
    fn offset(&self, index: usize) -> f32 {
        self(index)
    }
}
