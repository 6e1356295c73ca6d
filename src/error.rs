//! Error type shared by the layout and particle generators

use thiserror::Error;

/// Errors raised when a caller hands the portal something it cannot lay out
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortalError {
    /// A numeric argument was negative, non-finite or otherwise out of domain
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Deep link or settings named a reality that does not exist
    #[error("unknown reality `{0}`")]
    UnknownReality(String),

    /// Color string was not `#rgb` or `#rrggbb`
    #[error("invalid color `{0}`")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PortalError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject NaN and infinities before they turn into NaN placements
pub fn ensure_finite(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PortalError::invalid(name, format!("expected a finite number, got {value}")))
    }
}

/// Reject ranges whose bounds are non-finite or inverted
pub fn ensure_range(name: &'static str, range: [f32; 2]) -> Result<[f32; 2]> {
    let [min, max] = range;
    ensure_finite(name, min)?;
    ensure_finite(name, max)?;
    if min > max {
        return Err(PortalError::invalid(
            name,
            format!("range is inverted ({min} > {max})"),
        ));
    }
    Ok(range)
}
