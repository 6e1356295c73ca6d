//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Haptic feedback (Vibration API)
//! - Fullscreen control
//! - Deep-link query parsing
//!
//! Browser calls are compiled only for wasm32; native builds get no-op stubs
//! so the rest of the crate stays testable with `cargo test`.

pub mod deeplink;
pub mod fullscreen;
pub mod haptics;

pub use deeplink::{DeepLink, parse_query};
pub use haptics::HapticEvent;
