//! Vault gallery layout
//!
//! Pure placement math only. Nothing in here touches the DOM, the clock or a
//! random source, so the same items always land in the same spots.

pub mod helix;
pub mod item;

pub use helix::{HelixParams, HelixPlacement, Strand, layout_helix};
pub use item::GalleryItem;
