//! Sheet packing
//!
//! This module turns normalized items into sheets:
//! - Copy expansion (one queue entry per requested copy)
//! - Orientation candidates (as authored, rotated by 90°)
//! - Shelf placement across rows and sheets

mod shelf;
mod types;

pub use shelf::*;
pub use types::*;
