//! An offline CPU path tracer core: a SAH-built KD-tree accelerator, a
//! Möller-Trumbore ray/triangle kernel, and a parallel tile-based renderer.
//!
//! Grounded on the teacher's module layout (one directory per subsystem,
//! re-exported from a thin `mod.rs`), generalized from the teacher's fixed
//! BVH/BVH4 sphere-and-plane demo into the full triangle-mesh KD-tree
//! pipeline described by this crate's design document.

pub mod math;
pub mod triangle;
pub mod kdtree;
pub mod image;
pub mod scene;
pub mod render;
pub mod error;

pub use error::RenderError;
pub use scene::Scene;
pub use render::{render, RenderSettings, RenderStats};
