//! Glint Paint API
//!
//! The drawing-side collaborators Glint effects render through.
//!
//! # Features
//!
//! - Colors with CSS hex parsing
//! - A [`Canvas`] trait for clear/stroke surfaces, plus a recording
//!   [`PaintContext`] implementation
//! - Mask gradients with CSS serialization

pub mod color;
pub mod context;
pub mod geometry;
pub mod gradient;

pub use color::Color;
pub use context::{Canvas, PaintCommand, PaintContext, StrokeStyle};
pub use geometry::{Point, Rect};
pub use gradient::{GradientDirection, MaskGradient, MaskStop};
