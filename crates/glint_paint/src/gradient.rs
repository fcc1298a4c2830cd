//! Mask gradients
//!
//! Linear alpha masks with percent-positioned stops that are either fully
//! transparent or fully opaque.

use smallvec::SmallVec;

/// Axis a linear gradient runs along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientDirection {
    ToTop,
    #[default]
    ToBottom,
    ToLeft,
    ToRight,
}

impl GradientDirection {
    pub fn css(&self) -> &'static str {
        match self {
            GradientDirection::ToTop => "to top",
            GradientDirection::ToBottom => "to bottom",
            GradientDirection::ToLeft => "to left",
            GradientDirection::ToRight => "to right",
        }
    }
}

/// A mask stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskStop {
    /// Position along the gradient axis, 0.0 to 100.0
    pub offset: f32,
    pub opaque: bool,
}

impl MaskStop {
    pub const fn transparent(offset: f32) -> Self {
        Self {
            offset,
            opaque: false,
        }
    }

    pub const fn opaque(offset: f32) -> Self {
        Self {
            offset,
            opaque: true,
        }
    }
}

/// A linear mask gradient with ordered stops
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskGradient {
    pub direction: GradientDirection,
    pub stops: SmallVec<[MaskStop; 4]>,
}

impl MaskGradient {
    pub fn new(direction: GradientDirection) -> Self {
        Self {
            direction,
            stops: SmallVec::new(),
        }
    }

    /// Builder: append a stop
    pub fn with_stop(mut self, stop: MaskStop) -> Self {
        self.stops.push(stop);
        self
    }

    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.stops.iter().map(|s| s.offset)
    }

    /// CSS `linear-gradient(...)` value, e.g. for `mask-image`
    pub fn to_css(&self) -> String {
        let mut css = format!("linear-gradient({}", self.direction.css());
        for stop in &self.stops {
            let color = if stop.opaque { "black" } else { "transparent" };
            css.push_str(&format!(", {color} {}%", stop.offset));
        }
        css.push(')');
        css
    }
}
