//! Gradual blur
//!
//! A progressive edge blur built from `div_count` stacked overlays. Layer `i`
//! covers a band of the container through its mask gradient and applies a
//! backdrop blur that grows with `curve(i / div_count)`; where bands overlap
//! the host's compositor blends them into a smooth ramp.
//!
//! Everything is computed once at construction. There is no animation.

use glint_animation::Curve;
use glint_paint::{GradientDirection, MaskGradient, MaskStop};

use crate::config::GradualBlurConfig;
use crate::host::{OverlayHost, OverlayId};

/// Blur base unit in rem
const BASE_BLUR_REM: f32 = 0.0625;

/// Container edge the blur is anchored to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Edge::Top),
            "bottom" => Some(Edge::Bottom),
            "left" => Some(Edge::Left),
            "right" => Some(Edge::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }

    /// Mask direction: the gradient runs toward the anchored edge
    pub fn direction(&self) -> GradientDirection {
        match self {
            Edge::Top => GradientDirection::ToTop,
            Edge::Bottom => GradientDirection::ToBottom,
            Edge::Left => GradientDirection::ToLeft,
            Edge::Right => GradientDirection::ToRight,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

/// Where the overlay is meant to live
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlurTarget {
    /// Inside a specific element, positioned absolutely
    #[default]
    Parent,
    /// Fixed over the whole page
    Page,
}

impl BlurTarget {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parent" => Some(BlurTarget::Parent),
            "page" => Some(BlurTarget::Page),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlurTarget::Parent => "parent",
            BlurTarget::Page => "page",
        }
    }
}

/// One masked, blurred slice of the overlay
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlurLayer {
    pub mask: MaskGradient,
    /// Backdrop blur radius in rem
    pub blur_radius: f32,
}

impl BlurLayer {
    /// `mask-image` value
    pub fn mask_css(&self) -> String {
        self.mask.to_css()
    }

    /// `backdrop-filter` value
    pub fn backdrop_filter_css(&self) -> String {
        format!("blur({:.3}rem)", self.blur_radius)
    }

    /// Full-bleed layer declarations
    pub fn style(&self, opacity: f32) -> Vec<(&'static str, String)> {
        let mask = self.mask_css();
        let filter = self.backdrop_filter_css();
        vec![
            ("position", "absolute".to_string()),
            ("inset", "0".to_string()),
            ("mask-image", mask.clone()),
            ("-webkit-mask-image", mask),
            ("backdrop-filter", filter.clone()),
            ("-webkit-backdrop-filter", filter),
            ("opacity", opacity.to_string()),
        ]
    }
}

/// The container and its layers, as handed to an [`OverlayHost`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlurOverlay {
    pub class_name: String,
    pub edge: Edge,
    /// CSS length perpendicular to the edge
    pub extent: String,
    pub z_index: i32,
    pub opacity: f32,
    /// `position: fixed` instead of `absolute`
    pub fixed: bool,
    pub layers: Vec<BlurLayer>,
}

impl BlurOverlay {
    /// Container declarations
    pub fn container_style(&self) -> Vec<(&'static str, String)> {
        let position = if self.fixed { "fixed" } else { "absolute" };
        let mut style = vec![
            ("position", position.to_string()),
            ("pointer-events", "none".to_string()),
            ("z-index", self.z_index.to_string()),
            (self.edge.name(), "0".to_string()),
            ("opacity", self.opacity.to_string()),
        ];

        if self.edge.is_vertical() {
            style.extend([
                ("height", self.extent.clone()),
                ("width", "100%".to_string()),
                ("left", "0".to_string()),
                ("right", "0".to_string()),
            ]);
        } else {
            style.extend([
                ("width", self.extent.clone()),
                ("height", "100%".to_string()),
                ("top", "0".to_string()),
                ("bottom", "0".to_string()),
            ]);
        }
        style
    }
}

/// Blur radius (rem) for a layer at eased `progress`
pub fn layer_blur_radius(progress: f32, div_count: u32, strength: f32, exponential: bool) -> f32 {
    if exponential {
        2f32.powf(progress * 4.0) * BASE_BLUR_REM * strength
    } else {
        BASE_BLUR_REM * (progress * div_count as f32 + 1.0) * strength
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Compute the layer stack, nearest band first
///
/// Layer `i` gets stops at `inc·(i−1)` (transparent), `inc·i` (opaque),
/// `inc·(i+1)` (opaque) and `inc·(i+2)` (transparent) with `inc = 100 /
/// div_count`, rounded to one decimal. The last two are dropped when they
/// fall past 100%.
pub fn compute_layers(
    div_count: u32,
    strength: f32,
    curve: Curve,
    exponential: bool,
    edge: Edge,
) -> Vec<BlurLayer> {
    let increment = 100.0 / div_count as f32;
    let direction = edge.direction();

    (1..=div_count)
        .map(|i| {
            let fi = i as f32;
            let progress = curve.apply(fi / div_count as f32);
            let blur_radius = layer_blur_radius(progress, div_count, strength, exponential);

            let p1 = round_tenth(increment * fi - increment);
            let p2 = round_tenth(increment * fi);
            let p3 = round_tenth(increment * fi + increment);
            let p4 = round_tenth(increment * fi + increment * 2.0);

            let mut mask = MaskGradient::new(direction)
                .with_stop(MaskStop::transparent(p1))
                .with_stop(MaskStop::opaque(p2));
            if p3 <= 100.0 {
                mask = mask.with_stop(MaskStop::opaque(p3));
            }
            if p4 <= 100.0 {
                mask = mask.with_stop(MaskStop::transparent(p4));
            }

            BlurLayer { mask, blur_radius }
        })
        .collect()
}

/// Progressive edge blur
pub struct GradualBlur<H: OverlayHost> {
    overlay: BlurOverlay,
    target: BlurTarget,
    mounted: Option<(H, OverlayId)>,
}

impl<H: OverlayHost> GradualBlur<H> {
    pub fn new(config: GradualBlurConfig) -> Self {
        let strength = if config.strength < 0.0 {
            tracing::warn!("Negative blur strength {}, using 0", config.strength);
            0.0
        } else {
            config.strength
        };

        let layers = compute_layers(
            config.div_count,
            strength,
            config.curve,
            config.exponential,
            config.position,
        );
        let class_name = if config.class_name.is_empty() {
            "gradual-blur".to_string()
        } else {
            format!("gradual-blur {}", config.class_name)
        };

        tracing::debug!(
            layers = layers.len(),
            position = config.position.name(),
            curve = config.curve.name(),
            "gradual blur built"
        );

        Self {
            overlay: BlurOverlay {
                class_name,
                edge: config.position,
                extent: config.height,
                z_index: config.z_index,
                opacity: config.opacity,
                fixed: config.target == BlurTarget::Page,
                layers,
            },
            target: config.target,
            mounted: None,
        }
    }

    pub fn overlay(&self) -> &BlurOverlay {
        &self.overlay
    }

    pub fn layers(&self) -> &[BlurLayer] {
        &self.overlay.layers
    }

    pub fn target(&self) -> BlurTarget {
        self.target
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Mount inside `element`. Only valid for the `parent` target; any other
    /// target logs a warning and leaves the element untouched.
    pub fn attach_to_element(&mut self, mut element: H) -> bool {
        if self.target != BlurTarget::Parent {
            tracing::warn!("Use target \"parent\" to attach gradual blur to a specific element");
            return false;
        }
        element.make_positioned();
        self.mount(element);
        true
    }

    /// Mount over the page root. Only valid for the `page` target.
    pub fn mount_to_page(&mut self, page: H) -> bool {
        if self.target != BlurTarget::Page {
            tracing::warn!("Use target \"page\" to mount gradual blur over the page");
            return false;
        }
        self.mount(page);
        true
    }

    /// Remove the overlay from wherever it is mounted. Idempotent.
    pub fn destroy(&mut self) {
        if let Some((mut host, id)) = self.mounted.take() {
            host.unmount_overlay(id);
            tracing::debug!("gradual blur unmounted");
        }
    }

    fn mount(&mut self, mut host: H) {
        // Re-attaching moves the overlay
        self.destroy();
        let id = host.mount_overlay(&self.overlay);
        self.mounted = Some((host, id));
        tracing::debug!(mount_target = self.target.name(), "gradual blur mounted");
    }
}

impl<H: OverlayHost> Drop for GradualBlur<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
