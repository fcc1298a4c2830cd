//! Effect configuration
//!
//! Every option is optional and falls back to a documented default. Named
//! options (curves, trigger modes, directions, edges, targets) are resolved to
//! their enum once, at load time; unknown names log a warning and take the
//! option's default rather than failing.
//!
//! ```toml
//! [spark]
//! spark_color = "#ff00aa"
//! spark_count = 12
//!
//! [text]
//! animate_on = "both"
//! sequential = true
//! reveal_direction = "center"
//!
//! [blur]
//! position = "top"
//! curve = "bezier"
//! ```

use std::fs;
use std::path::Path;

use glint_animation::Curve;
use serde::{Deserialize, Deserializer, Serialize};

use crate::decrypted_text::{RevealDirection, TriggerMode};
use crate::error::{ConfigError, Result};
use crate::gradual_blur::{BlurTarget, Edge};

/// Default scramble alphabet
pub const DEFAULT_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// An option selected by name in configuration
pub trait NamedOption: Sized + Copy {
    /// Option kind, used in diagnostics
    const KIND: &'static str;

    fn from_name(name: &str) -> Option<Self>;

    fn name(&self) -> &'static str;
}

macro_rules! named_option {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl NamedOption for $ty {
                const KIND: &'static str = $kind;

                fn from_name(name: &str) -> Option<Self> {
                    <$ty>::from_name(name)
                }

                fn name(&self) -> &'static str {
                    <$ty>::name(self)
                }
            }
        )*
    };
}

named_option! {
    Curve => "curve",
    TriggerMode => "trigger mode",
    RevealDirection => "reveal direction",
    Edge => "position",
    BlurTarget => "target",
}

/// Resolve a name, falling back to `fallback` for unknown names
pub fn resolve_named<T: NamedOption>(name: &str, fallback: T) -> T {
    T::from_name(name).unwrap_or_else(|| {
        tracing::warn!(
            "Unknown {} '{}', using '{}'",
            T::KIND,
            name,
            fallback.name()
        );
        fallback
    })
}

/// Serde adapter for [`NamedOption`] fields
mod named {
    use super::{resolve_named, NamedOption};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, T: NamedOption>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.name())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: NamedOption + Default,
    {
        resolve(deserializer, T::default())
    }

    pub fn resolve<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: NamedOption,
    {
        let name = String::deserialize(deserializer)?;
        Ok(resolve_named(&name, fallback))
    }
}

/// Sparks default to ease-out rather than the linear curve default
fn spark_easing<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Curve, D::Error> {
    named::resolve(deserializer, Curve::EaseOut)
}

/// Click spark options
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClickSparkConfig {
    /// CSS hex color of each spark line
    pub spark_color: String,
    /// Line length at the moment of the click
    pub spark_size: f32,
    /// Travel distance at the end of the animation
    pub spark_radius: f32,
    /// Sparks emitted per click
    pub spark_count: u32,
    pub duration_ms: f64,
    #[serde(
        serialize_with = "named::serialize",
        deserialize_with = "spark_easing"
    )]
    pub easing: Curve,
    /// Multiplier on the travel distance
    pub extra_scale: f32,
    pub line_width: f32,
}

impl Default for ClickSparkConfig {
    fn default() -> Self {
        Self {
            spark_color: "#00ffff".to_string(),
            spark_size: 10.0,
            spark_radius: 15.0,
            spark_count: 8,
            duration_ms: 400.0,
            easing: Curve::EaseOut,
            extra_scale: 1.0,
            line_width: 2.0,
        }
    }
}

/// Decrypted text options
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecryptedTextConfig {
    /// Interval between scramble ticks
    pub speed_ms: f64,
    /// Ticks before a simultaneous scramble settles
    pub max_iterations: u32,
    /// Alphabet scrambled characters are drawn from
    pub characters: String,
    #[serde(with = "named")]
    pub animate_on: TriggerMode,
    /// Reveal one character per tick instead of scrambling everything
    pub sequential: bool,
    #[serde(with = "named")]
    pub reveal_direction: RevealDirection,
    /// Visible fraction that counts as "in view"
    pub view_threshold: f32,
}

impl Default for DecryptedTextConfig {
    fn default() -> Self {
        Self {
            speed_ms: 50.0,
            max_iterations: 10,
            characters: DEFAULT_CHARACTERS.to_string(),
            animate_on: TriggerMode::Hover,
            sequential: false,
            reveal_direction: RevealDirection::Start,
            view_threshold: 0.1,
        }
    }
}

/// Gradual blur options
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GradualBlurConfig {
    /// Edge the blur is anchored to
    #[serde(with = "named")]
    pub position: Edge,
    pub strength: f32,
    /// CSS extent perpendicular to the edge
    pub height: String,
    /// Number of stacked blur layers
    pub div_count: u32,
    pub exponential: bool,
    pub z_index: i32,
    pub opacity: f32,
    #[serde(with = "named")]
    pub curve: Curve,
    #[serde(with = "named")]
    pub target: BlurTarget,
    /// Extra class names appended to the container
    pub class_name: String,
}

impl Default for GradualBlurConfig {
    fn default() -> Self {
        Self {
            position: Edge::Bottom,
            strength: 2.0,
            height: "6rem".to_string(),
            div_count: 5,
            exponential: false,
            z_index: 1000,
            opacity: 1.0,
            curve: Curve::Linear,
            target: BlurTarget::Parent,
            class_name: String::new(),
        }
    }
}

/// Options for all effects, as stored in `glint.toml`
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub spark: ClickSparkConfig,
    pub text: DecryptedTextConfig,
    pub blur: GradualBlurConfig,
}

impl EffectsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded effect config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EffectsConfig::from_toml_str("").unwrap();
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.spark.easing, Curve::EaseOut);
        assert_eq!(config.blur.curve, Curve::Linear);
        assert_eq!(config.text.characters, DEFAULT_CHARACTERS);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EffectsConfig::from_toml_str(
            r#"
            [spark]
            spark_count = 12
            easing = "ease-in-out"

            [text]
            animate_on = "both"
            reveal_direction = "center"
            sequential = true

            [blur]
            position = "left"
            target = "page"
            curve = "bezier"
            "#,
        )
        .unwrap();

        assert_eq!(config.spark.spark_count, 12);
        assert_eq!(config.spark.easing, Curve::EaseInOut);
        assert_eq!(config.spark.spark_radius, 15.0);
        assert_eq!(config.text.animate_on, TriggerMode::Both);
        assert_eq!(config.text.reveal_direction, RevealDirection::Center);
        assert!(config.text.sequential);
        assert_eq!(config.text.speed_ms, 50.0);
        assert_eq!(config.blur.position, Edge::Left);
        assert_eq!(config.blur.target, BlurTarget::Page);
        assert_eq!(config.blur.curve, Curve::Bezier);
        assert_eq!(config.blur.div_count, 5);
    }

    #[test]
    fn unknown_names_fall_back_to_component_defaults() {
        let config = EffectsConfig::from_toml_str(
            r#"
            [spark]
            easing = "elastic"

            [text]
            animate_on = "scroll"
            reveal_direction = "sideways"

            [blur]
            position = "middle"
            curve = "cubic"
            target = "window"
            "#,
        )
        .unwrap();

        assert_eq!(config.spark.easing, Curve::EaseOut);
        assert_eq!(config.text.animate_on, TriggerMode::Hover);
        assert_eq!(config.text.reveal_direction, RevealDirection::Start);
        assert_eq!(config.blur.position, Edge::Bottom);
        assert_eq!(config.blur.curve, Curve::Linear);
        assert_eq!(config.blur.target, BlurTarget::Parent);
    }

    #[test]
    fn wrong_value_types_are_parse_errors() {
        let err = EffectsConfig::from_toml_str("[spark]\nspark_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_round_trip_preserves_names() {
        let mut config = EffectsConfig::default();
        config.text.reveal_direction = RevealDirection::End;
        config.blur.curve = Curve::EaseInOut;

        let text = config.to_toml().unwrap();
        assert!(text.contains("reveal_direction = \"end\""));
        assert!(text.contains("curve = \"ease-in-out\""));
        assert_eq!(EffectsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EffectsConfig::load(Path::new("/nonexistent/glint.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/glint.toml"));
    }
}
