//! Effect descriptors attached to clips.
//!
//! Effects are opaque to the timeline: a kind tag plus named numeric
//! parameters. Rendering them is the compositor's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Brightness,
    Contrast,
    Saturation,
    Exposure,
    Temperature,
    Hue,
    Sepia,
    Monochrome,
    Blur,
    Sharpen,
    Vignette,
    Noise,
    Glow,
    ChromaKey,
    LumaKey,
}

impl EffectKind {
    /// Parameters a freshly created effect of this kind starts with.
    pub fn default_parameters(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation | Self::Exposure => {
                &[("amount", 0.0)]
            }
            Self::Temperature => &[("kelvin", 6500.0), ("tint", 0.0)],
            Self::Hue => &[("degrees", 0.0)],
            Self::Sepia | Self::Monochrome => &[("intensity", 1.0)],
            Self::Blur => &[("radius", 10.0)],
            Self::Sharpen => &[("amount", 0.5)],
            Self::Vignette => &[("intensity", 0.5), ("radius", 0.75)],
            Self::Noise => &[("amount", 0.1)],
            Self::Glow => &[("intensity", 0.5), ("radius", 8.0)],
            Self::ChromaKey => &[
                ("keyRed", 0.0),
                ("keyGreen", 1.0),
                ("keyBlue", 0.0),
                ("threshold", 0.4),
                ("smoothness", 0.1),
            ],
            Self::LumaKey => &[("threshold", 0.1), ("smoothness", 0.1)],
        }
    }
}

/// An effect instance on a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// Effect type
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Named parameter values
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// Disabled effects stay in the chain but are skipped
    pub is_enabled: bool,
}

impl Effect {
    /// Create an enabled effect populated with the kind's default parameters.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            parameters: kind
                .default_parameters()
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            is_enabled: true,
        }
    }

    /// Builder-style parameter override.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Read a parameter.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// Set a parameter, returning the previous value.
    pub fn set_param(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.parameters.insert(name.into(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_effect_has_defaults() {
        let blur = Effect::new(EffectKind::Blur);
        assert!(blur.is_enabled);
        assert_eq!(blur.param("radius"), Some(10.0));
        assert_eq!(blur.param("missing"), None);
    }

    #[test]
    fn test_set_param_returns_previous() {
        let mut fx = Effect::new(EffectKind::Vignette).with_param("feather", 0.2);
        assert_eq!(fx.set_param("intensity", 0.9), Some(0.5));
        assert_eq!(fx.param("intensity"), Some(0.9));
        assert_eq!(fx.param("feather"), Some(0.2));
    }

    #[test]
    fn test_serializes_type_tag() {
        let fx = Effect::new(EffectKind::ChromaKey);
        let json = serde_json::to_value(&fx).unwrap();
        assert_eq!(json["type"], "chromaKey");
        assert_eq!(json["isEnabled"], true);
        assert_eq!(json["parameters"]["threshold"], 0.4);
    }
}
