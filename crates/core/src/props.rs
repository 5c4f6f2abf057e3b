//! Host property bag
//!
//! Flat set of controls exactly as the design tool's property panel hands
//! them over. Field names follow the panel (`perlinType`, `effectToggle`,
//! ...), so a bag can be deserialized directly from the host's JSON.
//! Missing fields fall back to the panel defaults.

use serde::{Deserialize, Serialize};

use crate::core_types::{
    Channels, Effect, EffectMode, GammaTransfer, LightingParams, LinearTransfer, NoiseKind,
    NoiseParameters,
};

/// Flat host parameters. Only the fields of the selected effect are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyBag {
    /// `true` selects turbulence, `false` fractal noise.
    pub perlin_type: bool,
    /// Effect selector, `1..=6`.
    pub effect_toggle: i64,

    pub lighting_color: String,
    pub lighting_scale: f64,
    pub diffuse_constant: f64,
    pub azimuth: f64,
    pub elevation: f64,

    pub x_frequency: f64,
    pub y_frequency: f64,
    pub octave_turb: u32,
    /// `true` draws a random seed on every render.
    pub seed_toggle: bool,
    pub seed_turb: f64,

    pub red_table: Vec<f64>,
    pub green_table: Vec<f64>,
    pub blue_table: Vec<f64>,
    pub alpha_table: Vec<f64>,

    pub rgba_slope: [f64; 4],
    pub rgba_intercept: [f64; 4],
    pub rgba_amplitude: [f64; 4],
    pub rgba_exponent: [f64; 4],
}

impl Default for PropertyBag {
    fn default() -> Self {
        let noise = NoiseParameters::default();
        let lighting = LightingParams::default();

        Self {
            perlin_type: true,
            effect_toggle: EffectMode::None.selector(),

            lighting_color: lighting.color,
            lighting_scale: lighting.surface_scale,
            diffuse_constant: lighting.diffuse_constant,
            azimuth: lighting.azimuth,
            elevation: lighting.elevation,

            x_frequency: noise.frequency_x,
            y_frequency: noise.frequency_y,
            octave_turb: noise.octaves,
            seed_toggle: noise.randomize_seed,
            seed_turb: noise.seed,

            red_table: vec![0.0, 0.5, 0.25],
            green_table: vec![0.0, 0.75, 0.25],
            blue_table: vec![0.25, 0.75, 0.0],
            alpha_table: vec![1.0, 1.0, 1.0],

            rgba_slope: [0.5, 0.5, 0.5, 0.5],
            rgba_intercept: [0.0, 0.0, 0.0, 0.5],
            rgba_amplitude: [0.5, 0.5, 0.5, 1.0],
            rgba_exponent: [0.5, 0.5, 0.5, 0.0],
        }
    }
}

impl PropertyBag {
    /// Parse a bag from the host's JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError::ParseFailed`] if the JSON is malformed or a
    /// field has the wrong type (e.g. `rgbaSlope` with other than 4 values).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Serialize the bag back into host JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError::SerializeFailed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::SerializeFailed(e.to_string()))
    }

    pub fn noise_kind(&self) -> NoiseKind {
        if self.perlin_type {
            NoiseKind::Turbulence
        } else {
            NoiseKind::FractalNoise
        }
    }

    pub fn noise_parameters(&self) -> NoiseParameters {
        NoiseParameters {
            noise_kind: self.noise_kind(),
            frequency_x: self.x_frequency,
            frequency_y: self.y_frequency,
            octaves: self.octave_turb,
            seed: self.seed_turb,
            randomize_seed: self.seed_toggle,
        }
    }

    /// Selected mode, `None` for selectors outside `1..=6`.
    pub fn effect_mode(&self) -> Option<EffectMode> {
        EffectMode::from_selector(self.effect_toggle)
    }

    /// Project the fields the selected mode uses.
    ///
    /// Returns `None` for an unrecognized selector: nothing is rendered.
    pub fn effect(&self) -> Option<Effect> {
        let effect = match self.effect_mode()? {
            EffectMode::None => Effect::None,
            EffectMode::Discrete => Effect::Discrete(self.channel_tables()),
            EffectMode::Table => Effect::Table(self.channel_tables()),
            EffectMode::Linear => Effect::Linear(self.linear_params()),
            EffectMode::Gamma => Effect::Gamma(self.gamma_params()),
            EffectMode::Lighting => Effect::Lighting(self.lighting_params()),
        };
        Some(effect)
    }

    fn channel_tables(&self) -> Channels<Vec<f64>> {
        Channels::new(
            self.red_table.clone(),
            self.green_table.clone(),
            self.blue_table.clone(),
            self.alpha_table.clone(),
        )
    }

    fn linear_params(&self) -> Channels<LinearTransfer> {
        Channels::from_array(std::array::from_fn(|i| LinearTransfer {
            slope: self.rgba_slope[i],
            intercept: self.rgba_intercept[i],
        }))
    }

    fn gamma_params(&self) -> Channels<GammaTransfer> {
        Channels::from_array(std::array::from_fn(|i| GammaTransfer {
            amplitude: self.rgba_amplitude[i],
            exponent: self.rgba_exponent[i],
        }))
    }

    fn lighting_params(&self) -> LightingParams {
        LightingParams {
            color: self.lighting_color.clone(),
            surface_scale: self.lighting_scale,
            diffuse_constant: self.diffuse_constant,
            azimuth: self.azimuth,
            elevation: self.elevation,
        }
    }
}

/// Property bag loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to parse host JSON
    ParseFailed(String),
    /// Failed to serialize the bag
    SerializeFailed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse properties: {msg}"),
            ConfigError::SerializeFailed(msg) => {
                write!(f, "Failed to serialize properties: {msg}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let bag = PropertyBag::from_json("{}").unwrap();
        assert_eq!(bag, PropertyBag::default());
    }

    #[test]
    fn test_host_field_names() {
        let bag = PropertyBag::from_json(
            r#"{
                "perlinType": false,
                "effectToggle": 4,
                "xFrequency": 0.03,
                "octaveTurb": 5,
                "seedToggle": false,
                "seedTurb": 250,
                "rgbaSlope": [1, 2, 3, 4]
            }"#,
        )
        .unwrap();

        assert_eq!(bag.noise_kind(), NoiseKind::FractalNoise);
        assert_eq!(bag.effect_mode(), Some(EffectMode::Linear));
        let noise = bag.noise_parameters();
        assert_eq!(noise.frequency_x, 0.03);
        assert_eq!(noise.frequency_y, 0.01);
        assert_eq!(noise.octaves, 5);
        assert_eq!(noise.seed, 250.0);
        assert!(!noise.randomize_seed);
        assert_eq!(bag.rgba_slope, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_wrong_array_length_is_parse_error() {
        let err = PropertyBag::from_json(r#"{"rgbaSlope": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
        assert!(err.to_string().starts_with("Failed to parse properties"));
    }

    #[test]
    fn test_json_round_trip_keeps_host_names() {
        let json = PropertyBag::default().to_json().unwrap();
        assert!(json.contains("\"effectToggle\":1"));
        assert!(json.contains("\"lightingColor\":\"#FFFFFF\""));
    }

    #[test]
    fn test_effect_projects_selected_fields() {
        let bag = PropertyBag {
            effect_toggle: 5,
            rgba_amplitude: [0.1, 0.2, 0.3, 0.4],
            rgba_exponent: [0.9, 0.8, 0.7, 0.6],
            ..PropertyBag::default()
        };

        match bag.effect() {
            Some(Effect::Gamma(params)) => {
                assert_eq!(params.blue.amplitude, 0.3);
                assert_eq!(params.blue.exponent, 0.7);
            }
            other => panic!("expected gamma, got {other:?}"),
        }
    }

    #[test]
    fn test_effect_modes_from_selector() {
        let expected = [
            (1, EffectMode::None),
            (2, EffectMode::Discrete),
            (3, EffectMode::Table),
            (4, EffectMode::Linear),
            (5, EffectMode::Gamma),
            (6, EffectMode::Lighting),
        ];
        for (selector, mode) in expected {
            let bag = PropertyBag {
                effect_toggle: selector,
                ..PropertyBag::default()
            };
            assert_eq!(bag.effect().map(|e| e.mode()), Some(mode));
        }
    }

    #[test]
    fn test_unknown_selector_has_no_effect() {
        for selector in [0, 7] {
            let bag = PropertyBag {
                effect_toggle: selector,
                ..PropertyBag::default()
            };
            assert!(bag.effect().is_none());
        }
    }
}
