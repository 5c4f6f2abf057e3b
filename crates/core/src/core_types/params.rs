//! Typed texture parameters
//!
//! The host hands over one flat property bag (see [`crate::props`]). It is
//! projected into the types in this module before any markup is built:
//! [`NoiseParameters`] for the noise stage and an [`Effect`] that carries
//! only the fields its mode reads.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::random::uniform;

/// Lower bound (inclusive) of a randomly drawn seed.
pub const RANDOM_SEED_MIN: f64 = 1.0;

/// Upper bound (exclusive) of a randomly drawn seed.
pub const RANDOM_SEED_MAX: f64 = 10_000.0;

/// Most values a host may place in one channel table.
///
/// Enforced by the host panel; longer tables are passed through unchanged.
pub const MAX_TABLE_VALUES: usize = 5;

/// Factor between the gamma controls (`[0, 1]`) and the values written to
/// the transfer function (`[0, 10]`).
pub const GAMMA_SCALE: f64 = 10.0;

// ============================================================================
// NOISE
// ============================================================================

/// Noise function of the `feTurbulence` primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoiseKind {
    #[default]
    #[serde(rename = "turbulence")]
    Turbulence,
    #[serde(rename = "fractalNoise")]
    FractalNoise,
}

impl NoiseKind {
    /// Value of the SVG `type` attribute.
    pub fn as_svg_str(self) -> &'static str {
        match self {
            NoiseKind::Turbulence => "turbulence",
            NoiseKind::FractalNoise => "fractalNoise",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_svg_str())
    }
}

/// Noise stage parameters as configured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    pub noise_kind: NoiseKind,
    /// Base frequency along X.
    pub frequency_x: f64,
    /// Base frequency along Y.
    pub frequency_y: f64,
    /// `numOctaves`; 0 is passed through to the renderer.
    pub octaves: u32,
    /// Seed used when `randomize_seed` is false.
    pub seed: f64,
    /// Draw a fresh seed in `[1, 10000)` on every resolution.
    pub randomize_seed: bool,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            noise_kind: NoiseKind::Turbulence,
            frequency_x: 0.01,
            frequency_y: 0.01,
            octaves: 3,
            seed: 1.0,
            randomize_seed: true,
        }
    }
}

impl NoiseParameters {
    /// Resolve the effective seed.
    ///
    /// This is the only step of graph construction that consumes
    /// randomness. Everything downstream of [`ResolvedNoise`] is
    /// deterministic.
    pub fn resolve(&self, rng: &mut impl Rng) -> ResolvedNoise {
        let seed = if self.randomize_seed {
            uniform(RANDOM_SEED_MIN, RANDOM_SEED_MAX, rng)
        } else {
            self.seed
        };

        ResolvedNoise {
            noise_kind: self.noise_kind,
            frequency_x: self.frequency_x,
            frequency_y: self.frequency_y,
            octaves: self.octaves,
            seed,
        }
    }
}

/// Noise parameters with the seed fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNoise {
    pub noise_kind: NoiseKind,
    pub frequency_x: f64,
    pub frequency_y: f64,
    pub octaves: u32,
    pub seed: f64,
}

// ============================================================================
// CHANNELS
// ============================================================================

/// One of the four color channels a transfer function can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// Channels in document order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Name of the `feFunc*` element for this channel.
    pub fn element_name(self) -> &'static str {
        match self {
            Channel::Red => "feFuncR",
            Channel::Green => "feFuncG",
            Channel::Blue => "feFuncB",
            Channel::Alpha => "feFuncA",
        }
    }
}

/// A value per RGBA channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Channels<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
    pub alpha: T,
}

impl<T> Channels<T> {
    pub fn new(red: T, green: T, blue: T, alpha: T) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Build from an `[r, g, b, a]` array.
    pub fn from_array([red, green, blue, alpha]: [T; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }

    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Alpha => &self.alpha,
        }
    }

    /// Channel/value pairs in R, G, B, A order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Channels<U> {
        Channels {
            red: f(&self.red),
            green: f(&self.green),
            blue: f(&self.blue),
            alpha: f(&self.alpha),
        }
    }
}

/// Lookup tables for the discrete and table effects, values in `[0, 1]`.
pub type ChannelTables = Channels<Vec<f64>>;

/// `C' = slope * C + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearTransfer {
    pub slope: f64,
    pub intercept: f64,
}

pub type LinearChannelParams = Channels<LinearTransfer>;

/// Gamma controls in the raw `[0, 1]` range.
///
/// Scaled by [`GAMMA_SCALE`] when the transfer function is built.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GammaTransfer {
    pub amplitude: f64,
    pub exponent: f64,
}

pub type GammaChannelParams = Channels<GammaTransfer>;

// ============================================================================
// LIGHTING
// ============================================================================

/// Diffuse lighting with a single distant light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingParams {
    /// Any CSS color the renderer accepts, e.g. `#FFFFFF`.
    pub color: String,
    pub surface_scale: f64,
    pub diffuse_constant: f64,
    /// Degrees.
    pub azimuth: f64,
    /// Degrees.
    pub elevation: f64,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            surface_scale: 20.0,
            diffuse_constant: 1.0,
            azimuth: 40.0,
            elevation: 60.0,
        }
    }
}

// ============================================================================
// EFFECT
// ============================================================================

/// Host-facing effect selector. Discriminants are the host's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EffectMode {
    None = 1,
    Discrete = 2,
    Table = 3,
    Linear = 4,
    Gamma = 5,
    Lighting = 6,
}

impl EffectMode {
    pub const ALL: [EffectMode; 6] = [
        EffectMode::None,
        EffectMode::Discrete,
        EffectMode::Table,
        EffectMode::Linear,
        EffectMode::Gamma,
        EffectMode::Lighting,
    ];

    /// Map the host selector. Anything outside `1..=6` selects nothing.
    pub fn from_selector(selector: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.selector() == selector)
    }

    pub fn selector(self) -> i64 {
        i64::from(self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectMode::None => "none",
            EffectMode::Discrete => "discrete",
            EffectMode::Table => "table",
            EffectMode::Linear => "linear",
            EffectMode::Gamma => "gamma",
            EffectMode::Lighting => "lighting",
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The active effect stage with only the parameters it consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Raw noise.
    None,
    /// Step-function lookup per channel.
    Discrete(ChannelTables),
    /// Interpolated lookup per channel.
    Table(ChannelTables),
    Linear(LinearChannelParams),
    Gamma(GammaChannelParams),
    Lighting(LightingParams),
}

impl Effect {
    pub fn mode(&self) -> EffectMode {
        match self {
            Effect::None => EffectMode::None,
            Effect::Discrete(_) => EffectMode::Discrete,
            Effect::Table(_) => EffectMode::Table,
            Effect::Linear(_) => EffectMode::Linear,
            Effect::Gamma(_) => EffectMode::Gamma,
            Effect::Lighting(_) => EffectMode::Lighting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_selector_round_trip() {
        for mode in EffectMode::ALL {
            assert_eq!(EffectMode::from_selector(mode.selector()), Some(mode));
        }
    }

    #[test]
    fn test_unknown_selector_selects_nothing() {
        for selector in [-1, 0, 7, 42] {
            assert_eq!(EffectMode::from_selector(selector), None);
        }
    }

    #[test]
    fn test_manual_seed_passes_through() {
        let params = NoiseParameters {
            seed: 17.0,
            randomize_seed: false,
            ..NoiseParameters::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(params.resolve(&mut rng).seed, 17.0);
    }

    #[test]
    fn test_random_seed_in_range() {
        let params = NoiseParameters {
            seed: 17.0,
            randomize_seed: true,
            ..NoiseParameters::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let seed = params.resolve(&mut rng).seed;
            assert!((RANDOM_SEED_MIN..RANDOM_SEED_MAX).contains(&seed));
        }
    }

    #[test]
    fn test_channels_iterate_in_rgba_order() {
        let channels = Channels::from_array([1, 2, 3, 4]);
        let order: Vec<(Channel, i32)> = channels.iter().map(|(c, v)| (c, *v)).collect();
        assert_eq!(
            order,
            vec![
                (Channel::Red, 1),
                (Channel::Green, 2),
                (Channel::Blue, 3),
                (Channel::Alpha, 4)
            ]
        );
    }

    #[test]
    fn test_effect_reports_its_mode() {
        assert_eq!(Effect::None.mode(), EffectMode::None);
        assert_eq!(
            Effect::Lighting(LightingParams::default()).mode(),
            EffectMode::Lighting
        );
        assert_eq!(
            Effect::Table(ChannelTables::default()).mode(),
            EffectMode::Table
        );
    }
}
