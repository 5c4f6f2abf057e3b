//! SVG filter graph model
//!
//! A [`FilterGraph`] is the output of one texture invocation: a noise
//! primitive, optionally followed by a channel transfer or lighting stage,
//! wrapped in a `<filter>` with a collision-free id.

pub mod builder;
pub mod svg;

pub use builder::{build_filter_graph, filter_id, url_reference, FILTER_ID_PREFIX, ID_LENGTH};

use crate::core_types::{Channel, Channels, NoiseKind};

/// A complete filter definition and the id it is referenced by.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    pub(crate) id: String,
    pub(crate) primitives: Vec<Primitive>,
}

impl FilterGraph {
    /// Filter element id, e.g. `perlin_a1B2c3`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `url(#id)` value used by the covering rectangle.
    pub fn reference(&self) -> String {
        url_reference(&self.id)
    }

    /// Primitives in evaluation order. The first one is always the noise.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The noise primitive every graph starts with.
    pub fn turbulence(&self) -> Option<&Turbulence> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Turbulence(t) => Some(t),
            _ => None,
        })
    }

    pub fn component_transfer(&self) -> Option<&ComponentTransfer> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::ComponentTransfer(ct) => Some(ct),
            _ => None,
        })
    }

    pub fn diffuse_lighting(&self) -> Option<&DiffuseLighting> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::DiffuseLighting(dl) => Some(dl),
            _ => None,
        })
    }
}

/// A filter primitive element.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Turbulence(Turbulence),
    ComponentTransfer(ComponentTransfer),
    DiffuseLighting(DiffuseLighting),
}

impl Primitive {
    /// SVG element name.
    pub fn element_name(&self) -> &'static str {
        match self {
            Primitive::Turbulence(_) => "feTurbulence",
            Primitive::ComponentTransfer(_) => "feComponentTransfer",
            Primitive::DiffuseLighting(_) => "feDiffuseLighting",
        }
    }
}

/// `feTurbulence` element in the SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct Turbulence {
    pub kind: NoiseKind,
    pub base_frequency_x: f64,
    pub base_frequency_y: f64,
    pub num_octaves: u32,
    pub seed: f64,
    /// Name downstream primitives use as their `in`.
    pub result: String,
}

impl Turbulence {
    /// `baseFrequency` attribute: `"x y"`.
    pub fn base_frequency(&self) -> String {
        format!("{} {}", self.base_frequency_x, self.base_frequency_y)
    }
}

/// `feComponentTransfer` element in the SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTransfer {
    pub input: String,
    pub functions: Channels<TransferFunction>,
}

impl ComponentTransfer {
    /// `feFuncR` / `feFuncG` / `feFuncB` / `feFuncA` in the SVG.
    pub fn function(&self, channel: Channel) -> &TransferFunction {
        self.functions.get(channel)
    }
}

/// A transfer function used by [`ComponentTransfer`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransferFunction {
    /// Step function. The list can be empty.
    Discrete(Vec<f64>),

    /// Linear interpolation between table values. The list can be empty.
    Table(Vec<f64>),

    Linear { slope: f64, intercept: f64 },

    Gamma {
        amplitude: f64,
        exponent: f64,
        offset: f64,
    },
}

impl TransferFunction {
    /// `type` attribute of the `feFunc*` element.
    pub fn kind_str(&self) -> &'static str {
        match self {
            TransferFunction::Discrete(_) => "discrete",
            TransferFunction::Table(_) => "table",
            TransferFunction::Linear { .. } => "linear",
            TransferFunction::Gamma { .. } => "gamma",
        }
    }
}

/// `feDiffuseLighting` element in the SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuseLighting {
    pub input: String,
    pub lighting_color: String,
    pub surface_scale: f64,
    pub diffuse_constant: f64,
    pub light_source: DistantLight,
}

/// `feDistantLight` element in the SVG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistantLight {
    /// Direction on the XY plane, degrees clockwise from the x axis.
    pub azimuth: f64,
    /// Direction from the XY plane towards the z axis, in degrees.
    pub elevation: f64,
}
