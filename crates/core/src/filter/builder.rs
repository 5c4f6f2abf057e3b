//! Effect dispatch: one filter graph per [`Effect`] variant.
//!
//! Construction is deterministic. The seed is resolved and the id drawn
//! before [`build_filter_graph`] is called.

use tracing::trace;

use super::{
    ComponentTransfer, DiffuseLighting, DistantLight, FilterGraph, Primitive, TransferFunction,
    Turbulence,
};
use crate::core_types::{
    ChannelTables, Effect, GammaChannelParams, LightingParams, LinearChannelParams, ResolvedNoise,
    GAMMA_SCALE,
};

/// Prefix of every filter id.
pub const FILTER_ID_PREFIX: &str = "perlin_";

/// Length of the random part of a filter id.
pub const ID_LENGTH: usize = 6;

/// Filter id for a random identifier, e.g. `perlin_a1B2c3`.
pub fn filter_id(random_id: &str) -> String {
    format!("{FILTER_ID_PREFIX}{random_id}")
}

/// `url(#id)` fragment reference.
pub fn url_reference(id: &str) -> String {
    format!("url(#{id})")
}

/// Build the filter graph for `effect` on top of the noise stage.
///
/// # Arguments
///
/// * `id` - Filter element id, see [`filter_id`]
/// * `noise` - Noise parameters with the seed already resolved
/// * `effect` - Active effect stage
pub fn build_filter_graph(
    id: impl Into<String>,
    noise: &ResolvedNoise,
    effect: &Effect,
) -> FilterGraph {
    let turbulence = turbulence_node(noise);
    let input = turbulence.result.clone();

    let downstream = match effect {
        Effect::None => None,
        Effect::Discrete(tables) => Some(discrete_transfer(input, tables)),
        Effect::Table(tables) => Some(table_transfer(input, tables)),
        Effect::Linear(params) => Some(linear_transfer(input, params)),
        Effect::Gamma(params) => Some(gamma_transfer(input, params)),
        Effect::Lighting(params) => Some(diffuse_lighting(input, params)),
    };

    let mut primitives = vec![Primitive::Turbulence(turbulence)];
    primitives.extend(downstream);

    let graph = FilterGraph {
        id: id.into(),
        primitives,
    };

    trace!(
        id = %graph.id,
        mode = %effect.mode(),
        primitives = graph.primitives.len(),
        "Built filter graph"
    );

    graph
}

fn turbulence_node(noise: &ResolvedNoise) -> Turbulence {
    Turbulence {
        kind: noise.noise_kind,
        base_frequency_x: noise.frequency_x,
        base_frequency_y: noise.frequency_y,
        num_octaves: noise.octaves,
        seed: noise.seed,
        result: noise.noise_kind.as_svg_str().to_string(),
    }
}

fn discrete_transfer(input: String, tables: &ChannelTables) -> Primitive {
    Primitive::ComponentTransfer(ComponentTransfer {
        input,
        functions: tables.map(|v| TransferFunction::Discrete(v.clone())),
    })
}

fn table_transfer(input: String, tables: &ChannelTables) -> Primitive {
    Primitive::ComponentTransfer(ComponentTransfer {
        input,
        functions: tables.map(|v| TransferFunction::Table(v.clone())),
    })
}

fn linear_transfer(input: String, params: &LinearChannelParams) -> Primitive {
    Primitive::ComponentTransfer(ComponentTransfer {
        input,
        functions: params.map(|p| TransferFunction::Linear {
            slope: p.slope,
            intercept: p.intercept,
        }),
    })
}

/// Gamma controls are `[0, 1]`; the transfer function works in `[0, 10]`.
fn gamma_transfer(input: String, params: &GammaChannelParams) -> Primitive {
    Primitive::ComponentTransfer(ComponentTransfer {
        input,
        functions: params.map(|p| TransferFunction::Gamma {
            amplitude: p.amplitude * GAMMA_SCALE,
            exponent: p.exponent * GAMMA_SCALE,
            offset: 0.0,
        }),
    })
}

fn diffuse_lighting(input: String, params: &LightingParams) -> Primitive {
    Primitive::DiffuseLighting(DiffuseLighting {
        input,
        lighting_color: params.color.clone(),
        surface_scale: params.surface_scale,
        diffuse_constant: params.diffuse_constant,
        light_source: DistantLight {
            azimuth: params.azimuth,
            elevation: params.elevation,
        },
    })
}
