//! One texture invocation, end to end.
//!
//! Resolves the effect and seed, draws a fresh filter id, builds the graph.
//! A texture is rebuilt on every render; nothing is cached between calls.

use rand::Rng;
use tracing::debug;

use crate::core_types::{random_identifier, Effect, NoiseParameters};
use crate::filter::svg::DEFAULT_VIEWPORT;
use crate::filter::{build_filter_graph, filter_id, FilterGraph, ID_LENGTH};
use crate::props::PropertyBag;

/// Noise texture generator.
#[derive(Debug, Clone, PartialEq)]
pub struct PerlinTexture {
    pub noise: NoiseParameters,
    pub effect: Effect,
}

impl PerlinTexture {
    pub fn new(noise: NoiseParameters, effect: Effect) -> Self {
        Self { noise, effect }
    }

    /// Typed texture for a host bag.
    ///
    /// Returns `None` if `effectToggle` is not a known selector.
    pub fn from_props(props: &PropertyBag) -> Option<Self> {
        let Some(effect) = props.effect() else {
            debug!(
                selector = props.effect_toggle,
                "Unrecognized effect selector, nothing to render"
            );
            return None;
        };
        Some(Self::new(props.noise_parameters(), effect))
    }

    /// Render a host bag. `None` means nothing is drawn.
    pub fn render_props(props: &PropertyBag, rng: &mut impl Rng) -> Option<RenderedTexture> {
        Self::from_props(props).map(|texture| texture.render(rng))
    }

    /// Resolve the seed, draw an id, and build the graph.
    pub fn render(&self, rng: &mut impl Rng) -> RenderedTexture {
        let noise = self.noise.resolve(rng);
        let id = filter_id(&random_identifier(ID_LENGTH, rng));

        debug!(
            id = %id,
            mode = %self.effect.mode(),
            seed = noise.seed,
            randomized = self.noise.randomize_seed,
            "Rendering noise texture"
        );

        RenderedTexture {
            graph: build_filter_graph(id, &noise, &self.effect),
            seed: noise.seed,
        }
    }
}

/// Output of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTexture {
    graph: FilterGraph,
    seed: f64,
}

impl RenderedTexture {
    pub fn graph(&self) -> &FilterGraph {
        &self.graph
    }

    /// Seed written to `feTurbulence`.
    pub fn seed(&self) -> f64 {
        self.seed
    }

    pub fn id(&self) -> &str {
        self.graph.id()
    }

    /// `<filter>` and `<rect>` markup.
    pub fn markup(&self) -> String {
        self.graph.to_svg_fragment()
    }

    /// Standalone `<svg>` document at the default 200×200 viewport.
    pub fn document(&self) -> String {
        self.graph.to_svg_document(DEFAULT_VIEWPORT, DEFAULT_VIEWPORT)
    }

    pub fn into_graph(self) -> FilterGraph {
        self.graph
    }
}
