//! Perlin Texture Core Library
//!
//! Builds parameterized SVG filter graphs for a design tool's noise texture
//! component: an `feTurbulence` noise stage optionally followed by an RGBA
//! channel transfer (discrete, table, linear, gamma) or diffuse lighting.
//!
//! The noise itself is computed by the renderer. This crate only emits the
//! primitives and their parameters.
//!
//! ## Usage
//!
//! ```
//! use perlin_texture_core::{PerlinTexture, PropertyBag};
//!
//! let props = PropertyBag::from_json(r#"{"effectToggle": 6}"#).unwrap();
//! let rendered = PerlinTexture::render_props(&props, &mut rand::rng()).unwrap();
//! assert!(rendered.markup().contains("feDiffuseLighting"));
//! ```
//!
//! Randomness (seed substitution and filter ids) is injected through
//! `&mut impl rand::Rng`; graph construction itself is deterministic.

// Core types and utilities
pub mod core_types;

// Filter graph model, effect dispatch and markup
pub mod filter;

// Host-facing parameters and rendering
pub mod props;
pub mod texture;

// Re-export core types
pub use core_types::{apply_jitter, random_identifier, uniform, JitterPolicy};
pub use core_types::{Effect, EffectMode, NoiseKind, NoiseParameters, ResolvedNoise};

// Re-export filter types
pub use filter::{build_filter_graph, FilterGraph, Primitive, TransferFunction};

// Re-export host types
pub use props::{ConfigError, PropertyBag};
pub use texture::{PerlinTexture, RenderedTexture};
