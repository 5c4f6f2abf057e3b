//! C ABI for the noise texture generator.
//!
//! Hosts pass their property bag as JSON and receive SVG markup as a
//! heap-allocated C string, released with `perlin_texture_string_free`.
//! Failures return a `PerlinTextureErrorCode`; the matching message is
//! available from `perlin_texture_get_last_error` on the same thread.

mod error;
mod helpers;
mod render;

pub use error::{
    perlin_texture_get_last_error, perlin_texture_get_last_error_code, PerlinTextureErrorCode,
};
pub use render::{
    perlin_texture_jitter, perlin_texture_random_identifier, perlin_texture_render_json,
    perlin_texture_string_free, PerlinTextureJitterPolicy,
};
