//! Random value helpers
//!
//! Every function takes the random source as `&mut impl Rng` so callers can
//! pass `rand::rng()` in production and a seeded `StdRng` in tests.

use rand::Rng;

/// Alphabet of [`random_identifier`]: `A-Z`, `a-z`, `0-9`.
pub const IDENTIFIER_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Uniformly distributed value in `[min, max)`.
///
/// Computed by scaling a unit draw instead of `random_range`, so a
/// degenerate range (`min == max`) returns `min` rather than panicking.
pub fn uniform(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    rng.random::<f64>() * (max - min) + min
}

/// Random identifier of `length` alphanumeric characters.
///
/// Characters are drawn with replacement from [`IDENTIFIER_ALPHABET`].
/// Used to namespace filter ids so several textures rendered on the same
/// canvas never reference each other's filters.
pub fn random_identifier(length: usize, rng: &mut impl Rng) -> String {
    let symbols = IDENTIFIER_ALPHABET.as_bytes();
    (0..length)
        .map(|_| char::from(symbols[rng.random_range(0..symbols.len())]))
        .collect()
}
