//! Sampled state signature for detecting external modification.
//!
//! Hashing every field each step is too costly, so a fixed set of
//! [`SAMPLE_COUNT`] grid points is drawn once at construction and only
//! those values are hashed. Five fields are tracked: both winds,
//! temperature, mid-level pressure and surface pressure. Surface pressure
//! is sampled at the horizontal projection of the same points.
//!
//! This is probabilistic change detection. A modification that misses
//! every sampled point, or a hash collision, goes unnoticed.

use ndarray::{ArrayView2, ArrayView3};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Number of sampled grid points.
pub const SAMPLE_COUNT: usize = 1000;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Hashed in place of a sample point that lies outside the field.
const OUT_OF_BOUNDS: u64 = 0x7FF8_DEAD_BEEF_0001;

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hashes of the five tracked fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureHashes {
    /// Eastward wind.
    pub eastward_wind: u64,
    /// Northward wind.
    pub northward_wind: u64,
    /// Air temperature.
    pub temperature: u64,
    /// Mid-level air pressure.
    pub pressure: u64,
    /// Surface pressure.
    pub surface_pressure: u64,
}

/// Borrowed views of the tracked fields.
#[derive(Clone, Copy, Debug)]
pub struct TrackedFields<'a> {
    /// Eastward wind, `(lon, lat, level)`.
    pub eastward_wind: ArrayView3<'a, f64>,
    /// Northward wind, `(lon, lat, level)`.
    pub northward_wind: ArrayView3<'a, f64>,
    /// Air temperature, `(lon, lat, level)`.
    pub temperature: ArrayView3<'a, f64>,
    /// Mid-level pressure, `(lon, lat, level)`.
    pub pressure: ArrayView3<'a, f64>,
    /// Surface pressure, `(lon, lat)`.
    pub surface_pressure: ArrayView2<'a, f64>,
}

/// Fixed sample points plus the last stored hashes.
#[derive(Clone, Debug)]
pub struct StateSignature {
    x: Vec<usize>,
    y: Vec<usize>,
    z: Vec<usize>,
    stored: Option<SignatureHashes>,
}

impl StateSignature {
    /// Draw sample points for a `(lon, lat, level)` grid from `seed`.
    ///
    /// No hashes are stored yet, so the first comparison always reports a
    /// modification. All three extents must be positive.
    pub fn new(longitude_count: usize, latitude_count: usize, level_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut draw = |extent: usize| -> Vec<usize> {
            (0..SAMPLE_COUNT)
                .map(|_| rng.random_range(0..extent))
                .collect()
        };
        let x = draw(longitude_count);
        let y = draw(latitude_count);
        let z = draw(level_count);
        Self {
            x,
            y,
            z,
            stored: None,
        }
    }

    /// The stored hashes, if any step has completed.
    pub fn stored(&self) -> Option<SignatureHashes> {
        self.stored
    }

    /// Sample point `i` as `(x, y, z)`.
    pub fn sample_point(&self, i: usize) -> Option<(usize, usize, usize)> {
        Some((*self.x.get(i)?, *self.y.get(i)?, *self.z.get(i)?))
    }

    fn hash_volume(&self, field: &ArrayView3<'_, f64>) -> u64 {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .fold(FNV_OFFSET, |hash, ((&i, &j), &k)| {
                fnv1a_u64(hash, field.get([i, j, k]).map_or(OUT_OF_BOUNDS, |v| v.to_bits()))
            })
    }

    fn hash_surface(&self, field: &ArrayView2<'_, f64>) -> u64 {
        self.x
            .iter()
            .zip(&self.y)
            .fold(FNV_OFFSET, |hash, (&i, &j)| {
                fnv1a_u64(hash, field.get([i, j]).map_or(OUT_OF_BOUNDS, |v| v.to_bits()))
            })
    }

    /// Hash the sampled values of `fields`.
    ///
    /// Sample points outside a view smaller than the grid this signature
    /// was drawn for hash as a fixed marker instead of panicking.
    pub fn compute(&self, fields: &TrackedFields<'_>) -> SignatureHashes {
        SignatureHashes {
            eastward_wind: self.hash_volume(&fields.eastward_wind),
            northward_wind: self.hash_volume(&fields.northward_wind),
            temperature: self.hash_volume(&fields.temperature),
            pressure: self.hash_volume(&fields.pressure),
            surface_pressure: self.hash_surface(&fields.surface_pressure),
        }
    }

    /// Compare `fields` against the stored hashes.
    ///
    /// Returns `true` if any hash differs (or none is stored yet), and in
    /// that case overwrites the stored hashes with the fresh ones.
    pub fn check_and_update(&mut self, fields: &TrackedFields<'_>) -> bool {
        let fresh = self.compute(fields);
        if self.stored == Some(fresh) {
            return false;
        }
        self.stored = Some(fresh);
        true
    }

    /// Record the signature of `fields` for the next comparison.
    pub fn store(&mut self, fields: &TrackedFields<'_>) {
        self.stored = Some(self.compute(fields));
    }

    /// Forget the stored hashes, so the next comparison reports a
    /// modification.
    pub fn clear(&mut self) {
        self.stored = None;
    }
}
