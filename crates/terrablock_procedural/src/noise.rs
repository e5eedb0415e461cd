//! # Simplex Noise Field
//!
//! Coherent 2D/3D noise for terrain heights and ore veins.
//!
//! ## Determinism Guarantee
//!
//! The permutation table is drawn from a `SeedGenerator` at construction.
//! After that, every sample is a pure function of its input coordinates,
//! so the same seed always yields the same field.

use crate::seed::SeedGenerator;

/// Pre-computed permutation table for noise.
///
/// Filled once from the seed stream and reused for every sample.
#[derive(Clone, Debug)]
struct PermutationTable {
    /// 512-entry table (256 drawn entries, doubled to avoid index wrapping).
    perm: [u8; 512],
}

impl PermutationTable {
    /// 12 gradient vectors: midpoints of the edges of a cube.
    const GRAD3: [[i8; 3]; 12] = [
        [1, 1, 0], [-1, 1, 0], [1, -1, 0], [-1, -1, 0],
        [1, 0, 1], [-1, 0, 1], [1, 0, -1], [-1, 0, -1],
        [0, 1, 1], [0, -1, 1], [0, 1, -1], [0, -1, -1],
    ];

    /// Draws a table from the seed stream (256 draws).
    fn new(rng: &mut SeedGenerator) -> Self {
        let mut perm = [0u8; 512];

        for slot in &mut perm[..256] {
            // random() < 1, so the product never reaches 256
            *slot = (rng.random() * 256.0).floor() as u8;
        }
        perm.copy_within(..256, 256);

        Self { perm }
    }

    /// Gets a permutation value (with automatic wrapping).
    #[inline]
    fn get(&self, index: usize) -> usize {
        usize::from(self.perm[index & 511])
    }

    /// Gets a gradient for a given hash.
    #[inline]
    fn gradient(hash: usize) -> [f64; 3] {
        let g = Self::GRAD3[hash % 12];
        [f64::from(g[0]), f64::from(g[1]), f64::from(g[2])]
    }
}

/// Seeded simplex noise sampler.
///
/// Produces smooth, continuous values in roughly `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// use terrablock_procedural::{NoiseField, SeedGenerator};
///
/// let noise = NoiseField::new(&mut SeedGenerator::new(42));
/// let h = noise.sample2(10.5, 3.25);
/// let v = noise.sample3(1.0, 2.0, 3.0);
/// assert!(h.abs() <= 1.0 && v.abs() <= 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct NoiseField {
    /// The permutation table.
    perm_table: PermutationTable,
}

impl NoiseField {
    /// Skewing factor for 2D simplex grid.
    const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
    /// Unskewing factor for 2D simplex grid.
    const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6
    /// Skewing factor for 3D simplex grid.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D simplex grid.
    const G3: f64 = 1.0 / 6.0;

    /// Creates a noise field, drawing its permutation table from `rng`.
    ///
    /// Advances `rng` by exactly 256 draws.
    #[must_use]
    pub fn new(rng: &mut SeedGenerator) -> Self {
        Self {
            perm_table: PermutationTable::new(rng),
        }
    }

    /// Creates a noise field from a fresh generator seeded with `seed`.
    #[must_use]
    pub fn from_seed(seed: u32) -> Self {
        Self::new(&mut SeedGenerator::new(seed))
    }

    /// Samples 2D simplex noise.
    #[must_use]
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        // Skew input coordinates to simplex grid
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        // Unskew to get first corner in simplex
        let unskew = f64::from(i.wrapping_add(j)) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1 as u8) + Self::G2;
        let y1 = y0 - f64::from(j1 as u8) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.perm_table;

        let gi0 = p.get(ii + p.get(jj));
        let gi1 = p.get(ii + i1 + p.get(jj + j1));
        let gi2 = p.get(ii + 1 + p.get(jj + 1));

        let n0 = corner2(x0, y0, gi0);
        let n1 = corner2(x1, y1, gi1);
        let n2 = corner2(x2, y2, gi2);

        70.0 * (n0 + n1 + n2)
    }

    /// Samples 3D simplex noise.
    #[must_use]
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let skew = (x + y + z) * Self::F3;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let k = fast_floor(z + skew);

        let unskew = f64::from(i.wrapping_add(j).wrapping_add(k)) * Self::G3;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);
        let z0 = z - (f64::from(k) - unskew);

        // Pick the tetrahedron we are in from the coordinate ordering
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - f64::from(i1 as u8) + Self::G3;
        let y1 = y0 - f64::from(j1 as u8) + Self::G3;
        let z1 = z0 - f64::from(k1 as u8) + Self::G3;
        let x2 = x0 - f64::from(i2 as u8) + 2.0 * Self::G3;
        let y2 = y0 - f64::from(j2 as u8) + 2.0 * Self::G3;
        let z2 = z0 - f64::from(k2 as u8) + 2.0 * Self::G3;
        let x3 = x0 - 1.0 + 3.0 * Self::G3;
        let y3 = y0 - 1.0 + 3.0 * Self::G3;
        let z3 = z0 - 1.0 + 3.0 * Self::G3;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let p = &self.perm_table;

        let gi0 = p.get(ii + p.get(jj + p.get(kk)));
        let gi1 = p.get(ii + i1 + p.get(jj + j1 + p.get(kk + k1)));
        let gi2 = p.get(ii + i2 + p.get(jj + j2 + p.get(kk + k2)));
        let gi3 = p.get(ii + 1 + p.get(jj + 1 + p.get(kk + 1)));

        let n0 = corner3(x0, y0, z0, gi0);
        let n1 = corner3(x1, y1, z1, gi1);
        let n2 = corner3(x2, y2, z2, gi2);
        let n3 = corner3(x3, y3, z3, gi3);

        32.0 * (n0 + n1 + n2 + n3)
    }
}

/// Contribution from one corner of a 2D simplex.
#[inline]
fn corner2(x: f64, y: f64, hash: usize) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let g = PermutationTable::gradient(hash);
        let t2 = t * t;
        t2 * t2 * (x * g[0] + y * g[1])
    }
}

/// Contribution from one corner of a 3D simplex.
#[inline]
fn corner3(x: f64, y: f64, z: f64, hash: usize) -> f64 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let g = PermutationTable::gradient(hash);
        let t2 = t * t;
        t2 * t2 * (x * g[0] + y * g[1] + z * g[2])
    }
}

/// Fast floor function.
///
/// Saturates on huge inputs and maps NaN to zero instead of panicking.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi.wrapping_sub(1) } else { xi }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let noise1 = NoiseField::from_seed(12345);
        let noise2 = NoiseField::from_seed(12345);

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(
                noise1.sample2(x, y),
                noise2.sample2(x, y),
                "2D noise should be deterministic"
            );
            assert_eq!(
                noise1.sample3(x, y, x - y),
                noise2.sample3(x, y, x - y),
                "3D noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_consumes_fixed_number_of_draws() {
        let mut rng = SeedGenerator::new(7);
        let _ = NoiseField::new(&mut rng);

        let mut reference = SeedGenerator::new(7);
        for _ in 0..256 {
            reference.random();
        }
        assert_eq!(rng, reference, "Construction should draw exactly 256 values");
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = NoiseField::from_seed(1);
        let noise2 = NoiseField::from_seed(2);

        let differs = (0..50).any(|i| {
            let x = f64::from(i) * 0.37 + 0.1;
            noise1.sample2(x, x * 0.5) != noise2.sample2(x, x * 0.5)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_range() {
        let noise = NoiseField::from_seed(42);

        for i in 0..10_000 {
            let x = (f64::from(i) * 0.1) - 500.0;
            let y = (f64::from(i) * 0.13) - 650.0;
            let v2 = noise.sample2(x, y);
            let v3 = noise.sample3(x, y, x * 0.5);

            assert!(v2.abs() <= 1.05, "2D value {v2} out of range at ({x}, {y})");
            assert!(v3.abs() <= 1.05, "3D value {v3} out of range at ({x}, {y})");
        }
    }

    #[test]
    fn test_zero_at_lattice_origin() {
        // All corner contributions vanish at the origin of the grid
        let noise = NoiseField::from_seed(99);
        assert_eq!(noise.sample2(0.0, 0.0), 0.0);
        assert_eq!(noise.sample3(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_continuity() {
        let noise = NoiseField::from_seed(42);

        let (x, y, z) = (100.0, 100.0, 10.0);
        let delta = 0.001;

        let diff2 = (noise.sample2(x, y) - noise.sample2(x + delta, y)).abs();
        let diff3 = (noise.sample3(x, y, z) - noise.sample3(x, y, z + delta)).abs();

        assert!(diff2 < 0.01, "2D noise should be continuous: diff = {diff2}");
        assert!(diff3 < 0.01, "3D noise should be continuous: diff = {diff3}");
    }

    #[test]
    fn test_non_finite_input_does_not_panic() {
        let noise = NoiseField::from_seed(3);
        let _ = noise.sample2(f64::NAN, 1.0);
        let _ = noise.sample3(f64::INFINITY, 0.0, f64::NEG_INFINITY);
    }
}
