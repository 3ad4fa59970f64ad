//! Seeded 2D Perlin noise for weave color variation.
//!
//! Mixed-weave stripes flip between primary and secondary color, and textured
//! stripes lighten, based on this field. The generator owns its own RNG state
//! built once at construction, so sampling never consumes draws from the
//! pipeline's main [`SeededRng`](crate::rng::SeededRng) stream and cannot
//! perturb draw order.

use crate::rng::SeededRng;

/// 2D Perlin noise, normalized to [0, 1] at the sampling API.
#[derive(Clone)]
pub struct WeaveNoise {
    /// Permutation table, doubled for wrap-free indexing.
    perm: [u8; 512],
}

impl WeaveNoise {
    const GRAD2: [[f64; 2]; 8] = [
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
        [1.0, 1.0],
        [-1.0, 1.0],
        [1.0, -1.0],
        [-1.0, -1.0],
    ];

    /// Build the permutation table from the artifact seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let mut source: [u8; 256] = [0; 256];
        for (i, v) in source.iter_mut().enumerate() {
            *v = i as u8;
        }
        // Fisher-Yates over the identity table.
        for i in (1..256).rev() {
            let j = (rng.next_f64() * (i + 1) as f64) as usize;
            source.swap(i, j.min(i));
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&source);
        perm[256..].copy_from_slice(&source);
        Self { perm }
    }

    #[inline]
    fn hash(&self, x: i64, y: i64) -> usize {
        let xi = (x & 255) as usize;
        let yi = (y & 255) as usize;
        self.perm[xi + self.perm[yi] as usize] as usize
    }

    #[inline]
    fn grad(&self, hash: usize, x: f64, y: f64) -> f64 {
        let g = &Self::GRAD2[hash & 7];
        g[0] * x + g[1] * y
    }

    #[inline]
    fn fast_floor(x: f64) -> i64 {
        if x >= 0.0 {
            x as i64
        } else {
            x as i64 - 1
        }
    }

    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    /// Sample normalized noise in [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = Self::fast_floor(x);
        let y0 = Self::fast_floor(y);
        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let u = Self::fade(fx);
        let v = Self::fade(fy);

        let n00 = self.grad(self.hash(x0, y0), fx, fy);
        let n10 = self.grad(self.hash(x0 + 1, y0), fx - 1.0, fy);
        let n01 = self.grad(self.hash(x0, y0 + 1), fx, fy - 1.0);
        let n11 = self.grad(self.hash(x0 + 1, y0 + 1), fx - 1.0, fy - 1.0);

        let nx0 = Self::lerp(n00, n10, u);
        let nx1 = Self::lerp(n01, n11, u);
        let raw = Self::lerp(nx0, nx1, v);

        // Gradient noise lands in roughly [-sqrt(2)/2, sqrt(2)/2]; the
        // diagonal gradients can poke slightly past that, so clamp.
        (((raw / std::f64::consts::FRAC_1_SQRT_2) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
