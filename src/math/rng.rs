use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scene RNG: reproducible when seeded, entropy-backed otherwise
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Random float in [low, high)
#[inline]
pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    rng.gen::<f32>() * (high - low) + low
}

/// Random point in the axis-aligned cube of side `extent` centred on the origin
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    let half = extent * 0.5;
    Vec3::new(
        random_uniform(rng, -half, half),
        random_uniform(rng, -half, half),
        random_uniform(rng, -half, half),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_uniform_range() {
        let mut rng = scene_rng(Some(42));
        for _ in 0..100 {
            let value = random_uniform(&mut rng, 5.0, 10.0);
            assert!((5.0..10.0).contains(&value));
        }
    }

    #[test]
    fn test_random_in_cube_bounds() {
        let mut rng = scene_rng(Some(7));
        for _ in 0..500 {
            let p = random_in_cube(&mut rng, 20.0);
            assert!(p.abs().max_element() <= 10.0);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: Vec<f32> = {
            let mut rng = scene_rng(Some(99));
            (0..8).map(|_| random_uniform(&mut rng, 0.0, 1.0)).collect()
        };
        let b: Vec<f32> = {
            let mut rng = scene_rng(Some(99));
            (0..8).map(|_| random_uniform(&mut rng, 0.0, 1.0)).collect()
        };
        assert_eq!(a, b);
    }
}
