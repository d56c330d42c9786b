use collabrx_scene::config::{ParticleConfig, SceneConfig};
use collabrx_scene::math::scene_rng;
use collabrx_scene::scene::generators::data_particles;
use collabrx_scene::scene::hero::hero_primitives;
use collabrx_scene::scene::{Group, Primitive, Shape};

fn particles(primitives: &[Primitive]) -> Vec<&Primitive> {
    primitives
        .iter()
        .filter(|p| p.group == Group::Particles)
        .collect()
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[test]
    fn test_particle_field_respects_extent() {
        let config = ParticleConfig {
            count: 500,
            extent: 20.0,
            ..ParticleConfig::default()
        };
        let mut rng = scene_rng(Some(99));

        for p in data_particles(&mut rng, &config) {
            assert!(p.position.abs().max_element() <= 10.0, "{:?}", p.position);
        }
    }

    #[test]
    fn test_hero_particles_use_configured_count_and_size() {
        let mut config = SceneConfig::default().with_seed(3);
        config.particles.count = 12;
        config.particles.size = 0.05;

        let primitives = hero_primitives(&config);
        let field = particles(&primitives);

        assert_eq!(field.len(), 12);
        assert!(field
            .iter()
            .all(|p| matches!(p.shape, Shape::Point { size } if size == 0.05)));
    }

    #[test]
    fn test_same_seed_reproduces_scene() {
        let config = SceneConfig::default().with_seed(1234);
        assert_eq!(hero_primitives(&config), hero_primitives(&config));
    }

    #[test]
    fn test_different_seeds_move_particles() {
        let a = hero_primitives(&SceneConfig::default().with_seed(1));
        let b = hero_primitives(&SceneConfig::default().with_seed(2));

        let positions = |v: &[Primitive]| -> Vec<_> {
            particles(v).iter().map(|p| p.position).collect()
        };
        assert_ne!(positions(&a), positions(&b));
    }

    #[test]
    fn test_unseeded_scenes_differ() {
        let config = SceneConfig::default();
        let a = hero_primitives(&config);
        let b = hero_primitives(&config);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_particle_field() {
        let mut config = SceneConfig::default().with_seed(5);
        config.particles.count = 0;
        assert!(particles(&hero_primitives(&config)).is_empty());
    }

    #[test]
    fn test_all_generated_values_are_finite() {
        let primitives = hero_primitives(&SceneConfig::default().with_seed(8));
        assert!(primitives.iter().all(Primitive::is_finite));
    }
}
