use serde::Serialize;

use super::arena::PrimitiveArena;
use super::environment::Environment;
use super::hero::{hero_environment, hero_primitives};
use super::primitive::{Group, Primitive, PrimitiveId};
use super::transform::Transform;
use crate::config::SceneConfig;

/// Result of a per-frame update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// `updated` records received a new transform
    Applied { updated: usize },
    /// Time was NaN, infinite or negative; every record kept its transform
    Skipped,
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }
}

/// Scene Composer - owns the primitive arena and drives it from a clock
///
/// The composer holds no animation state of its own: every transform is a
/// pure function of the primitive's static parameters and the time passed
/// to [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct SceneComposer {
    arena: PrimitiveArena,
    environment: Environment,
    last_time: Option<f32>,
}

impl SceneComposer {
    /// Build the hero scene described by `config`
    pub fn new(config: &SceneConfig) -> Self {
        let composer = Self::from_primitives(hero_primitives(config), hero_environment(config));
        match config.seed {
            Some(seed) => log::info!(
                "scene composed: {} primitives (seed {seed})",
                composer.arena.len()
            ),
            None => log::info!(
                "scene composed: {} primitives (entropy seed)",
                composer.arena.len()
            ),
        }
        composer
    }

    pub fn from_primitives(primitives: Vec<Primitive>, environment: Environment) -> Self {
        Self {
            arena: primitives.into_iter().collect(),
            environment,
            last_time: None,
        }
    }

    /// Advance every animated primitive to `time`
    pub fn update(&mut self, time: f32) -> UpdateOutcome {
        self.apply(time, None)
    }

    /// Advance only the primitives of `group` to `time`
    pub fn update_group(&mut self, group: Group, time: f32) -> UpdateOutcome {
        self.apply(time, Some(group))
    }

    fn apply(&mut self, time: f32, group: Option<Group>) -> UpdateOutcome {
        if !is_valid_time(time) {
            log::debug!("skipping update at invalid time {time}");
            return UpdateOutcome::Skipped;
        }

        let updated = self.arena.update(time, group);
        self.last_time = Some(time);
        UpdateOutcome::Applied { updated }
    }

    pub fn transform(&self, id: PrimitiveId) -> Option<Transform> {
        self.arena.transform(id)
    }

    pub fn arena(&self) -> &PrimitiveArena {
        &self.arena
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Time of the last applied update
    pub fn last_time(&self) -> Option<f32> {
        self.last_time
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Serializable view of every primitive and its current transform
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            time: self.last_time,
            environment: self.environment.clone(),
            primitives: self
                .arena
                .iter()
                .map(|(id, record)| PrimitiveSnapshot {
                    id,
                    primitive: record.primitive,
                    transform: record.transform,
                })
                .collect(),
        }
    }

    /// Drop every primitive and its storage
    pub fn release(&mut self) {
        let released = self.arena.len();
        self.arena.clear();
        self.last_time = None;
        log::info!("released {released} primitives");
    }
}

fn is_valid_time(time: f32) -> bool {
    time.is_finite() && time >= 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveSnapshot {
    pub id: PrimitiveId,
    pub primitive: Primitive,
    pub transform: Transform,
}

/// JSON-friendly dump of the composed scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub time: Option<f32>,
    pub environment: Environment,
    pub primitives: Vec<PrimitiveSnapshot>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> SceneComposer {
        SceneComposer::new(&SceneConfig::default().with_seed(5))
    }

    fn transforms(composer: &SceneComposer) -> Vec<Transform> {
        composer.arena().iter().map(|(_, r)| r.transform).collect()
    }

    #[test]
    fn invalid_times_are_skipped() {
        let mut composer = composer();
        assert!(composer.update(1.25).is_applied());
        let before = transforms(&composer);

        for t in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.5] {
            assert_eq!(composer.update(t), UpdateOutcome::Skipped);
        }
        assert_eq!(transforms(&composer), before);
        assert_eq!(composer.last_time(), Some(1.25));
    }

    #[test]
    fn update_group_touches_only_that_group() {
        let mut composer = composer();
        let before = transforms(&composer);

        let outcome = composer.update_group(Group::Tori, 3.0);
        assert_eq!(outcome, UpdateOutcome::Applied { updated: 2 });

        for ((_, record), old) in composer.arena().iter().zip(before) {
            if record.primitive.group != Group::Tori {
                assert_eq!(record.transform, old);
            }
        }
    }

    #[test]
    fn static_lines_are_never_written() {
        let mut composer = composer();
        composer.update_group(Group::Lines, 2.0);
        assert_eq!(
            composer.update_group(Group::Lines, 2.0),
            UpdateOutcome::Applied { updated: 0 }
        );
    }

    #[test]
    fn snapshot_serializes() {
        let mut composer = composer();
        composer.update(0.5);
        let snapshot = composer.snapshot();
        assert_eq!(snapshot.primitives.len(), composer.len());

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"time\": 0.5"));
        assert!(json.contains("\"kind\": \"torus\""));
    }

    #[test]
    fn release_empties_the_arena() {
        let mut composer = composer();
        composer.release();
        assert!(composer.is_empty());
        assert_eq!(composer.arena().capacity(), 0);
        assert_eq!(composer.update(1.0), UpdateOutcome::Applied { updated: 0 });
    }
}
