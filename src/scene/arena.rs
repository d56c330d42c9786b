use super::primitive::{Group, Primitive, PrimitiveId};
use super::transform::Transform;

/// A primitive together with its most recent valid transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveRecord {
    pub primitive: Primitive,
    pub transform: Transform,
}

/// Arena of primitive records, indexed by [`PrimitiveId`]
///
/// Records are updated by value each frame; nothing hands out long-lived
/// mutable handles into the arena.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveArena {
    records: Vec<PrimitiveRecord>,
}

impl PrimitiveArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a primitive posed at t = 0
    pub fn insert(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.records.len());
        let transform = primitive.motion.evaluate(&primitive, 0.0);
        self.records.push(PrimitiveRecord {
            primitive,
            transform,
        });
        id
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&PrimitiveRecord> {
        self.records.get(id.0)
    }

    pub fn transform(&self, id: PrimitiveId) -> Option<Transform> {
        self.get(id).map(|record| record.transform)
    }

    /// Re-evaluate every record matching `filter` at time `t`
    ///
    /// A record whose new transform is not finite keeps its previous one.
    /// Returns the number of records written.
    pub fn update(&mut self, t: f32, filter: Option<Group>) -> usize {
        let mut written = 0;

        for record in self.records.iter_mut() {
            let primitive = &record.primitive;
            if filter.is_some_and(|group| group != primitive.group) || !primitive.is_animated() {
                continue;
            }

            let next = primitive.motion.evaluate(primitive, t);
            if next.is_finite() {
                record.transform = next;
                written += 1;
            }
        }

        written
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &PrimitiveRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (PrimitiveId(index), record))
    }

    pub fn ids_in(&self, group: Group) -> Vec<PrimitiveId> {
        self.iter()
            .filter(|(_, record)| record.primitive.group == group)
            .map(|(id, _)| id)
            .collect()
    }

    /// Groups with at least one animated primitive, in [`Group::ALL`] order
    pub fn animated_groups(&self) -> Vec<Group> {
        Group::ALL
            .into_iter()
            .filter(|group| {
                self.records
                    .iter()
                    .any(|r| r.primitive.group == *group && r.primitive.is_animated())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record and its backing storage
    pub fn clear(&mut self) {
        self.records = Vec::new();
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }
}

impl FromIterator<Primitive> for PrimitiveArena {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        let mut arena = Self::new();
        for primitive in iter {
            arena.insert(primitive);
        }
        arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::palette;
    use crate::scene::motion::Motion;
    use crate::scene::primitive::{Material, Shape};
    use glam::Vec3;

    fn point(group: Group, spin: f32) -> Primitive {
        Primitive::new(
            Shape::Point { size: 0.1 },
            Vec3::ZERO,
            Material::basic(palette::TEAL_500, 1.0),
            group,
        )
        .with_motion(Motion::spin(Vec3::new(spin, 0.0, 0.0), 0.0))
    }

    #[test]
    fn ids_are_insertion_indices() {
        let mut arena = PrimitiveArena::new();
        assert_eq!(arena.insert(point(Group::Particles, 1.0)), PrimitiveId(0));
        assert_eq!(arena.insert(point(Group::Helix, 1.0)), PrimitiveId(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn update_respects_group_filter() {
        let mut arena: PrimitiveArena = [point(Group::Particles, 1.0), point(Group::Helix, 1.0)]
            .into_iter()
            .collect();

        assert_eq!(arena.update(1.0, Some(Group::Helix)), 1);
        assert_eq!(arena.transform(PrimitiveId(0)).unwrap().euler().x, 0.0);
        assert!((arena.transform(PrimitiveId(1)).unwrap().euler().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn static_records_are_not_rewritten() {
        let mut arena: PrimitiveArena = [point(Group::Lines, 0.0)].into_iter().collect();
        assert_eq!(arena.update(5.0, None), 0);
        assert!(arena.animated_groups().is_empty());
    }

    #[test]
    fn non_finite_result_keeps_previous_transform() {
        let mut arena: PrimitiveArena = [point(Group::Particles, 1.0)].into_iter().collect();
        arena.update(0.5, None);
        let before = arena.transform(PrimitiveId(0)).unwrap();

        assert_eq!(arena.update(f32::INFINITY, None), 0);
        assert_eq!(arena.transform(PrimitiveId(0)).unwrap(), before);
    }

    #[test]
    fn clear_releases_storage() {
        let mut arena: PrimitiveArena = (0..64).map(|_| point(Group::Particles, 1.0)).collect();
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
    }
}
