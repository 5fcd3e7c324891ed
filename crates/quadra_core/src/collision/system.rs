//! Pairwise shape collision pass.

use quadra_shared::Vec2;
use tracing::{debug, trace};

use super::component::CollisionComponent;
use super::sat::{edge_normals, enabled_vertices, no_separating_axis};
use crate::ecs::{ComponentPool, Entity};
use crate::geometry::DisplayComponent;

/// Shape-vs-shape collision detector.
///
/// Holds scratch buffers only; keep one around and call [`CollisionSystem::run`]
/// every tick to avoid re-allocating them.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    candidates: Vec<Entity>,
    normals: Vec<Vec<Vec2>>,
}

impl CollisionSystem {
    /// Creates a detector with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests every collidable pair once and fires both callbacks for each hit.
    ///
    /// Candidates are entities present in both pools with at least one
    /// enabled vertex and valid bounds. Pairs are visited in ascending id
    /// order, `(a, b)` with `a < b`, and returned in that order.
    pub fn run(
        &mut self,
        displays: &ComponentPool<DisplayComponent>,
        collisions: &ComponentPool<CollisionComponent>,
    ) -> Vec<(Entity, Entity)> {
        self.gather(displays, collisions);

        let mut hits = Vec::new();
        let count = self.candidates.len();
        for i in 0..count {
            let a = self.candidates[i];
            let a_collision = collisions.get(a);
            let a_display = displays.get(a);

            for j in (i + 1)..count {
                let b = self.candidates[j];
                let b_collision = collisions.get(b);
                if !a_collision.flags.should_test(b_collision.flags) {
                    continue;
                }

                let b_display = displays.get(b);
                let a_disabled = a_collision.disabled_sprites.as_slice();
                let b_disabled = b_collision.disabled_sprites.as_slice();
                let hit = no_separating_axis(&self.normals[i], a_display, a_disabled, b_display, b_disabled)
                    || no_separating_axis(&self.normals[j], a_display, a_disabled, b_display, b_disabled);
                if hit {
                    trace!(%a, %b, "collision");
                    a_collision.notify(b);
                    b_collision.notify(a);
                    hits.push((a, b));
                }
            }
        }

        debug!(candidates = count, hits = hits.len(), "collision pass complete");
        hits
    }

    /// Fills `candidates` and their axis sets, reusing the inner vectors.
    fn gather(
        &mut self,
        displays: &ComponentPool<DisplayComponent>,
        collisions: &ComponentPool<CollisionComponent>,
    ) {
        self.candidates.clear();
        for (entity, collision) in collisions {
            let Some(display) = displays.try_get(entity) else {
                continue;
            };
            let disabled = collision.disabled_sprites.as_slice();
            if enabled_vertices(display, disabled).next().is_none() {
                trace!(%entity, "no enabled geometry, skipped");
                continue;
            }
            if !display.get_dimensions(None).is_valid() {
                continue;
            }

            let slot = self.candidates.len();
            if slot == self.normals.len() {
                self.normals.push(Vec::new());
            }
            let axes = &mut self.normals[slot];
            axes.clear();
            edge_normals(display, disabled, axes);
            self.candidates.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Teams, TileCollision};
    use crate::ecs::Component;
    use crate::geometry::RenderLayer;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Fixture {
        displays: ComponentPool<DisplayComponent>,
        collisions: ComponentPool<CollisionComponent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                displays: ComponentPool::new(16),
                collisions: ComponentPool::new(16),
            }
        }

        fn add(&mut self, id: u32, pos: Vec2, collision: CollisionComponent) -> Entity {
            let entity = Entity::new(id);
            self.displays.add(
                entity,
                DisplayComponent::quad(pos, Vec2::ONE, RenderLayer::World, None),
            );
            self.collisions.add(entity, collision);
            entity
        }
    }

    fn recorder(log: &Arc<Mutex<Vec<(Entity, Entity)>>>) -> impl Fn(Entity, Entity) + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |owner, other| log.lock().push((owner, other))
    }

    #[test]
    fn test_ally_enemy_pair_notifies_both() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut fixture = Fixture::new();
        let a = fixture.add(
            0,
            Vec2::ZERO,
            CollisionComponent::with_teams(Teams::ALLY, Teams::ENEMY, TileCollision::None)
                .on_collide(recorder(&log)),
        );
        let b = fixture.add(
            1,
            Vec2::ZERO,
            CollisionComponent::with_teams(Teams::ENEMY, Teams::ALLY, TileCollision::None)
                .on_collide(recorder(&log)),
        );

        let hits = CollisionSystem::new().run(&fixture.displays, &fixture.collisions);

        assert_eq!(hits, vec![(a, b)]);
        let mut calls = log.lock().clone();
        calls.sort();
        assert_eq!(calls, vec![(a, b), (b, a)]);
    }

    #[test]
    fn test_distant_pair_not_reported() {
        let mut fixture = Fixture::new();
        fixture.add(0, Vec2::ZERO, CollisionComponent::with_teams(Teams::ALLY, Teams::ENEMY, TileCollision::None));
        fixture.add(
            1,
            Vec2::new(5.0, 5.0),
            CollisionComponent::with_teams(Teams::ENEMY, Teams::ALLY, TileCollision::None),
        );

        assert!(CollisionSystem::new().run(&fixture.displays, &fixture.collisions).is_empty());
    }

    #[test]
    fn test_team_filter_skips_geometry() {
        let mut fixture = Fixture::new();
        fixture.add(0, Vec2::ZERO, CollisionComponent::with_teams(Teams::ALLY, Teams::ALLY, TileCollision::None));
        fixture.add(1, Vec2::ZERO, CollisionComponent::with_teams(Teams::ENEMY, Teams::ENEMY, TileCollision::None));

        assert!(CollisionSystem::new().run(&fixture.displays, &fixture.collisions).is_empty());
    }

    #[test]
    fn test_fully_disabled_entity_never_collides() {
        let mut fixture = Fixture::new();
        let mut ghost = CollisionComponent::with_teams(Teams::all(), Teams::all(), TileCollision::None);
        ghost.disable_sprite(0);
        fixture.add(0, Vec2::ZERO, ghost);
        fixture.add(1, Vec2::ZERO, CollisionComponent::with_teams(Teams::all(), Teams::all(), TileCollision::None));

        assert!(CollisionSystem::new().run(&fixture.displays, &fixture.collisions).is_empty());
    }

    #[test]
    fn test_missing_display_skipped() {
        let mut fixture = Fixture::new();
        fixture.add(0, Vec2::ZERO, CollisionComponent::with_teams(Teams::all(), Teams::all(), TileCollision::None));
        fixture
            .collisions
            .add(Entity::new(5), CollisionComponent::with_teams(Teams::all(), Teams::all(), TileCollision::None));

        assert!(CollisionSystem::new().run(&fixture.displays, &fixture.collisions).is_empty());
    }

    #[test]
    fn test_pairs_in_ascending_order_and_reused_buffers() {
        let mut fixture = Fixture::new();
        for id in [4, 1, 9] {
            fixture.add(
                id,
                Vec2::ZERO,
                CollisionComponent::with_teams(Teams::NEUTRAL, Teams::NEUTRAL, TileCollision::None),
            );
        }
        let mut system = CollisionSystem::new();
        let expected = vec![
            (Entity::new(1), Entity::new(4)),
            (Entity::new(1), Entity::new(9)),
            (Entity::new(4), Entity::new(9)),
        ];

        assert_eq!(system.run(&fixture.displays, &fixture.collisions), expected);
        assert_eq!(system.run(&fixture.displays, &fixture.collisions), expected);
        assert_eq!(fixture.collisions.get(Entity::new(9)).owner(), Entity::new(9));
    }
}
