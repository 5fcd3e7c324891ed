//! # Tick Systems
//!
//! Plain functions over the world's pools. A tick runs them in
//! [`TickPhase`] order; destruction always comes last so nothing in the
//! same tick sees a half-removed entity.
//!
//! ```rust,ignore
//! systems::integrate_velocity(&mut world, dt);
//! systems::run_collisions(&mut world);
//! // combat, health, UI
//! renderer.submit_displays(&world.displays);
//! systems::flush_destroyed(&mut world);
//! ```

use tracing::trace;

use crate::collision::Tilemap;
use crate::ecs::Entity;
use crate::world::World;

/// The fixed order of one game tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickPhase {
    /// Displays move by velocity times delta time.
    Movement,
    /// Shape-vs-shape collision, callbacks fired.
    Collision,
    /// Gameplay damage resolution.
    Combat,
    /// Health bars and other generated textures.
    Interface,
    /// Geometry handed to the renderer.
    Submit,
    /// Marked entities freed.
    Destroy,
}

impl TickPhase {
    /// Every phase, in execution order.
    pub const ORDER: [Self; 6] = [
        Self::Movement,
        Self::Collision,
        Self::Combat,
        Self::Interface,
        Self::Submit,
        Self::Destroy,
    ];
}

/// Moves every entity with both a display and a velocity by `velocity * dt`.
pub fn integrate_velocity(world: &mut World, dt: f32) {
    let World { displays, velocities, .. } = world;
    for (entity, velocity) in &*velocities {
        if let Some(display) = displays.try_get_mut(entity) {
            display.move_by(velocity.linear * dt);
        }
    }
}

/// Runs the shape collision pass. Callbacks fire during the call.
pub fn run_collisions(world: &mut World) -> Vec<(Entity, Entity)> {
    let World {
        displays,
        collisions,
        collider,
        ..
    } = world;
    collider.run(displays, collisions)
}

/// Entities whose enabled geometry touches a blocked quadrant for their
/// tile collision type. Entities with `TileCollision::None` are skipped.
#[must_use]
pub fn tilemap_hits(world: &World, map: &Tilemap) -> Vec<Entity> {
    world
        .collisions
        .iter()
        .filter(|(entity, collision)| {
            world.displays.try_get(*entity).is_some_and(|display| {
                map.sprite_hits_map(display, &collision.disabled_sprites, collision.flags.tile())
            })
        })
        .map(|(entity, _)| entity)
        .collect()
}

/// Frees everything marked during the tick.
pub fn flush_destroyed(world: &mut World) -> Vec<Entity> {
    let destroyed = world.purge_marked();
    trace!(count = destroyed.len(), "tick flush");
    destroyed
}
