//! Integration tests for full game ticks: movement, collision, deferred destruction.

use std::sync::Arc;

use parking_lot::Mutex;
use quadra_core::{
    systems, CollisionComponent, CoreError, DisplayComponent, Entity, RenderLayer, Teams,
    TickPhase, TileCollision, Vec2, Velocity, World,
};

fn square(world: &mut World, pos: Vec2) -> Entity {
    let entity = world.spawn().unwrap();
    world
        .displays
        .add(entity, DisplayComponent::quad(pos, Vec2::ONE, RenderLayer::World, None));
    entity
}

#[test]
fn test_destroyed_entity_gone_from_all_pools_and_reused() {
    let mut world = World::with_capacity(4, 2);
    let e = square(&mut world, Vec2::ZERO);
    world.collisions.add(e, CollisionComponent::default());
    world.velocities.add(e, Velocity::new(1.0, 1.0));

    world.mark(e);
    assert_eq!(systems::flush_destroyed(&mut world), vec![e]);

    assert!(!world.displays.exists(e));
    assert!(!world.collisions.exists(e));
    assert!(!world.velocities.exists(e));

    let mut reused = Vec::new();
    while let Ok(next) = world.spawn() {
        reused.push(next);
    }
    assert_eq!(reused.len(), 4);
    assert!(reused.contains(&e));
    assert_eq!(world.spawn(), Err(CoreError::EntitiesExhausted { capacity: 4 }));
}

#[test]
fn test_ally_enemy_scenario_each_side_told_once() {
    let mut world = World::with_capacity(8, 2);
    let log: Arc<Mutex<Vec<(Entity, Entity)>>> = Arc::new(Mutex::new(Vec::new()));

    let a = square(&mut world, Vec2::ZERO);
    let b = square(&mut world, Vec2::ZERO);
    for (entity, detect, signal) in [(a, Teams::ALLY, Teams::ENEMY), (b, Teams::ENEMY, Teams::ALLY)] {
        let sink = Arc::clone(&log);
        world.collisions.add(
            entity,
            CollisionComponent::with_teams(detect, signal, TileCollision::None)
                .on_collide(move |owner, other| sink.lock().push((owner, other))),
        );
    }

    let hits = systems::run_collisions(&mut world);
    assert_eq!(hits.len(), 1);

    let calls = log.lock().clone();
    assert_eq!(calls.iter().filter(|&&(owner, _)| owner == a).count(), 1);
    assert_eq!(calls.iter().filter(|&&(owner, _)| owner == b).count(), 1);
    assert!(calls.contains(&(a, b)));
    assert!(calls.contains(&(b, a)));
}

#[test]
fn test_bullet_destroys_target_at_end_of_tick() {
    let mut world = World::with_capacity(8, 4);
    let queue = world.destroy_queue();

    let target = square(&mut world, Vec2::new(3.0, 0.0));
    world.collisions.add(
        target,
        CollisionComponent::with_teams(Teams::empty(), Teams::ENEMY, TileCollision::None),
    );

    let bullet = square(&mut world, Vec2::ZERO);
    world.velocities.add(bullet, Velocity::new(30.0, 0.0));
    world.collisions.add(
        bullet,
        CollisionComponent::with_teams(Teams::ENEMY, Teams::empty(), TileCollision::None).on_collide(
            move |owner, other| {
                queue.mark(owner);
                queue.mark(other);
            },
        ),
    );

    let mut destroyed = Vec::new();
    for phase in TickPhase::ORDER {
        match phase {
            TickPhase::Movement => systems::integrate_velocity(&mut world, 0.1),
            TickPhase::Collision => {
                assert_eq!(systems::run_collisions(&mut world), vec![(target, bullet)]);
                // Still observable until the flush
                assert!(world.display(target).is_ok());
            }
            TickPhase::Destroy => destroyed = systems::flush_destroyed(&mut world),
            _ => {}
        }
    }

    destroyed.sort();
    let mut expected = vec![target, bullet];
    expected.sort();
    assert_eq!(destroyed, expected);
    assert_eq!(world.alive_count(), 0);
}

#[test]
fn test_marks_from_many_threads_flush_once() {
    let mut world = World::with_capacity(64, 8);
    let entities: Vec<Entity> = (0..64).map(|_| world.spawn().unwrap()).collect();
    let queue = world.destroy_queue();

    std::thread::scope(|scope| {
        for chunk in entities.chunks(8) {
            let queue = &queue;
            scope.spawn(move || {
                for &entity in chunk {
                    queue.mark(entity);
                    queue.mark(entity);
                }
            });
        }
    });

    assert_eq!(world.purge_marked().len(), 64);
    assert!(world.purge_marked().is_empty());
    assert_eq!(world.alive_count(), 0);
}
