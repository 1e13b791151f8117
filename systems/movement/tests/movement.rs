use std::time::Duration;

use arena_survivors_core::{
    Command, Difficulty, EnemyArchetype, Event, InputSnapshot, PlayerClass, WorldPoint,
};
use arena_survivors_system_movement::Movement;
use arena_survivors_world::{self as world, query, World};

#[test]
fn enemies_close_distance_to_player() {
    let mut world = started_world();
    let mut events = Vec::new();
    for position in [
        WorldPoint::new(-20.0, -20.0),
        WorldPoint::new(820.0, 300.0),
        WorldPoint::new(400.0, 620.0),
    ] {
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                archetype: EnemyArchetype::Normal,
                position,
            },
            &mut events,
        );
    }

    let player = query::player(&world).expect("player").position;
    let before = query::enemy_view(&world);
    let movement = Movement::default();
    let mut commands = Vec::new();
    movement.chase(player, &before, &mut commands);
    assert_eq!(commands.len(), 3);

    pump(&mut world, commands);

    for (old, new) in before.iter().zip(query::enemy_view(&world).iter()) {
        assert_eq!(old.id, new.id);
        let old_distance = old.position.distance(player);
        let new_distance = new.position.distance(player);
        assert!(
            (old_distance - new_distance - old.speed).abs() < 1e-3,
            "enemy {} did not advance by its speed",
            old.id.get()
        );
    }
}

#[test]
fn player_stays_inside_arena_while_held_against_wall() {
    let mut world = started_world();
    let movement = Movement::default();
    let input = InputSnapshot {
        right: true,
        down: true,
        ..InputSnapshot::default()
    };

    for _ in 0..400 {
        let mut commands = Vec::new();
        movement.steer(&input, &mut commands);
        pump(&mut world, commands);

        let player = query::player(&world).expect("player");
        let arena = query::arena(&world);
        assert!(player.position.x() >= player.radius);
        assert!(player.position.x() <= arena.width() - player.radius);
        assert!(player.position.y() >= player.radius);
        assert!(player.position.y() <= arena.height() - player.radius);
    }

    let player = query::player(&world).expect("player");
    assert_eq!(player.position, WorldPoint::new(775.0, 575.0));
}

#[test]
fn single_axis_moves_by_full_speed() {
    let mut world = started_world();
    let movement = Movement::default();
    let mut commands = Vec::new();
    movement.steer(
        &InputSnapshot {
            left: true,
            ..InputSnapshot::default()
        },
        &mut commands,
    );
    pump(&mut world, commands);

    let player = query::player(&world).expect("player");
    assert_eq!(player.position, WorldPoint::new(397.0, 300.0));
}

fn started_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            class: PlayerClass::Warrior,
            difficulty: Difficulty::Normal,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );
    world
}

fn pump(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}
