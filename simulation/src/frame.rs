//! Mirrors the world into renderer-neutral frames.

use arena_survivors_core::{EnemySnapshot, Phase, PlayerSnapshot, SessionSummary};
use arena_survivors_rendering::{
    Color, DrawCommand, FilledCircle, Frame, HudReadout, Scene, Screen, SpriteKey,
};
use arena_survivors_world::{query, World};
use glam::Vec2;

const BACKGROUND: Color = Color::from_rgb_u8(0x1a, 0x1a, 0x2e);
const BAR_BACKGROUND: Color = Color::from_rgb_u8(0x33, 0x33, 0x33);
const PLAYER_BAR: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
const ENEMY_BAR: Color = Color::from_rgb_u8(0xff, 0x47, 0x57);
const PLAYER_BAR_SIZE: Vec2 = Vec2::new(50.0, 6.0);
const ENEMY_BAR_SIZE: Vec2 = Vec2::new(35.0, 5.0);
const PLAYER_BAR_GAP: f32 = 15.0;
const ENEMY_BAR_GAP: f32 = 12.0;

pub(crate) fn build(world: &World) -> Frame {
    let arena = query::arena(world);
    let mut scene = Scene::new(arena.width(), arena.height(), BACKGROUND);
    let player = query::player(world);

    if let Some(player) = player.as_ref() {
        for enemy in query::enemy_view(world).iter() {
            push_enemy(&mut scene, enemy);
        }
        push_player(&mut scene, player);
    }

    Frame {
        scene,
        hud: player.map(|player| hud(world, &player)),
        screen: screen(world, player.as_ref()),
    }
}

fn push_enemy(scene: &mut Scene, enemy: &EnemySnapshot) {
    let center = Vec2::new(enemy.position.x(), enemy.position.y());
    scene.push(DrawCommand::FillCircle(FilledCircle {
        center,
        radius: enemy.radius,
        color: enemy.archetype.stats().color.into(),
        sprite: Some(SpriteKey::for_archetype(enemy.archetype)),
    }));

    if enemy.health < enemy.max_health {
        scene.push(DrawCommand::health_bar(
            center.x,
            center.y - enemy.radius - ENEMY_BAR_GAP,
            ENEMY_BAR_SIZE,
            enemy.health,
            enemy.max_health,
            BAR_BACKGROUND,
            ENEMY_BAR,
        ));
    }
}

fn push_player(scene: &mut Scene, player: &PlayerSnapshot) {
    let center = Vec2::new(player.position.x(), player.position.y());
    scene.push(DrawCommand::FillCircle(FilledCircle {
        center,
        radius: player.radius,
        color: player.class.template().color.into(),
        sprite: Some(SpriteKey::for_class(player.class)),
    }));
    scene.push(DrawCommand::health_bar(
        center.x,
        center.y - player.radius - PLAYER_BAR_GAP,
        PLAYER_BAR_SIZE,
        player.stats.health,
        player.stats.max_health,
        BAR_BACKGROUND,
        PLAYER_BAR,
    ));
}

fn hud(world: &World, player: &PlayerSnapshot) -> HudReadout {
    HudReadout {
        health: player.stats.health.max(0.0).floor() as u32,
        max_health: player.stats.max_health.max(0.0).floor() as u32,
        level: player.level,
        experience: player.experience,
        experience_threshold: player.experience_threshold,
        attack: player.stats.attack.max(0.0).floor() as u32,
        speed: player.stats.speed,
        kills: query::kills(world),
        elapsed_seconds: query::elapsed(world).as_secs(),
    }
}

fn screen(world: &World, player: Option<&PlayerSnapshot>) -> Screen {
    match query::phase(world) {
        Phase::Start => Screen::Start,
        Phase::Playing => Screen::Game,
        Phase::LevelUp => Screen::LevelUp {
            offer: query::current_offer(world)
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
        },
        Phase::GameOver => Screen::GameOver {
            summary: query::summary(world).unwrap_or_else(|| SessionSummary {
                elapsed: query::elapsed(world),
                kills: query::kills(world),
                level: player.map_or(1, |player| player.level),
            }),
        },
    }
}
