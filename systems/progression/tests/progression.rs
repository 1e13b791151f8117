use std::collections::HashSet;

use arena_survivors_core::{
    BuffKind, Command, Difficulty, EnemyArchetype, Event, Phase, PlayerClass, Strike, WorldPoint,
};
use arena_survivors_system_progression::{Config, Progression};
use arena_survivors_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn offers_hold_three_distinct_catalog_buffs() {
    let progression = Progression::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for level in 2..200 {
        let mut out = Vec::new();
        progression.handle(
            &[Event::LevelledUp {
                level,
                experience_threshold: 100,
            }],
            &mut rng,
            &mut out,
        );

        let [Command::OfferBuffs { buffs }] = out.as_slice() else {
            panic!("unexpected commands: {out:?}");
        };
        assert_eq!(buffs.len(), 3);
        let unique: HashSet<_> = buffs.iter().collect();
        assert_eq!(unique.len(), 3, "duplicate buff in {buffs:?}");
    }
}

#[test]
fn every_buff_eventually_appears() {
    let progression = Progression::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut seen = HashSet::new();

    for level in 2..500 {
        let mut out = Vec::new();
        progression.handle(
            &[Event::LevelledUp {
                level,
                experience_threshold: 100,
            }],
            &mut rng,
            &mut out,
        );
        for command in out {
            if let Command::OfferBuffs { buffs } = command {
                seen.extend(buffs);
            }
        }
    }

    assert_eq!(seen.len(), BuffKind::ALL.len());
}

#[test]
fn double_level_up_queues_two_offers_before_resuming() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            class: PlayerClass::Mage,
            difficulty: Difficulty::Normal,
        },
        &mut events,
    );

    for _ in 0..8 {
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                archetype: EnemyArchetype::Tank,
                position: WorldPoint::new(420.0, 300.0),
            },
            &mut events,
        );
    }
    let strikes = query::enemy_view(&world)
        .iter()
        .map(|enemy| Strike {
            enemy: enemy.id,
            damage: 100.0,
            critical: false,
        })
        .collect();
    events.clear();
    world::apply(&mut world, Command::StrikeEnemies { strikes }, &mut events);

    let config = Config::new(vec![BuffKind::AttackUp, BuffKind::SpeedUp], 3);
    let progression = Progression::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut commands = Vec::new();
    progression.handle(&events, &mut rng, &mut commands);
    assert_eq!(commands.len(), 2);
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(query::phase(&world), Phase::LevelUp);
    assert_eq!(query::pending_selections(&world), 2);

    for buff in [BuffKind::AttackUp, BuffKind::SpeedUp] {
        assert!(query::current_offer(&world).expect("offer").contains(&buff));
        world::apply(&mut world, Command::SelectBuff { buff }, &mut events);
    }

    assert_eq!(query::phase(&world), Phase::Playing);
    let player = query::player(&world).expect("player");
    assert_eq!(player.level, 3);
    assert_eq!(player.stats.attack, 30.0);
    assert_eq!(player.stats.speed, 4.0);
}
