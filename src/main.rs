//! Faceroll entry point
//!
//! Headless demo driver: runs a seeded world with an autopilot standing in
//! for the player's keyboard and mouse, so the whole loop can be exercised
//! without a renderer. `RUST_LOG=info cargo run -- [seed]`.

use faceroll::sim::{self, ActorId, ActorKind, PlayerCommand, World};
use faceroll::{Director, Rect, Tuning};

/// 60 fps frame pump
const FRAME_MS: f64 = 1000.0 / 60.0;
/// One minute of simulated time
const MAX_FRAMES: u64 = 3600;
/// Frames between autopilot volleys
const SHOT_CADENCE: u64 = 30;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xFACE);
    log::info!("faceroll demo starting with seed {seed}");

    let mut world = World::headless(Rect::from_size(1280.0, 720.0));
    let mut director = Director::new(seed, Tuning::default());
    let player = match director.setup(&mut world) {
        Ok(player) => player,
        Err(err) => {
            log::error!("setup failed: {err}");
            return;
        }
    };

    let mut now_ms = 0.0;
    let mut frames = 0;
    for frame in 0..MAX_FRAMES {
        now_ms += FRAME_MS;
        frames = frame + 1;

        autopilot(&mut world, player, frame);
        sim::tick_all(&mut world, now_ms);
        director.update(&mut world);

        if director.game_over() {
            break;
        }
        if frame % 600 == 0
            && let Some(actor) = world.get(player)
        {
            log::info!(
                "frame {frame}: money {}, {} enemies, {} projectiles",
                actor.money,
                world.count_of(ActorKind::Enemy),
                world.count_of(ActorKind::Projectile),
            );
        }
    }

    if director.game_over() {
        log::info!("YOU DIED after {frames} frames");
    } else {
        let money = world.get(player).map(|a| a.money).unwrap_or(0);
        log::info!("demo finished after {frames} frames, money {money}");
    }
}

/// Face the nearest enemy and fire on a fixed cadence
fn autopilot(world: &mut World, player: ActorId, frame: u64) {
    let Some(me) = world.get(player) else {
        return;
    };
    let origin = me.pos;

    let target = world
        .actors_of(ActorKind::Enemy)
        .into_iter()
        .filter_map(|id| world.get(id))
        .min_by(|a, b| {
            let (da, db) = (a.pos.distance(origin), b.pos.distance(origin));
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|enemy| enemy.pos);

    if let Some(target) = target {
        sim::command(world, player, PlayerCommand::Aim(target));
        if frame % SHOT_CADENCE == 0 {
            sim::command(world, player, PlayerCommand::Shoot(target));
        }
    }
}
