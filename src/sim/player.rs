//! Player command surface
//!
//! Input bindings live outside the core; key/mouse press-release pairs are
//! translated by the driver into [`PlayerCommand`]s. Movement commands set
//! velocity components, aim tracks the pointer, and shoot spawns a fan of
//! projectiles toward it.

use glam::Vec2;

use super::actor::{ActorId, ActorKind, SpawnConfig, Speed};
use super::world::World;
use crate::aim_angle;
use crate::consts::*;

/// One decoded input edge from the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Horizontal movement axis: -1, 0 or 1
    MoveX(f32),
    /// Vertical movement axis: -1, 0 or 1
    MoveY(f32),
    /// Hold to sprint
    Sprint(bool),
    /// Face the pointer
    Aim(Vec2),
    /// Fire a volley toward a point
    Shoot(Vec2),
}

/// Apply a command to a player actor. Unknown ids are ignored, like every
/// other lookup miss in the real-time loop.
pub fn command(world: &mut World, player: ActorId, cmd: PlayerCommand) {
    if let PlayerCommand::Shoot(target) = cmd {
        shoot(world, player, target);
        return;
    }
    let Some(actor) = world.get_mut(player) else {
        return;
    };
    match cmd {
        PlayerCommand::MoveX(v) => actor.dir.x = v,
        PlayerCommand::MoveY(v) => actor.dir.y = v,
        PlayerCommand::Sprint(on) => {
            actor.speed = if on {
                SPRINT_SPEED
            } else {
                Speed::Normal.px_per_sec()
            };
        }
        PlayerCommand::Aim(point) => actor.rotation = aim_angle(actor.pos, point),
        PlayerCommand::Shoot(_) => {}
    }
}

/// Spawn a fan of projectiles toward `target`. The spread widens as the
/// target gets closer to the shooter; the middle of an odd fan goes
/// straight through the aim point.
fn shoot(world: &mut World, player: ActorId, target: Vec2) {
    let Some(shooter) = world.get(player) else {
        return;
    };
    let origin = shooter.pos;
    let heading = aim_angle(origin, target);
    let pierce = shooter.pierce_bonus;
    let muzzle = shooter.size.x;

    // Wide spread up close, narrow far away. A zero-distance aim vector
    // must stay finite, so the divisor is floored before the clamp.
    let distance = origin.distance(target);
    let spread = (2.0 / distance.max(f32::EPSILON)).clamp(MIN_SPREAD, MAX_SPREAD);

    for i in 0..PROJECTILE_FAN {
        let rotation = heading + fan_offset(i, PROJECTILE_FAN) * spread;
        let dir = Vec2::new(rotation.cos(), rotation.sin());
        let cfg = SpawnConfig {
            pos: origin + dir * muzzle,
            parent: Some(player),
            rotation: Some(rotation),
            speed: Some(Speed::Fast),
            pierce,
            ..Default::default()
        };
        if let Err(err) = world.spawn(ActorKind::Projectile, cfg) {
            log::warn!("projectile spawn failed: {err}");
        }
    }
}

/// Per-shot index relative to the fan's middle. Odd fans center on zero;
/// even fans shift by half a slot so the volley stays symmetric.
fn fan_offset(index: u32, total: u32) -> f32 {
    if total <= 1 {
        return 0.0;
    }
    let middle = total.div_ceil(2) - 1;
    let relative = index as f32 - middle as f32;
    if total % 2 == 1 {
        relative
    } else {
        relative - 0.5
    }
}
