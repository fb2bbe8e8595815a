//! Per-actor tick pipeline
//!
//! The external frame pump owns the clock; it calls [`tick`] (or
//! [`tick_all`]) once per actor per frame. Each tick advances position from
//! velocity and elapsed wall-clock time, scans the registry for contacts,
//! dispatches both response phases, and finally applies the actor's
//! out-of-bounds policy.

use super::actor::{ActorId, OobPolicy};
use super::collision;
use super::world::World;
use crate::consts::*;

/// Advance one actor, measuring elapsed time since that actor's own last
/// update. Per-actor timestamps matter because actors are constructed at
/// different ticks.
pub fn tick(world: &mut World, id: ActorId, now_ms: f64) {
    world.set_clock_ms(now_ms);
    let Some(actor) = world.get_mut(id) else {
        return;
    };
    let elapsed_ms = (now_ms - actor.last_update_ms) as f32;
    actor.last_update_ms = now_ms;
    step(world, id, elapsed_ms);
}

/// Drive every live actor once, buckets in fixed kind order
pub fn tick_all(world: &mut World, now_ms: f64) {
    for id in world.all_actors() {
        tick(world, id, now_ms);
    }
}

/// One tick with an explicitly supplied elapsed time (milliseconds)
pub fn step(world: &mut World, id: ActorId, elapsed_ms: f32) {
    integrate(world, id, elapsed_ms);
    collision::resolve(world, id);
    enforce_bounds(world, id);
}

/// Position update: `velocity * Δt`. A gap above `MAX_FRAME_GAP_MS` means
/// the frame pump stalled (backgrounded tab); skip the update entirely so
/// the actor doesn't teleport across the arena in one catch-up jump.
fn integrate(world: &mut World, id: ActorId, elapsed_ms: f32) {
    if elapsed_ms > MAX_FRAME_GAP_MS {
        return;
    }
    let Some(actor) = world.get_mut(id) else {
        return;
    };
    actor.pos += actor.velocity() * (elapsed_ms * 0.001);
}

/// Apply the actor's out-of-bounds policy against the stage viewport
fn enforce_bounds(world: &mut World, id: ActorId) {
    let viewport = world.viewport();
    let Some(actor) = world.get_mut(id) else {
        return;
    };
    if viewport.contains(actor.pos) {
        return;
    }
    match actor.oob {
        OobPolicy::Ignore => {}
        OobPolicy::Bounce => actor.bounce(),
        OobPolicy::Dispose => {
            world.dispose(id);
        }
    }
}
