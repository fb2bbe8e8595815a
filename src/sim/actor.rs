//! Actor state and per-kind defaults
//!
//! Every simulated entity is an [`Actor`]: position, direction, speed
//! multiplier, bounding extent, and the spawn-chain back references used by
//! collision exclusion and kill credit. Behavior differences between kinds
//! live in `collision.rs`; this module is plain data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::stage::Rect;

/// Handle to a live actor. Never an owning link - the registry owns actor
/// lifetime, and a stale id simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Type discriminant, immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
    Projectile,
    Powerup,
    /// Placeholder discriminant; not spawnable
    #[default]
    Null,
}

impl ActorKind {
    /// Fixed bucket visit order for `all_actors`
    pub const ALL: [ActorKind; 5] = [
        ActorKind::Player,
        ActorKind::Enemy,
        ActorKind::Projectile,
        ActorKind::Powerup,
        ActorKind::Null,
    ];

    pub(crate) fn bucket(self) -> usize {
        match self {
            ActorKind::Player => 0,
            ActorKind::Enemy => 1,
            ActorKind::Projectile => 2,
            ActorKind::Powerup => 3,
            ActorKind::Null => 4,
        }
    }

    /// Drawable extent used when the spawn config doesn't supply one
    pub fn default_size(self) -> Vec2 {
        let side = match self {
            ActorKind::Player => PLAYER_SIZE,
            ActorKind::Enemy => ENEMY_SIZE,
            ActorKind::Projectile => PROJECTILE_SIZE,
            ActorKind::Powerup => POWERUP_SIZE,
            ActorKind::Null => 0.0,
        };
        Vec2::splat(side)
    }

    pub fn default_speed(self) -> Speed {
        match self {
            ActorKind::Player => Speed::Normal,
            ActorKind::Enemy => Speed::Slow,
            ActorKind::Projectile => Speed::Fast,
            ActorKind::Powerup | ActorKind::Null => Speed::Stop,
        }
    }

    /// What happens when this kind leaves the viewport
    pub fn default_oob(self) -> OobPolicy {
        match self {
            // The player is never destroyed by the arena edge, only by damage
            ActorKind::Player => OobPolicy::Ignore,
            ActorKind::Enemy => OobPolicy::Bounce,
            _ => OobPolicy::Dispose,
        }
    }
}

/// Speed presets (pixels per second before direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Speed {
    Stop,
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn px_per_sec(self) -> f32 {
        match self {
            Speed::Stop => 0.0,
            Speed::Slow => 150.0,
            Speed::Normal => 500.0,
            Speed::Fast => 1500.0,
        }
    }
}

/// Out-of-bounds policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OobPolicy {
    /// Dispose the actor (default)
    Dispose,
    /// Reverse both direction components and stay alive
    Bounce,
    /// Skip the check entirely
    Ignore,
}

/// Spawn request handed to the factory
#[derive(Debug, Clone, Default)]
pub struct SpawnConfig {
    /// Initial position (actor center)
    pub pos: Vec2,
    /// Drawable extent; kind default when absent
    pub size: Option<Vec2>,
    /// Extent multiplier
    pub scale: Option<Vec2>,
    /// The actor that caused this one to spawn
    pub parent: Option<ActorId>,
    /// Initial heading (radians); no heading means no movement
    pub rotation: Option<f32>,
    /// Speed preset; kind default when absent
    pub speed: Option<Speed>,
    /// Enemy contacts a projectile survives before disposing
    pub pierce: u32,
    /// Out-of-bounds override; kind default when absent
    pub oob: Option<OobPolicy>,
}

/// A live simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Center position (pixels)
    pub pos: Vec2,
    /// Movement direction, unit-ish; effective velocity is `dir * speed`
    pub dir: Vec2,
    /// Per-instance speed multiplier (pixels per second)
    pub speed: f32,
    /// Bounding extent, width x height
    pub size: Vec2,
    /// Facing angle (radians); the player aims with this
    pub rotation: f32,
    /// The actor that spawned this one
    pub parent: Option<ActorId>,
    /// Origin of the spawn chain, resolved once at construction
    pub root_parent: Option<ActorId>,
    pub money: i64,
    pub oob: OobPolicy,
    /// Enemy contacts this projectile may survive (captured at spawn)
    pub pierce_budget: u32,
    /// Enemy contacts survived so far
    pub pierce_used: u32,
    /// Pierce allowance granted to this actor's future projectiles
    pub pierce_bonus: u32,
    /// Wall-clock timestamp (ms) of this actor's last movement update
    pub last_update_ms: f64,
}

impl Actor {
    /// Effective velocity in pixels per second
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Bounding box centered on `pos`
    pub fn bounds(&self) -> Rect {
        let half = self.size * 0.5;
        Rect::new(self.pos - half, self.pos + half)
    }

    /// Subtract `amount` from money; true when the actor is broke and
    /// should be disposed
    pub fn damage(&mut self, amount: i64) -> bool {
        self.money -= amount;
        self.money <= 0
    }

    /// Reverse both direction components
    pub fn bounce(&mut self) {
        self.dir = -self.dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_centered_on_pos() {
        let actor = Actor {
            id: ActorId(1),
            kind: ActorKind::Enemy,
            pos: Vec2::new(10.0, 20.0),
            dir: Vec2::ZERO,
            speed: 0.0,
            size: Vec2::new(4.0, 8.0),
            rotation: 0.0,
            parent: None,
            root_parent: None,
            money: 1,
            oob: OobPolicy::Bounce,
            pierce_budget: 0,
            pierce_used: 0,
            pierce_bonus: 0,
            last_update_ms: 0.0,
        };
        let b = actor.bounds();
        assert_eq!(b.min, Vec2::new(8.0, 16.0));
        assert_eq!(b.max, Vec2::new(12.0, 24.0));
    }

    #[test]
    fn test_damage_reports_broke() {
        let mut actor = Actor {
            id: ActorId(1),
            kind: ActorKind::Player,
            pos: Vec2::ZERO,
            dir: Vec2::ZERO,
            speed: 0.0,
            size: Vec2::ONE,
            rotation: 0.0,
            parent: None,
            root_parent: None,
            money: 25_000,
            oob: OobPolicy::Ignore,
            pierce_budget: 0,
            pierce_used: 0,
            pierce_bonus: 0,
            last_update_ms: 0.0,
        };
        assert!(!actor.damage(10_000));
        assert!(!actor.damage(10_000));
        assert!(actor.damage(10_000));
        assert_eq!(actor.money, -5_000);
    }

    #[test]
    fn test_bounce_negates_direction() {
        let mut actor = Actor {
            id: ActorId(2),
            kind: ActorKind::Enemy,
            pos: Vec2::ZERO,
            dir: Vec2::new(0.6, -0.8),
            speed: 150.0,
            size: Vec2::ONE,
            rotation: 0.0,
            parent: None,
            root_parent: None,
            money: 1,
            oob: OobPolicy::Bounce,
            pierce_budget: 0,
            pierce_used: 0,
            pierce_bonus: 0,
            last_update_ms: 0.0,
        };
        actor.bounce();
        assert_eq!(actor.dir, Vec2::new(-0.6, 0.8));
    }
}
