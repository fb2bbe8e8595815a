//! Faceroll - a top-down arena shooter simulation core
//!
//! Core modules:
//! - `sim`: Actor registry, movement integration, collision detection/response
//! - `stage`: Render-surface boundary (viewport + drawable notifications)
//! - `director`: Spawn orchestration (enemy top-up, power-up drops, game over)
//! - `tuning`: Data-driven orchestration knobs

pub mod director;
pub mod sim;
pub mod stage;
pub mod tuning;

pub use director::Director;
pub use stage::{HeadlessStage, Rect, Stage};
pub use tuning::Tuning;

use glam::Vec2;

/// Gameplay constants
pub mod consts {
    /// Frame gaps above this are treated as a stall (backgrounded tab) and
    /// produce no movement that tick, instead of one huge catch-up jump.
    pub const MAX_FRAME_GAP_MS: f32 = 250.0;

    /// Player starting funds - a small loan of a million dollars
    pub const START_MONEY: i64 = 1_000_000;
    /// Money every non-player actor carries by default
    pub const DEFAULT_MONEY: i64 = 1;
    /// Money the player loses per projectile hit
    pub const HIT_DAMAGE: i64 = 10_000;
    /// Money credited to a kill's root parent
    pub const KILL_REWARD: i64 = 25_000;

    /// Default drawable extents (pixels, square, pre-scale)
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const PROJECTILE_SIZE: f32 = 24.0;
    pub const POWERUP_SIZE: f32 = 32.0;

    /// Projectiles per volley
    pub const PROJECTILE_FAN: u32 = 4;
    /// Fan spread clamp (radians between adjacent shots)
    pub const MIN_SPREAD: f32 = 0.025;
    pub const MAX_SPREAD: f32 = 0.5;

    /// Player speed while sprinting (pixels per second)
    pub const SPRINT_SPEED: f32 = 1000.0;

    /// The player safe zone extends the player bounds by the viewport
    /// width divided by this
    pub const SAFE_ZONE_DIVISOR: f32 = 8.0;
}

/// Angle (radians) from `from` toward `to`
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_angle_cardinals() {
        let origin = Vec2::ZERO;
        assert!(aim_angle(origin, Vec2::new(10.0, 0.0)).abs() < 1e-6);
        let down = aim_angle(origin, Vec2::new(0.0, 10.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
