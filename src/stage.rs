//! Render-surface boundary
//!
//! The simulation never draws. It talks to the outside world through the
//! [`Stage`] trait: the current viewport (for out-of-bounds and spawn
//! placement) and attach/detach notifications so a renderer can mirror the
//! registry with drawables. Tests and the headless demo use
//! [`HeadlessStage`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::ActorId;

/// Axis-aligned rectangle, `min` inclusive / `max` exclusive-ish (edges
/// count as inside; actors sitting exactly on the edge are in bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Viewport anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// What the simulation needs from the render surface
pub trait Stage {
    /// Current viewport bounds
    fn viewport(&self) -> Rect;

    /// A new actor was registered; `size` is its drawable extent
    fn attach(&mut self, id: ActorId, size: Vec2);

    /// An actor was disposed and its drawable should go away
    fn detach(&mut self, id: ActorId);
}

/// Stage with a fixed viewport and no drawables
#[derive(Debug, Clone)]
pub struct HeadlessStage {
    viewport: Rect,
}

impl HeadlessStage {
    pub fn new(viewport: Rect) -> Self {
        Self { viewport }
    }
}

impl Default for HeadlessStage {
    fn default() -> Self {
        Self::new(Rect::from_size(1280.0, 720.0))
    }
}

impl Stage for HeadlessStage {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn attach(&mut self, _id: ActorId, _size: Vec2) {}

    fn detach(&mut self, _id: ActorId) {}
}
