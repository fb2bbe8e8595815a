//! Actor registry and spawn factory
//!
//! The [`World`] is the single owner of actor lifetime: construction
//! registers an actor, `dispose` removes it, and there is no valid state in
//! between. Every query hands back a snapshot of ids so collision responses
//! may dispose actors while another scan over the same tick is still
//! running.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;

use super::actor::{Actor, ActorId, ActorKind, SpawnConfig};
use crate::consts::*;
use crate::stage::{HeadlessStage, Rect, Stage};

/// Spawn request failures. Fatal to the request, never to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// The requested discriminant has no concrete actor behind it
    InvalidKind(ActorKind),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::InvalidKind(kind) => write!(f, "invalid actor type: {kind:?}"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Registry of all live actors, indexed by kind
pub struct World {
    stage: Box<dyn Stage>,
    actors: HashMap<ActorId, Actor>,
    /// Insertion-ordered ids per kind; `ActorKind::bucket` indexes this
    buckets: [Vec<ActorId>; 5],
    next_id: u32,
    /// Last timestamp seen by any tick; stamps newly spawned actors
    clock_ms: f64,
}

impl World {
    pub fn new(stage: Box<dyn Stage>) -> Self {
        Self {
            stage,
            actors: HashMap::new(),
            buckets: Default::default(),
            next_id: 1,
            clock_ms: 0.0,
        }
    }

    /// World with a fixed viewport and no renderer attached
    pub fn headless(viewport: Rect) -> Self {
        Self::new(Box::new(HeadlessStage::new(viewport)))
    }

    pub fn viewport(&self) -> Rect {
        self.stage.viewport()
    }

    /// Construct, register and return a new actor. Registration is part of
    /// construction; there is no unregistered-actor state.
    pub fn spawn(&mut self, kind: ActorKind, cfg: SpawnConfig) -> Result<ActorId, SpawnError> {
        if kind == ActorKind::Null {
            return Err(SpawnError::InvalidKind(kind));
        }

        let id = ActorId(self.next_id);
        self.next_id += 1;

        let size = cfg.size.unwrap_or_else(|| kind.default_size()) * cfg.scale.unwrap_or(Vec2::ONE);
        let dir = match cfg.rotation {
            Some(rot) => Vec2::new(rot.cos(), rot.sin()),
            None => Vec2::ZERO,
        };
        let money = if kind == ActorKind::Player {
            START_MONEY
        } else {
            DEFAULT_MONEY
        };

        let actor = Actor {
            id,
            kind,
            pos: cfg.pos,
            dir,
            speed: cfg.speed.unwrap_or_else(|| kind.default_speed()).px_per_sec(),
            size,
            rotation: cfg.rotation.unwrap_or(0.0),
            parent: cfg.parent,
            root_parent: cfg.parent.map(|p| self.root_of(p)),
            money,
            oob: cfg.oob.unwrap_or_else(|| kind.default_oob()),
            pierce_budget: cfg.pierce,
            pierce_used: 0,
            pierce_bonus: 0,
            last_update_ms: self.clock_ms,
        };

        self.buckets[kind.bucket()].push(id);
        self.actors.insert(id, actor);
        self.stage.attach(id, size);
        log::debug!("spawned {kind:?} {id:?} at {}", cfg.pos);

        Ok(id)
    }

    /// Walk parent links to the head of the spawn chain. Resolved once per
    /// spawn; chains are write-once so the result never goes stale.
    fn root_of(&self, id: ActorId) -> ActorId {
        let mut current = id;
        while let Some(parent) = self.actors.get(&current).and_then(|a| a.parent) {
            current = parent;
        }
        current
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Remove an actor from the registry and the stage. Safe to call on an
    /// id that was already removed; returns whether this call removed it.
    pub fn dispose(&mut self, id: ActorId) -> bool {
        let Some(actor) = self.actors.remove(&id) else {
            return false;
        };
        let bucket = &mut self.buckets[actor.kind.bucket()];
        if let Some(pos) = bucket.iter().position(|&b| b == id) {
            bucket.remove(pos);
        }
        self.stage.detach(id);
        log::debug!("disposed {:?} {id:?}", actor.kind);
        true
    }

    /// Snapshot of every live id, buckets visited in fixed kind order,
    /// insertion order within a bucket
    pub fn all_actors(&self) -> Vec<ActorId> {
        ActorKind::ALL
            .iter()
            .flat_map(|kind| self.buckets[kind.bucket()].iter().copied())
            .collect()
    }

    /// Snapshot of the ids of one kind
    pub fn actors_of(&self, kind: ActorKind) -> Vec<ActorId> {
        self.buckets[kind.bucket()].clone()
    }

    pub fn count_of(&self, kind: ActorKind) -> usize {
        self.buckets[kind.bucket()].len()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// First registered player, if any
    pub fn player(&self) -> Option<ActorId> {
        self.buckets[ActorKind::Player.bucket()].first().copied()
    }

    pub fn player_is_dead(&self) -> bool {
        self.buckets[ActorKind::Player.bucket()].is_empty()
    }

    /// Tear down every actor of one kind
    pub fn remove_all_of(&mut self, kind: ActorKind) {
        for id in self.actors_of(kind) {
            self.dispose(id);
        }
    }

    /// Tear down the whole registry
    pub fn remove_all(&mut self) {
        for id in self.all_actors() {
            self.dispose(id);
        }
    }

    pub(crate) fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub(crate) fn set_clock_ms(&mut self, now_ms: f64) {
        self.clock_ms = now_ms;
    }
}
