//! Actor simulation core
//!
//! All gameplay logic lives here. This module must stay pure of platform
//! and rendering dependencies:
//! - Clock owned by the external frame pump, handed in per tick
//! - Seeded RNG only (the core itself uses none)
//! - Stable iteration order (bucket order, then insertion order)
//! - Registry queries return snapshots, safe under mid-scan disposal

pub mod actor;
pub mod collision;
pub mod player;
pub mod tick;
pub mod world;

pub use actor::{Actor, ActorId, ActorKind, OobPolicy, Speed, SpawnConfig};
pub use collision::{contains_center, detect, related};
pub use player::{PlayerCommand, command};
pub use tick::{step, tick, tick_all};
pub use world::{SpawnError, World};
