//! Spawn orchestration and game-over handling
//!
//! The director sits on top of the simulation core: it keeps the enemy
//! count topped up (outside the player's safe zone), rolls for power-up
//! drops, and tears the world down when the player dies. All randomness
//! comes from a seeded PCG so runs are reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{ActorId, ActorKind, SpawnConfig, SpawnError, Speed, World};
use crate::stage::Rect;
use crate::tuning::Tuning;

pub struct Director {
    rng: Pcg32,
    tuning: Tuning,
    game_over: bool,
}

impl Director {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            game_over: false,
        }
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Spawn the player at the viewport center and the opening enemy wave
    pub fn setup(&mut self, world: &mut World) -> Result<ActorId, SpawnError> {
        let player = world.spawn(
            ActorKind::Player,
            SpawnConfig {
                pos: world.viewport().center(),
                ..Default::default()
            },
        )?;
        for _ in 0..self.tuning.desired_enemies {
            self.spawn_enemy(world)?;
        }
        log::info!(
            "run started: {} enemies, player {player:?}",
            self.tuning.desired_enemies
        );
        Ok(player)
    }

    /// Run once per frame, after the tick pass
    pub fn update(&mut self, world: &mut World) {
        if self.game_over {
            return;
        }

        if world.player_is_dead() {
            log::info!("player is dead, tearing down {} actors", world.len());
            world.remove_all();
            self.game_over = true;
            return;
        }

        while world.count_of(ActorKind::Enemy) < self.tuning.desired_enemies as usize {
            if self.spawn_enemy(world).is_err() {
                break;
            }
        }

        if world.count_of(ActorKind::Powerup) < self.tuning.max_powerups as usize
            && self.rng.random::<f32>() < self.tuning.powerup_chance
        {
            let pos = self.random_point(world.viewport());
            if let Err(err) = world.spawn(
                ActorKind::Powerup,
                SpawnConfig {
                    pos,
                    speed: Some(Speed::Stop),
                    ..Default::default()
                },
            ) {
                log::warn!("power-up spawn failed: {err}");
            }
        }
    }

    /// Enemies wander in a random heading, placed anywhere in the viewport
    /// except the zone around the player
    fn spawn_enemy(&mut self, world: &mut World) -> Result<ActorId, SpawnError> {
        let viewport = world.viewport();
        let safe_zone = self.safe_zone(world);

        let mut pos = self.random_point(viewport);
        for _ in 0..self.tuning.spawn_attempts {
            match safe_zone {
                Some(zone) if zone.contains(pos) => pos = self.random_point(viewport),
                _ => break,
            }
        }

        let rotation = self.rng.random_range(0.0..std::f32::consts::TAU);
        world.spawn(
            ActorKind::Enemy,
            SpawnConfig {
                pos,
                rotation: Some(rotation),
                speed: Some(Speed::Slow),
                ..Default::default()
            },
        )
    }

    /// Player bounds inflated by a fraction of the viewport width, or
    /// nothing when no player is alive
    fn safe_zone(&self, world: &World) -> Option<Rect> {
        let player = world.player().and_then(|id| world.get(id))?;
        let margin = world.viewport().width() / SAFE_ZONE_DIVISOR;
        Some(player.bounds().inflate(margin))
    }

    fn random_point(&mut self, viewport: Rect) -> Vec2 {
        Vec2::new(
            self.rng.random_range(viewport.min.x..viewport.max.x),
            self.rng.random_range(viewport.min.y..viewport.max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> (World, Director, ActorId) {
        let mut world = World::headless(Rect::from_size(800.0, 600.0));
        let mut director = Director::new(42, Tuning::default());
        let player = director.setup(&mut world).unwrap();
        (world, director, player)
    }

    #[test]
    fn test_setup_spawns_player_and_wave() {
        let (world, _, player) = run();
        assert!(world.contains(player));
        assert_eq!(world.count_of(ActorKind::Enemy), 10);
        assert_eq!(world.get(player).unwrap().pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_enemies_avoid_safe_zone() {
        let (world, director, _) = run();
        let zone = director.safe_zone(&world).unwrap();
        for id in world.actors_of(ActorKind::Enemy) {
            assert!(!zone.contains(world.get(id).unwrap().pos));
        }
    }

    #[test]
    fn test_update_tops_up_enemies() {
        let (mut world, mut director, _) = run();
        for id in world.actors_of(ActorKind::Enemy).into_iter().take(4) {
            world.dispose(id);
        }
        assert_eq!(world.count_of(ActorKind::Enemy), 6);

        director.update(&mut world);
        assert_eq!(world.count_of(ActorKind::Enemy), 10);
    }

    #[test]
    fn test_powerup_drops_respect_cap() {
        let mut world = World::headless(Rect::from_size(800.0, 600.0));
        let tuning = Tuning {
            powerup_chance: 1.0,
            max_powerups: 2,
            ..Default::default()
        };
        let mut director = Director::new(7, tuning);
        director.setup(&mut world).unwrap();

        for _ in 0..5 {
            director.update(&mut world);
        }
        assert_eq!(world.count_of(ActorKind::Powerup), 2);
    }

    #[test]
    fn test_player_death_tears_down_world() {
        let (mut world, mut director, player) = run();
        world.dispose(player);

        director.update(&mut world);
        assert!(director.game_over());
        assert!(world.is_empty());

        // A latched game over stops respawning
        director.update(&mut world);
        assert!(world.is_empty());
    }
}
