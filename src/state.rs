//! Simulation state and read-only snapshots
//!
//! `SimulationState` owns the player, the four entity pools, the frame counter
//! and the seeded RNG. Nothing else holds entity data; cross-entity references
//! are pool slot indices.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::entities::*;
use crate::pool::{EntityPool, SlotIndex};
use crate::rules;

/// Complete simulation state. Cloning it yields an independent run that
/// continues identically for identical inputs.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was built from
    pub seed: u64,
    pub status: GameStatus,
    /// Processed ticks
    pub frame_count: u64,
    pub player: Player,
    pub bullets: EntityPool<Bullet>,
    pub enemies: EntityPool<Enemy>,
    pub items: EntityPool<Item>,
    pub explosions: EntityPool<Explosion>,
    pub rng: Pcg32,
}

impl SimulationState {
    /// Fresh game: score 0, three lives, empty pools.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            status: GameStatus::Ready,
            frame_count: 0,
            player: Player::default(),
            bullets: EntityPool::new(MAX_BULLETS),
            enemies: EntityPool::new(MAX_ENEMIES),
            items: EntityPool::new(MAX_ITEMS),
            explosions: EntityPool::new(MAX_EXPLOSIONS),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    // ── Spawning (full pools drop the spawn) ─────────────────────────────────

    pub fn spawn_bullet(
        &mut self,
        position: Vector2,
        velocity: Vector2,
        owner: BulletOwner,
    ) -> Option<SlotIndex> {
        self.bullets.spawn(Bullet {
            position,
            velocity,
            owner,
        })
    }

    /// New enemy at the top edge with a score-weighted kind and a random column.
    pub fn spawn_enemy(&mut self) -> Option<SlotIndex> {
        if self.enemies.is_full() {
            return None;
        }
        let x = rules::spawn_column(&mut self.rng);
        let kind = rules::enemy_kind(self.player.score, &mut self.rng);
        let fire_cooldown = rules::initial_fire_cooldown(&mut self.rng);
        let slot = self.enemies.spawn(Enemy {
            position: Vector2::new(x, 1.0),
            fire_cooldown,
            kind,
        });
        log::debug!("frame {}: spawned {:?} at x={}", self.frame_count, kind, x);
        slot
    }

    pub fn spawn_item(&mut self, position: Vector2, kind: ItemKind) -> Option<SlotIndex> {
        self.items.spawn(Item { position, kind })
    }

    pub fn spawn_explosion(&mut self, position: Vector2) -> Option<SlotIndex> {
        self.explosions.spawn(Explosion {
            position,
            ttl: EXPLOSION_TTL,
        })
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame_count,
            status: self.status,
            player: self.player.clone(),
            bullets: self
                .bullets
                .iter_active()
                .map(|(_, b)| BulletView {
                    position: b.position,
                    owner: b.owner,
                })
                .collect(),
            enemies: self
                .enemies
                .iter_active()
                .map(|(_, e)| EnemyView {
                    position: e.position,
                    kind: e.kind,
                })
                .collect(),
            items: self
                .items
                .iter_active()
                .map(|(_, i)| ItemView {
                    position: i.position,
                    kind: i.kind,
                })
                .collect(),
            explosions: self
                .explosions
                .iter_active()
                .map(|(_, x)| ExplosionView {
                    position: x.position,
                    ttl: x.ttl,
                })
                .collect(),
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Vector2,
    pub owner: BulletOwner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Vector2,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub position: Vector2,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Vector2,
    pub ttl: u32,
}

/// Everything a renderer needs for one frame, in pool slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub status: GameStatus,
    pub player: Player,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub items: Vec<ItemView>,
    pub explosions: Vec<ExplosionView>,
}
