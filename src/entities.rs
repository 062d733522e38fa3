/// All game entity types: pure data, no per-tick logic.
///
/// Pooled entities carry no `active` flag of their own; liveness is tracked
/// by the owning [`EntityPool`](crate::pool::EntityPool) slot.

use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, START_LIVES, WIDTH};

/// 2-D position / velocity, in playfield cells.
pub type Vector2 = glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Built but not yet advanced.
    Ready,
    Running,
    /// Terminal: `advance` no longer processes ticks.
    GameOver,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// One movement command per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Decode a WASD key. Anything unrecognised is `None`, never an error.
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => Direction::None,
        }
    }

    /// Unit step in screen space (y grows downward).
    pub fn delta(self) -> Vector2 {
        match self {
            Direction::None => Vector2::ZERO,
            Direction::Up => Vector2::new(0.0, -1.0),
            Direction::Down => Vector2::new(0.0, 1.0),
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vector2,
    pub velocity: Vector2,
    pub owner: BulletOwner,
}

impl Bullet {
    /// True while strictly inside the playfield on both axes.
    pub fn in_bounds(&self) -> bool {
        let p = self.position;
        p.x > 0.0 && p.x < WIDTH as f64 && p.y > 0.0 && p.y < HEIGHT as f64
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow, fires a single shot aimed at the player.
    Seeker,
    /// Fast, never fires.
    Diver,
    /// Slowest, fires a fixed three-way spread.
    Spreader,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Vector2,
    /// Ticks until the next shot; fires when it drops to zero or below.
    pub fire_cooldown: i32,
    pub kind: EnemyKind,
}

// ── Items & effects ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// +1 life, capped.
    Heal,
    /// +1 power level (capped) and a fresh power timer.
    PowerUp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub position: Vector2,
    pub kind: ItemKind,
}

/// Cosmetic countdown left where an enemy died.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub position: Vector2,
    pub ttl: u32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vector2,
    pub lives: u32,
    pub score: u32,
    /// Ticks since the last volley.
    pub shoot_timer: u32,
    /// 0 = single shot, 1 = twin, 2 = triple.
    pub power_level: u8,
    pub power_timer: u32,
    pub precision_mode: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vector2::new((WIDTH / 2) as f64, (HEIGHT - 2) as f64),
            lives: START_LIVES,
            score: 0,
            shoot_timer: 0,
            power_level: 0,
            power_timer: 0,
            precision_mode: false,
        }
    }
}
