//! Plane Shooter - a fixed-timestep arcade shooter
//!
//! Core modules:
//! - `entities`: plain data for the player and every pooled entity
//! - `pool`: fixed-capacity slot arrays with active/inactive tagging
//! - `rules`: score-driven difficulty functions
//! - `collision`: hit-box tests that report what collided, without mutating
//! - `state` / `pipeline`: the owned simulation and its per-tick `advance`
//! - `highscore`: leaderboard persistence used by the driver

pub mod collision;
pub mod entities;
pub mod highscore;
pub mod pipeline;
pub mod pool;
pub mod rules;
pub mod state;

pub use entities::{Direction, GameStatus, Vector2};
pub use highscore::HighScores;
pub use pipeline::{EventSink, GameEvent, NullSink, TickInput};
pub use state::{SimulationState, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Playfield size in cells. Row 0 / column 0 and the last row / column are walls.
    pub const WIDTH: i32 = 40;
    pub const HEIGHT: i32 = 25;

    /// Nominal driver rate; the core itself never looks at wall-clock time.
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Pool capacities
    pub const MAX_BULLETS: usize = 100;
    pub const MAX_ENEMIES: usize = 10;
    pub const MAX_ITEMS: usize = 5;
    pub const MAX_EXPLOSIONS: usize = 10;

    pub const START_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 5;
    pub const MAX_POWER_LEVEL: u8 = 2;
    /// PowerUp duration (10 s at the nominal tick rate)
    pub const POWER_DURATION: u32 = 10 * TICKS_PER_SECOND;

    /// Player movement per tick
    pub const PLAYER_SPEED: f64 = 0.7;
    pub const PRECISION_SPEED: f64 = 0.25;

    pub const PLAYER_BULLET_SPEED: f64 = 1.0;
    pub const AIMED_BULLET_SPEED: f64 = 0.5;
    pub const ITEM_FALL_SPEED: f64 = 0.15;

    pub const EXPLOSION_TTL: u32 = 10;
    /// Chance that a killed enemy drops an item
    pub const ITEM_DROP_CHANCE: f64 = 0.10;

    /// Hit-box half-widths (same on both axes)
    pub const BULLET_ENEMY_TOLERANCE: f64 = 0.8;
    pub const ENEMY_BULLET_PLAYER_TOLERANCE: f64 = 0.5;
    pub const ENEMY_PLAYER_TOLERANCE: f64 = 0.8;
    pub const ITEM_PLAYER_TOLERANCE: f64 = 1.2;
}
