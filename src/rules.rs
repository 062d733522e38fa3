/// Difficulty and behaviour rules.
///
/// Everything here is a pure function of score, kind or power level. Functions
/// that need randomness take the RNG explicitly so callers control determinism.

use rand::Rng;

use crate::consts::{AIMED_BULLET_SPEED, ITEM_DROP_CHANCE, PLAYER_BULLET_SPEED, WIDTH};
use crate::entities::{EnemyKind, ItemKind, Vector2};

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Ticks between player volleys. Never below 3.
pub fn fire_interval(score: u32) -> u32 {
    15u32.saturating_sub(score / 50).max(3)
}

/// Ticks between enemy spawn attempts. Never below 15.
pub fn spawn_interval(score: u32) -> u32 {
    30u32.saturating_sub(score / 100).max(15)
}

/// A spawn attempt happens on every frame that is a multiple of the interval.
pub fn is_spawn_frame(frame: u64, score: u32) -> bool {
    frame % spawn_interval(score) as u64 == 0
}

/// Score-weighted enemy mix. No random draw is taken below 100 points.
pub fn enemy_kind(score: u32, rng: &mut impl Rng) -> EnemyKind {
    if score < 100 {
        return EnemyKind::Seeker;
    }
    let roll: f64 = rng.gen();
    if score < 300 {
        if roll < 0.70 {
            EnemyKind::Seeker
        } else {
            EnemyKind::Diver
        }
    } else if roll < 0.50 {
        EnemyKind::Seeker
    } else if roll < 0.80 {
        EnemyKind::Diver
    } else {
        EnemyKind::Spreader
    }
}

// ── Player weapon ────────────────────────────────────────────────────────────

/// Horizontal offsets of each bullet in one volley.
pub fn power_pattern(power_level: u8) -> &'static [f64] {
    match power_level {
        0 => &[0.0],
        1 => &[-0.5, 0.5],
        _ => &[-0.7, 0.0, 0.7],
    }
}

pub fn player_bullet_velocity() -> Vector2 {
    Vector2::new(0.0, -PLAYER_BULLET_SPEED)
}

// ── Enemy behaviour ──────────────────────────────────────────────────────────

/// Downward speed per tick.
pub fn descent_speed(kind: EnemyKind) -> f64 {
    match kind {
        EnemyKind::Seeker => 0.1,
        EnemyKind::Diver => 0.3,
        EnemyKind::Spreader => 0.08,
    }
}

/// Score awarded per enemy destroyed.
pub fn score_for(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Seeker => 10,
        EnemyKind::Diver => 15,
        EnemyKind::Spreader => 20,
    }
}

/// Column for a freshly spawned enemy, inside the side walls.
pub fn spawn_column(rng: &mut impl Rng) -> f64 {
    rng.gen_range(1..=WIDTH - 2) as f64
}

pub fn initial_fire_cooldown(rng: &mut impl Rng) -> i32 {
    rng.gen_range(20..50)
}

/// Cooldown after a shot, or `None` for kinds that never fire.
pub fn reload_cooldown(kind: EnemyKind, rng: &mut impl Rng) -> Option<i32> {
    match kind {
        EnemyKind::Seeker => Some(rng.gen_range(40..80)),
        EnemyKind::Spreader => Some(rng.gen_range(50..80)),
        EnemyKind::Diver => None,
    }
}

/// Velocity of a shot from `from` aimed at `target`. `None` when the two
/// coincide exactly and no direction exists.
pub fn aimed_velocity(from: Vector2, target: Vector2) -> Option<Vector2> {
    (target - from).try_normalize().map(|dir| dir * AIMED_BULLET_SPEED)
}

pub const SPREAD_VOLLEY: [Vector2; 3] = [
    Vector2::new(-0.3, 0.5),
    Vector2::new(0.0, 0.6),
    Vector2::new(0.3, 0.5),
];

/// Roll the drop chance for a kill; on success the kind is uniform.
pub fn roll_item_drop(rng: &mut impl Rng) -> Option<ItemKind> {
    if !rng.gen_bool(ITEM_DROP_CHANCE) {
        return None;
    }
    Some(if rng.gen_bool(0.5) {
        ItemKind::Heal
    } else {
        ItemKind::PowerUp
    })
}
