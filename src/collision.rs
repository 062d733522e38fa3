//! Collision detection between pools
//!
//! Every test is an axis-aligned box: two points collide when they are closer
//! than the tolerance on *each* axis independently. Detection is read-only;
//! the pipeline applies the returned contacts so scoring stays in one place.

use crate::consts::{
    BULLET_ENEMY_TOLERANCE, ENEMY_BULLET_PLAYER_TOLERANCE, ENEMY_PLAYER_TOLERANCE,
    ITEM_PLAYER_TOLERANCE,
};
use crate::entities::{Bullet, BulletOwner, Enemy, Item, Vector2};
use crate::pool::{EntityPool, SlotIndex};

/// Per-axis box overlap with the same half-width on both axes.
#[inline]
pub fn overlaps(a: Vector2, b: Vector2, tolerance: f64) -> bool {
    (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}

/// A player bullet that destroyed an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub bullet: SlotIndex,
    pub enemy: SlotIndex,
}

/// Player bullets against enemies.
///
/// Bullets are scanned in slot order; each bullet takes the first active enemy
/// it overlaps and is then spent. An enemy claimed by an earlier bullet is no
/// longer a candidate for later ones.
pub fn player_bullets_vs_enemies(
    bullets: &EntityPool<Bullet>,
    enemies: &EntityPool<Enemy>,
) -> Vec<Kill> {
    let mut kills: Vec<Kill> = Vec::new();

    for (bi, bullet) in bullets.iter_active() {
        if bullet.owner != BulletOwner::Player {
            continue;
        }
        let target = enemies.iter_active().find(|(ei, enemy)| {
            !kills.iter().any(|k| k.enemy == *ei)
                && overlaps(bullet.position, enemy.position, BULLET_ENEMY_TOLERANCE)
        });
        if let Some((ei, _)) = target {
            kills.push(Kill {
                bullet: bi,
                enemy: ei,
            });
        }
    }

    kills
}

/// Enemy bullets overlapping the player. Each one costs a life.
pub fn enemy_bullets_vs_player(bullets: &EntityPool<Bullet>, player: Vector2) -> Vec<SlotIndex> {
    bullets
        .iter_active()
        .filter(|(_, b)| {
            b.owner == BulletOwner::Enemy
                && overlaps(b.position, player, ENEMY_BULLET_PLAYER_TOLERANCE)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Enemy bodies overlapping the player. Any one is fatal.
pub fn enemies_vs_player(enemies: &EntityPool<Enemy>, player: Vector2) -> Vec<SlotIndex> {
    enemies
        .iter_active()
        .filter(|(_, e)| overlaps(e.position, player, ENEMY_PLAYER_TOLERANCE))
        .map(|(i, _)| i)
        .collect()
}

/// Items within pickup range of the player.
pub fn items_vs_player(items: &EntityPool<Item>, player: Vector2) -> Vec<SlotIndex> {
    items
        .iter_active()
        .filter(|(_, item)| overlaps(item.position, player, ITEM_PLAYER_TOLERANCE))
        .map(|(i, _)| i)
        .collect()
}
