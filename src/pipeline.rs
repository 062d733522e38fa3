//! Per-tick update pipeline
//!
//! `advance` runs one fixed tick in a fixed order:
//! input -> firing -> bullets -> enemies -> items -> explosions -> collisions,
//! then checks for game over. Side effects leave the core only as
//! [`GameEvent`]s pushed into an [`EventSink`].

use serde::{Deserialize, Serialize};

use crate::collision;
use crate::consts::*;
use crate::entities::{BulletOwner, Direction, EnemyKind, GameStatus, ItemKind, Vector2};
use crate::rules;
use crate::state::{SimulationState, Snapshot};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Most recent movement key, if any
    pub direction: Direction,
    /// Held modifier: slow, fine-grained movement
    pub precision: bool,
}

impl TickInput {
    pub fn moving(direction: Direction) -> Self {
        Self {
            direction,
            precision: false,
        }
    }
}

/// Notifications for the audio (or any other fire-and-forget) collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    /// A player bullet destroyed an enemy
    EnemyHit { kind: EnemyKind },
    /// Lost a life to a bullet, or all of them to a ram
    PlayerDamaged,
    /// An enemy rammed the player and blew up
    EnemyExploded,
    ItemCollected { kind: ItemKind },
    GameOver { score: u32 },
}

/// Receives events as the tick produces them. Must not block.
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: GameEvent) {}
}

impl SimulationState {
    /// Advance the simulation by exactly one tick and return the resulting
    /// snapshot. Once the game is over the state is left untouched.
    pub fn advance(&mut self, input: &TickInput, events: &mut impl EventSink) -> Snapshot {
        match self.status {
            GameStatus::GameOver => return self.snapshot(),
            GameStatus::Ready => {
                log::info!("simulation started (seed {})", self.seed);
                self.status = GameStatus::Running;
            }
            GameStatus::Running => {}
        }

        self.frame_count += 1;

        apply_input(self, input);
        fire_player_weapon(self, events);
        move_bullets(self);
        spawn_and_move_enemies(self);
        move_items(self);
        tick_explosions(self);
        resolve_collisions(self, events);

        // Evaluated once, after every collision pair has been resolved.
        if self.player.lives == 0 {
            self.status = GameStatus::GameOver;
            log::info!(
                "game over at frame {} with score {}",
                self.frame_count,
                self.player.score
            );
            events.notify(GameEvent::GameOver {
                score: self.player.score,
            });
        }

        self.snapshot()
    }
}

// ── 1. Input ─────────────────────────────────────────────────────────────────

fn apply_input(state: &mut SimulationState, input: &TickInput) {
    let player = &mut state.player;
    player.precision_mode = input.precision;

    let speed = if input.precision {
        PRECISION_SPEED
    } else {
        PLAYER_SPEED
    };
    let target = player.position + input.direction.delta() * speed;

    // Moves that would leave the interior are refused outright.
    let inside = (1.0..=(WIDTH - 2) as f64).contains(&target.x)
        && (1.0..=(HEIGHT - 2) as f64).contains(&target.y);
    if inside {
        player.position = target;
    }
}

// ── 2. Firing & power timer ──────────────────────────────────────────────────

fn fire_player_weapon(state: &mut SimulationState, events: &mut impl EventSink) {
    state.player.shoot_timer += 1;
    if state.player.shoot_timer >= rules::fire_interval(state.player.score) {
        let origin = state.player.position;
        for &offset in rules::power_pattern(state.player.power_level) {
            state.spawn_bullet(
                Vector2::new(origin.x + offset, origin.y - 1.0),
                rules::player_bullet_velocity(),
                BulletOwner::Player,
            );
        }
        state.player.shoot_timer = 0;
        events.notify(GameEvent::PlayerFired);
    }

    let player = &mut state.player;
    if player.power_timer > 0 {
        player.power_timer -= 1;
        if player.power_timer == 0 {
            player.power_level = 0;
        }
    }
}

// ── 3. Bullets ───────────────────────────────────────────────────────────────

fn move_bullets(state: &mut SimulationState) {
    state.bullets.update_active(|bullet| {
        bullet.position += bullet.velocity;
        bullet.in_bounds()
    });
}

// ── 4. Enemies ───────────────────────────────────────────────────────────────

fn spawn_and_move_enemies(state: &mut SimulationState) {
    if rules::is_spawn_frame(state.frame_count, state.player.score) {
        state.spawn_enemy();
    }

    let target = state.player.position;
    let rng = &mut state.rng;
    // Shots are queued and spawned afterwards, in enemy slot order.
    let mut shots: Vec<(Vector2, Vector2)> = Vec::new();

    state.enemies.update_active(|enemy| {
        enemy.position.y += rules::descent_speed(enemy.kind);
        if enemy.position.y >= (HEIGHT - 1) as f64 {
            return false;
        }

        enemy.fire_cooldown -= 1;
        if enemy.fire_cooldown <= 0 {
            if let Some(reload) = rules::reload_cooldown(enemy.kind, rng) {
                match enemy.kind {
                    EnemyKind::Seeker => {
                        if let Some(velocity) = rules::aimed_velocity(enemy.position, target) {
                            shots.push((enemy.position, velocity));
                        }
                    }
                    EnemyKind::Spreader => {
                        shots.extend(rules::SPREAD_VOLLEY.iter().map(|&v| (enemy.position, v)));
                    }
                    EnemyKind::Diver => {}
                }
                enemy.fire_cooldown = reload;
            }
        }
        true
    });

    for (position, velocity) in shots {
        state.spawn_bullet(position, velocity, BulletOwner::Enemy);
    }
}

// ── 5. Items ─────────────────────────────────────────────────────────────────

fn move_items(state: &mut SimulationState) {
    state.items.update_active(|item| {
        item.position.y += ITEM_FALL_SPEED;
        item.position.y < (HEIGHT - 1) as f64
    });
}

// ── 6. Explosions ────────────────────────────────────────────────────────────

fn tick_explosions(state: &mut SimulationState) {
    state.explosions.update_active(|explosion| {
        explosion.ttl = explosion.ttl.saturating_sub(1);
        explosion.ttl > 0
    });
}

// ── 7. Collisions ────────────────────────────────────────────────────────────

/// Each pair is detected against the state left by the previous pair, so an
/// enemy shot down this tick can no longer ram the player.
fn resolve_collisions(state: &mut SimulationState, events: &mut impl EventSink) {
    // A. Player bullets vs enemies
    for kill in collision::player_bullets_vs_enemies(&state.bullets, &state.enemies) {
        state.bullets.deactivate(kill.bullet);
        let Some(enemy) = state.enemies.deactivate(kill.enemy) else {
            continue;
        };
        state.spawn_explosion(enemy.position);
        state.player.score += rules::score_for(enemy.kind);
        events.notify(GameEvent::EnemyHit { kind: enemy.kind });
        log::debug!(
            "frame {}: {:?} destroyed, score {}",
            state.frame_count,
            enemy.kind,
            state.player.score
        );

        if let Some(kind) = rules::roll_item_drop(&mut state.rng) {
            state.spawn_item(enemy.position, kind);
        }
    }

    let player_pos = state.player.position;

    // B. Enemy bullets vs player
    for slot in collision::enemy_bullets_vs_player(&state.bullets, player_pos) {
        state.bullets.deactivate(slot);
        state.player.lives = state.player.lives.saturating_sub(1);
        events.notify(GameEvent::PlayerDamaged);
    }

    // C. Enemy bodies vs player: fatal regardless of lives left
    for slot in collision::enemies_vs_player(&state.enemies, player_pos) {
        if let Some(enemy) = state.enemies.deactivate(slot) {
            state.spawn_explosion(enemy.position);
        }
        state.player.lives = 0;
        events.notify(GameEvent::EnemyExploded);
        events.notify(GameEvent::PlayerDamaged);
    }

    // D. Items vs player
    for slot in collision::items_vs_player(&state.items, player_pos) {
        let Some(item) = state.items.deactivate(slot) else {
            continue;
        };
        let player = &mut state.player;
        match item.kind {
            // A heal cannot revive a player already at zero lives.
            ItemKind::Heal if player.lives > 0 => {
                player.lives = (player.lives + 1).min(MAX_LIVES)
            }
            ItemKind::Heal => {}
            ItemKind::PowerUp => {
                player.power_level = (player.power_level + 1).min(MAX_POWER_LEVEL);
                player.power_timer = POWER_DURATION;
            }
        }
        log::debug!("frame {}: picked up {:?}", state.frame_count, item.kind);
        events.notify(GameEvent::ItemCollected { kind: item.kind });
    }
}
