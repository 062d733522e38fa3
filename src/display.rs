/// Rendering layer: all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable `Snapshot`.
/// No game logic is performed; this module only translates the snapshot
/// into terminal commands. Playfield cell (x, y) is drawn at terminal
/// column x, row y + 1 (row 0 is the HUD).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use plane_shooter::consts::{HEIGHT, TICKS_PER_SECOND, WIDTH};
use plane_shooter::entities::{BulletOwner, EnemyKind, GameStatus, ItemKind, Vector2};
use plane_shooter::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_POWER: Color = Color::Yellow;
const C_PRECISION: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows the whole screen occupies: HUD + playfield + hint.
const HUD_ROWS: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `new_record` is only consulted after game over.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    best: u32,
    new_record: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;
    draw_hud(out, snap, best)?;

    for explosion in &snap.explosions {
        put(out, explosion.position, "#", C_EXPLOSION)?;
    }
    for item in &snap.items {
        let (glyph, color) = match item.kind {
            ItemKind::Heal => ("+", Color::Magenta),
            ItemKind::PowerUp => ("P", Color::Yellow),
        };
        put(out, item.position, glyph, color)?;
    }
    for enemy in &snap.enemies {
        let (glyph, color) = match enemy.kind {
            EnemyKind::Seeker => ("V", Color::Green),
            EnemyKind::Diver => ("W", Color::Red),
            EnemyKind::Spreader => ("M", Color::Magenta),
        };
        put(out, enemy.position, glyph, color)?;
    }
    for bullet in &snap.bullets {
        match bullet.owner {
            BulletOwner::Player => put(out, bullet.position, "|", C_BULLET_PLAYER)?,
            BulletOwner::Enemy => put(out, bullet.position, "*", C_BULLET_ENEMY)?,
        }
    }
    put(out, snap.player.position, "A", C_PLAYER)?;

    draw_controls_hint(out)?;

    if snap.status == GameStatus::GameOver {
        draw_game_over(out, snap, best, new_record)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, HUD_ROWS + HEIGHT as u16 + 1))?;
    out.flush()?;
    Ok(())
}

/// Draw one glyph at a playfield cell, skipping anything on or past the walls.
fn put<W: Write>(out: &mut W, pos: Vector2, glyph: &str, color: Color) -> std::io::Result<()> {
    let (x, y) = (pos.x as i32, pos.y as i32);
    if x <= 0 || x >= WIDTH - 1 || y <= 0 || y >= HEIGHT - 1 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(x as u16, y as u16 + HUD_ROWS))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = WIDTH as usize;
    let top = HUD_ROWS;
    let bottom = HUD_ROWS + HEIGHT as u16 - 1;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w - 2))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w - 2))))?;

    for row in top + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(WIDTH as u16 - 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, best: u32) -> std::io::Result<()> {
    let p = &snap.player;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5} Hi:{:>5} ", p.score, best.max(p.score))))?;

    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("{:<5} ", "♥".repeat(p.lives as usize))))?;

    if p.power_level > 0 {
        let secs = p.power_timer / TICKS_PER_SECOND + 1;
        out.queue(style::SetForegroundColor(C_POWER))?;
        out.queue(Print(format!("P{} {:>2}s ", p.power_level, secs)))?;
    }
    if p.precision_mode {
        out.queue(style::SetForegroundColor(C_PRECISION))?;
        out.queue(Print("[FINE]"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, HUD_ROWS + HEIGHT as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/arrows: move  Shift: fine  Q: quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    best: u32,
    new_record: bool,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", snap.player.score);
    let (best_line, best_color) = if new_record {
        (format!("★ NEW BEST: {:>6} ★", snap.player.score), Color::Yellow)
    } else {
        (format!("Best Score:  {:>6}", best), Color::DarkGrey)
    };

    let lines: [(&str, Color); 6] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), best_color),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = WIDTH as u16 / 2;
    let start_row = (HUD_ROWS + HEIGHT as u16 / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
