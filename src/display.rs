/// Rendering layer. All terminal I/O lives here.
///
/// `TerminalScene` is the `Scene` the simulation's render sync talks to.  It
/// only records node positions; `present` projects the 800×600-style arena
/// onto the terminal grid and draws a whole frame.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::entities::{GameState, GameStatus, Overlay, Sprite};
use invaders::render::Scene;
use tracing::trace;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_LASER: Color = Color::Cyan;
const C_ENEMY_LASER: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Scene ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

struct Node {
    sprite: Sprite,
    x: f64,
    y: f64,
}

pub struct TerminalScene {
    nodes: HashMap<NodeHandle, Node>,
    next_handle: u32,
    /// Overlays stay up once shown.
    overlays: Vec<Overlay>,
    arena_width: f64,
    arena_height: f64,
}

impl TerminalScene {
    pub fn new(arena_width: f64, arena_height: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            next_handle: 0,
            overlays: Vec::new(),
            arena_width,
            arena_height,
        }
    }
}

impl Scene for TerminalScene {
    type Node = NodeHandle;

    fn create_node(&mut self, sprite: Sprite) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        trace!(
            node = handle.0,
            class = sprite.class(),
            image = sprite.image(),
            "node created"
        );
        // Off-screen until the first position sync.
        self.nodes.insert(handle, Node { sprite, x: -1.0, y: -1.0 });
        handle
    }

    fn set_position(&mut self, node: NodeHandle, x: f64, y: f64) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.x = x;
            n.y = y;
        }
    }

    fn remove_node(&mut self, node: NodeHandle) {
        self.nodes.remove(&node);
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        if !self.overlays.contains(&overlay) {
            self.overlays.push(overlay);
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

impl TerminalScene {
    /// Render one complete frame.
    pub fn present<W: Write>(&self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_border(out, width, height)?;
        draw_hud(out, state, width)?;

        // Draw in a stable order so overlapping glyphs don't flicker.
        let mut nodes: Vec<(&NodeHandle, &Node)> = self.nodes.iter().collect();
        nodes.sort_by_key(|(h, _)| h.0);
        for (_, node) in nodes {
            if node.x < 0.0 || node.y < 0.0 {
                continue;
            }
            let (col, row) = self.project(node.x, node.y, width, height);
            draw_sprite(out, node.sprite, col, row, width)?;
        }

        draw_controls_hint(out, height)?;

        for overlay in &self.overlays {
            draw_overlay(out, *overlay, width, height)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    /// Arena coordinates → terminal cell inside the border (rows 2 .. h-3).
    fn project(&self, x: f64, y: f64, width: u16, height: u16) -> (u16, u16) {
        let inner_w = width.saturating_sub(2).max(1) as f64;
        let inner_h = height.saturating_sub(4).max(1) as f64;
        let col = (x / self.arena_width * inner_w).floor().clamp(0.0, inner_w - 1.0) as u16 + 1;
        let row = (y / self.arena_height * inner_h).floor().clamp(0.0, inner_h - 1.0) as u16 + 2;
        (col, row)
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Enemies:{:>3}", state.enemies.len())))?;

    let status = match state.status {
        GameStatus::Running => "",
        GameStatus::Won => "[ CLEARED ]",
        GameStatus::Lost => "[ DESTROYED ]",
    };
    let sx = (width / 2).saturating_sub(status.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(Print(status))?;

    let cooldown = if state.laser_cooldown == 0 {
        "Laser: READY".to_string()
    } else {
        format!("Laser: {:>2}", state.laser_cooldown)
    };
    let rx = width.saturating_sub(cooldown.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(cooldown))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: Sprite,
    col: u16,
    row: u16,
    width: u16,
) -> std::io::Result<()> {
    let (glyph, color) = match sprite {
        Sprite::Player => ("/▲\\", C_PLAYER),
        Sprite::Enemy => ("«▼»", C_ENEMY),
        Sprite::Laser => ("║", C_LASER),
        Sprite::EnemyLaser => ("↓", C_ENEMY_LASER),
    };
    // Centre multi-cell sprites on the projected cell, inside the side walls.
    let half = glyph.chars().count() as u16 / 2;
    let max_col = width.saturating_sub(1 + glyph.chars().count() as u16);
    let lx = col.saturating_sub(half).max(1).min(max_col.max(1));
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

const GAME_OVER_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║    GAME  OVER      ║",
    "╚════════════════════╝",
];

const VICTORY_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║  CONGRATULATIONS!  ║",
    "╚════════════════════╝",
];

fn draw_overlay<W: Write>(
    out: &mut W,
    overlay: Overlay,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // Victory sits below centre so both boxes fit when a won game is lost.
    let (lines, color, offset) = match overlay {
        Overlay::GameOver => (&GAME_OVER_BOX, Color::Red, 0u16),
        Overlay::Victory => (&VICTORY_BOX, Color::Yellow, 4u16),
    };

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2) + offset;
    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
