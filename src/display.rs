//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; world pixels are scaled onto the
//! terminal's character grid and drawn.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use side_scroller::config::GameConfig;
use side_scroller::entities::{Entity, Facing, Player, Rect, Role, World};
use side_scroller::session::{Screen, Session};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LIVES: Color = Color::Magenta;
const C_HUD_POINTS: Color = Color::Magenta;
const C_MUSIC: Color = Color::DarkCyan;
const C_BACKDROP: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Magenta;
const C_PLATFORM: Color = Color::DarkGreen;
const C_HAZARD: Color = Color::Red;
const C_GOAL: Color = Color::Yellow;
const C_COIN: Color = Color::Yellow;
const C_POWERUP: Color = Color::Cyan;
const C_HOSTILE: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

/// Columns between backdrop stars.
const BACKDROP_SPACING: i64 = 13;

// ── Projection ────────────────────────────────────────────────────────────────

/// Maps world pixels onto the play area: every row except the HUD (row 0)
/// and the hint line (last row).
struct Projection {
    sx: f32,
    sy: f32,
    cols: u16,
    rows: u16,
}

impl Projection {
    const TOP: u16 = 1;

    fn new(cfg: &GameConfig, cols: u16, rows: u16) -> Self {
        let field_rows = rows.saturating_sub(2).max(1);
        Self {
            sx: cols as f32 / cfg.viewport_width,
            sy: field_rows as f32 / cfg.viewport_height,
            cols,
            rows,
        }
    }

    fn field_bottom(&self) -> u16 {
        self.rows.saturating_sub(1).max(Self::TOP + 1)
    }

    /// Cell span `(col0, col1, row0, row1)`, end-exclusive, clipped to the
    /// play area. `None` when the rect is entirely off screen. Anything on
    /// screen covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = (rect.left() * self.sx).floor() as i64;
        let c1 = ((rect.right() * self.sx).ceil() as i64).max(c0 + 1);
        let r0 = (rect.top() * self.sy).floor() as i64 + Self::TOP as i64;
        let r1 = ((rect.bottom() * self.sy).ceil() as i64 + Self::TOP as i64).max(r0 + 1);

        let c0 = c0.max(0);
        let c1 = c1.min(self.cols as i64);
        let r0 = r0.max(Self::TOP as i64);
        let r1 = r1.min(self.field_bottom() as i64);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever the session is showing.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let proj = Projection::new(session.config(), cols, rows);
    match (session.screen(), session.world()) {
        (Screen::Menu, _) | (_, None) => draw_menu(out, cols, rows)?,
        (Screen::World, Some(world)) => {
            draw_world(out, &proj, world)?;
            draw_hud(out, world, session.music_on(), cols)?;
        }
        (Screen::Holding, Some(world)) => {
            draw_world(out, &proj, world)?;
            draw_hud(out, world, session.music_on(), cols)?;
            draw_banner(out, cols, rows)?;
        }
        (Screen::Won, Some(world)) => draw_end_panel(out, world, true, cols, rows)?,
        (Screen::Lost, Some(world)) => draw_end_panel(out, world, false, cols, rows)?,
    }
    draw_controls_hint(out, session.screen(), rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, proj: &Projection, world: &World) -> std::io::Result<()> {
    draw_backdrop(out, proj, world.background_x)?;

    // Static regions first so pickups and creatures stay visible on top.
    for entity in world.entities.iter().filter(|e| e.role.is_blocking()) {
        draw_entity(out, proj, entity)?;
    }
    for entity in world.entities.iter().filter(|e| !e.role.is_blocking()) {
        draw_entity(out, proj, entity)?;
    }
    draw_player(out, proj, &world.player)
}

/// Sparse star field that scrolls at half the world's speed.
fn draw_backdrop<W: Write>(
    out: &mut W,
    proj: &Projection,
    background_x: f32,
) -> std::io::Result<()> {
    let shift = (-background_x * proj.sx * 0.5) as i64;
    let sky_rows = proj.field_bottom().saturating_sub(Projection::TOP) / 3;
    out.queue(style::SetForegroundColor(C_BACKDROP))?;
    for row in (Projection::TOP..Projection::TOP + sky_rows).step_by(2) {
        for col in 0..proj.cols {
            if (col as i64 + shift + row as i64 * 5).rem_euclid(BACKDROP_SPACING) == 0 {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("·"))?;
            }
        }
    }
    Ok(())
}

fn glyph_for(role: Role) -> (&'static str, Color) {
    match role {
        Role::Walkable => ("█", C_PLATFORM),
        Role::Hazard => ("♣", C_HAZARD),
        Role::Goal => ("▓", C_GOAL),
        Role::Coin => ("o", C_COIN),
        Role::PowerUp => ("★", C_POWERUP),
        Role::Hostile => ("X", C_HOSTILE),
    }
}

fn fill<W: Write>(
    out: &mut W,
    (c0, c1, r0, r1): (u16, u16, u16, u16),
    glyph: &str,
) -> std::io::Result<()> {
    let line = glyph.repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_entity<W: Write>(out: &mut W, proj: &Projection, entity: &Entity) -> std::io::Result<()> {
    let Some(span) = proj.cells(entity.rect()) else {
        return Ok(());
    };
    let (glyph, color) = glyph_for(entity.role);
    out.queue(style::SetForegroundColor(color))?;
    fill(out, span, glyph)
}

fn draw_player<W: Write>(out: &mut W, proj: &Projection, player: &Player) -> std::io::Result<()> {
    let Some(span) = proj.cells(player.rect()) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    fill(out, span, "▒")?;

    // Eye on the leading edge of the top row shows which way we face.
    let (c0, c1, r0, _) = span;
    let (col, eye) = match player.facing {
        Facing::Right => (c1 - 1, "▶"),
        Facing::Left => (c0, "◀"),
    };
    out.queue(cursor::MoveTo(col, r0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(eye))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    world: &World,
    music_on: bool,
    cols: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", world.player.lives)))?;

    if music_on {
        out.queue(cursor::MoveTo(cols / 2, 0))?;
        out.queue(style::SetForegroundColor(C_MUSIC))?;
        out.queue(Print("♪"))?;
    }

    let points = format!("Points: {}", world.player.points);
    let px = cols.saturating_sub(points.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(px, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_POINTS))?;
    out.queue(Print(&points))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    cols: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let cy = rows / 2;
    print_centered(out, "★  SIDE  SCROLLER  ★", Color::Magenta, cols, cy.saturating_sub(6))?;
    print_centered(
        out,
        "Run right, grab coins and stars, reach the golden wall.",
        Color::White,
        cols,
        cy.saturating_sub(4),
    )?;

    let legend: &[(&str, Color, &str)] = &[
        ("o", C_COIN, " coin       +1 point"),
        ("★", C_POWERUP, " star       +1 life"),
        ("X", C_HOSTILE, " creature   -1 life"),
        ("♣", C_HAZARD, " plant      instant loss"),
        ("▓", C_GOAL, " goal       win"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo((cols / 2).saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    print_centered(out, "Press SPACE or ENTER to start", Color::Yellow, cols, cy + 4)?;
    Ok(())
}

/// Shown on the frozen world while the win jingle plays.
fn draw_banner<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let cy = rows / 2;
    print_centered(out, "╔══════════╗", Color::Yellow, cols, cy.saturating_sub(1))?;
    print_centered(out, "║  GOAL!   ║", Color::Yellow, cols, cy)?;
    print_centered(out, "╚══════════╝", Color::Yellow, cols, cy + 1)?;
    Ok(())
}

const WIN_BOX: &[&str] = &[
    "╔════════════════════╗",
    "║      YOU  WIN!     ║",
    "╚════════════════════╝",
];

const LOSS_BOX: &[&str] = &[
    "╔════════════════════╗",
    "║    GAME  OVER      ║",
    "╚════════════════════╝",
];

fn draw_end_panel<W: Write>(
    out: &mut W,
    world: &World,
    won: bool,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (lines, color) = if won {
        (WIN_BOX, Color::Yellow)
    } else {
        (LOSS_BOX, Color::Red)
    };

    let total_rows = lines.len() + 3; // box + points + lives + hint
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        print_centered(out, line, color, cols, start_row + i as u16)?;
    }

    let row = start_row + lines.len() as u16;
    print_centered(
        out,
        &format!("Points: {:>4}", world.player.points),
        Color::Magenta,
        cols,
        row,
    )?;
    print_centered(
        out,
        &format!("Lives:  {:>4}", world.player.lives),
        Color::Magenta,
        cols,
        row + 1,
    )?;
    print_centered(out, "SPACE / R - Play Again   Q - Quit", Color::White, cols, row + 2)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: Screen, rows: u16) -> std::io::Result<()> {
    let hint = match screen {
        Screen::World | Screen::Holding => "← → / A D : Run   ↑ / W : Jump   M : Music   Q : Quit",
        _ => "M : Music   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
