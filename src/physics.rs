//! Gravity and axis-separated collision against walkable regions.
//!
//! Horizontal motion is resolved before vertical motion so a sideways push
//! never tunnels into geometry the body has not yet reached vertically.
//! Nothing here keeps a "grounded" flag: support is probed from geometry
//! whenever it is needed, so it cannot go stale after a scroll.

use crate::config::GameConfig;
use crate::entities::{Body, Rect};

/// What happened to a body during one `step_body`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub blocked_horizontally: bool,
    pub landed: bool,
    pub bumped_head: bool,
}

/// Accelerate downward. A body at rest is snapped to the takeoff speed so
/// the vertical pass re-tests its support every tick.
pub fn apply_gravity(body: &mut Body, cfg: &GameConfig) {
    if body.dy == 0.0 {
        body.dy = cfg.takeoff_velocity;
    } else {
        body.dy += cfg.gravity;
    }
}

fn hits<'a>(body: &'a Body, blocks: &'a [Rect]) -> impl Iterator<Item = &'a Rect> + 'a {
    blocks.iter().filter(move |b| body.rect().intersects(b))
}

/// Move horizontally by `dx` and push back out of anything struck.
pub fn resolve_horizontal(body: &mut Body, blocks: &[Rect]) -> bool {
    body.translate(body.dx, 0.0);
    if body.dx > 0.0 {
        let struck = hits(body, blocks).map(Rect::left).reduce(f32::min);
        if let Some(left) = struck {
            body.set_right(left);
            return true;
        }
    } else if body.dx < 0.0 {
        let struck = hits(body, blocks).map(Rect::right).reduce(f32::max);
        if let Some(right) = struck {
            body.set_left(right);
            return true;
        }
    }
    false
}

/// Move vertically by `dy`; landing or a head-bump always zeroes `dy`.
pub fn resolve_vertical(body: &mut Body, blocks: &[Rect]) -> StepReport {
    let mut report = StepReport::default();
    body.translate(0.0, body.dy);
    if body.dy > 0.0 {
        let struck = hits(body, blocks).map(Rect::top).reduce(f32::min);
        if let Some(top) = struck {
            body.land_on(top);
            report.landed = true;
        }
    } else if body.dy < 0.0 {
        let struck = hits(body, blocks).map(Rect::bottom).reduce(f32::max);
        if let Some(bottom) = struck {
            body.bump_head(bottom);
            report.bumped_head = true;
        }
    }
    report
}

/// One full physics step: gravity, then horizontal, then vertical.
pub fn step_body(body: &mut Body, blocks: &[Rect], cfg: &GameConfig) -> StepReport {
    apply_gravity(body, cfg);
    let blocked_horizontally = resolve_horizontal(body, blocks);
    StepReport {
        blocked_horizontally,
        ..resolve_vertical(body, blocks)
    }
}

/// True if something is directly under the body, or it stands on the
/// ground line. The body is displaced for the test and restored after.
///
/// Only blocks the displaced body newly overlaps count. A wall the scroll
/// has pushed into the body's side overlaps it already and is not support.
pub fn is_supported(body: &mut Body, blocks: &[Rect], cfg: &GameConfig) -> bool {
    if body.rect().bottom() == cfg.ground_y {
        return true;
    }
    let resting = *body.rect();
    body.translate(0.0, cfg.probe_depth);
    let found = hits(body, blocks).any(|b| !resting.intersects(b));
    body.set_top(resting.top());
    found
}

/// Launch upward if supported. The impulse is assigned, not added, so
/// repeated requests can never exceed it.
pub fn try_jump(body: &mut Body, blocks: &[Rect], cfg: &GameConfig) -> bool {
    if !is_supported(body, blocks, cfg) {
        return false;
    }
    body.dy = cfg.jump_impulse;
    true
}
