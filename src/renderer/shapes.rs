//! Shape generation for 2D primitives
//!
//! Everything is built in screen pixels (origin top-left, y down); the
//! pipeline maps to NDC on upload.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use super::vertex::{Vertex, colors};
use crate::assets::{GhostSprites, Sprite};
use crate::sim::{Direction, GameState, Rect, Visual};

/// Circle tessellation
const CIRCLE_SEGMENTS: u32 = 24;
/// Half-angle of the open mouth (corner to corner of the bounding box)
const MOUTH_HALF_ANGLE: f32 = FRAC_PI_4;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(bounds: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t) = (bounds.left() as f32, bounds.top() as f32);
    let (r, b) = (bounds.right() as f32, bounds.bottom() as f32);
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    pie(center, radius, 0.0, TAU, color, segments)
}

/// Generate vertices for a circular sector from `start` sweeping `sweep` radians
pub fn pie(
    center: Vec2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * sweep;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * sweep;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Screen angle of a facing (y grows downward)
fn facing_angle(facing: Direction) -> f32 {
    match facing {
        Direction::Right => 0.0,
        Direction::Down => FRAC_PI_2,
        Direction::Left => PI,
        Direction::Up => PI + FRAC_PI_2,
    }
}

/// Yellow disc, with a wedge removed toward `facing` while the mouth is open
pub fn pacman(bounds: Rect, facing: Direction, mouth_open: bool) -> Vec<Vertex> {
    let center = bounds.center().as_vec2();
    let radius = bounds.w.min(bounds.h) as f32 / 2.0;

    if !mouth_open {
        return circle(center, radius, colors::PLAYER, CIRCLE_SEGMENTS);
    }

    let sweep = TAU - 2.0 * MOUTH_HALF_ANGLE;
    let segments = (CIRCLE_SEGMENTS as f32 * sweep / TAU).round() as u32;
    pie(
        center,
        radius,
        facing_angle(facing) + MOUTH_HALF_ANGLE,
        sweep,
        colors::PLAYER,
        segments,
    )
}

/// One quad per horizontal run of identical opaque pixels
pub fn sprite(sprite: &Sprite, bounds: Rect) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if sprite.width == 0 || sprite.height == 0 {
        return vertices;
    }

    let sx = bounds.w as f32 / sprite.width as f32;
    let sy = bounds.h as f32 / sprite.height as f32;
    let origin = bounds.top_left().as_vec2();

    for y in 0..sprite.height {
        let mut x = 0;
        while x < sprite.width {
            let px = sprite.pixel(x, y);
            let mut end = x + 1;
            while end < sprite.width && sprite.pixel(end, y) == px {
                end += 1;
            }
            if px[3] > 0 {
                let color = colors::from_rgba8(px);
                let l = origin.x + x as f32 * sx;
                let r = origin.x + end as f32 * sx;
                let t = origin.y + y as f32 * sy;
                let b = t + sy;
                vertices.extend_from_slice(&[
                    Vertex::new(l, t, color),
                    Vertex::new(r, t, color),
                    Vertex::new(l, b, color),
                    Vertex::new(l, b, color),
                    Vertex::new(r, t, color),
                    Vertex::new(r, b, color),
                ]);
            }
            x = end;
        }
    }

    vertices
}

/// Build the whole frame from the state's draw list
pub fn build_frame(state: &GameState, sprites: &GhostSprites) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for item in state.draw_list() {
        let bounds = item.bounds;
        match item.visual {
            Visual::Wall => vertices.extend(rect(bounds, colors::WALL)),
            Visual::Pellet => vertices.extend(rect(bounds, colors::PELLET)),
            Visual::PowerPellet => vertices.extend(rect(bounds, colors::POWER_PELLET)),
            Visual::Player { facing, mouth_open } => {
                vertices.extend(pacman(bounds, facing, mouth_open))
            }
            Visual::Ghost { identity, edible } => match sprites.get(identity, edible) {
                Some(s) => vertices.extend(sprite(s, bounds)),
                None => log::trace!("No sprite for ghost identity {}", identity),
            },
        }
    }

    vertices
}
