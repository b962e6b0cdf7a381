//! Scene tessellation for 2D sprites
//!
//! Builds the frame's vertex list in a fixed order: backdrop layers, enemy
//! ship and shield, player ship and shield, then the lasers. Everything is
//! flat-colored quads in world coordinates; the pipeline maps them to NDC.

use super::vertex::{Vertex, colors};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::settings::Settings;
use crate::sim::state::BACKDROP_LAYERS;
use crate::sim::{GameState, Rect, Ship, ShipKind};

/// Shield indicator sits this fraction of hull height below the ship
const SHIELD_OFFSET_FRAC: f32 = 0.2;

/// Push a filled rectangle as two triangles
pub fn push_quad(out: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y1, color));
    out.push(Vertex::new(x0, y1, color));
}

/// One parallax starfield layer, drawn twice (at `-offset` and at
/// `-offset + WORLD_HEIGHT`) for a seamless vertical wrap.
///
/// Star positions are a deterministic hash of (layer, index), so the field
/// is stable across frames without any stored state.
fn push_starfield_layer(out: &mut Vec<Vertex>, layer: usize, offset: f32, star_count: u32) {
    let color = colors::STAR_LAYERS[layer];
    // Nearer layers scroll faster and carry slightly larger stars
    let size = 0.25 + layer as f32 * 0.15;

    for i in 0..star_count {
        let hash = (layer as u32)
            .wrapping_mul(7919)
            .wrapping_add(i)
            .wrapping_mul(2654435761);
        let x = (hash % 1000) as f32 / 1000.0 * WORLD_WIDTH;
        let y = ((hash >> 10) % 1000) as f32 / 1000.0 * WORLD_HEIGHT;

        for copy_shift in [0.0, WORLD_HEIGHT] {
            let star = Rect::new(x, y - offset + copy_shift, size, size);
            push_quad(out, &star, color);
        }
    }
}

/// Hull plus nose triangle, pointed along the ship's firing direction
fn push_ship(out: &mut Vec<Vertex>, ship: &Ship) {
    let (hull, nose_dir) = match ship.kind {
        ShipKind::Player => (colors::PLAYER_HULL, 1.0),
        ShipKind::Enemy => (colors::ENEMY_HULL, -1.0),
    };

    let b = ship.bounds;
    // Body covers the lower (or upper) two thirds of the box
    let body_h = b.height * 2.0 / 3.0;
    let body_y = if nose_dir > 0.0 { b.y } else { b.y + b.height - body_h };
    push_quad(out, &Rect::new(b.x, body_y, b.width, body_h), hull);

    // Nose triangle on the remaining third
    let tip_y = if nose_dir > 0.0 { b.y + b.height } else { b.y };
    let base_y = if nose_dir > 0.0 { b.y + body_h } else { b.y + b.height - body_h };
    out.push(Vertex::new(b.x, base_y, hull));
    out.push(Vertex::new(b.x + b.width, base_y, hull));
    out.push(Vertex::new(b.x + b.width / 2.0, tip_y, hull));
}

/// Translucent shield wash, offset below the hull, only while charged
fn push_shield(out: &mut Vec<Vertex>, ship: &Ship) {
    if ship.shield == 0 {
        return;
    }
    let color = match ship.kind {
        ShipKind::Player => colors::PLAYER_SHIELD,
        ShipKind::Enemy => colors::ENEMY_SHIELD,
    };
    let b = ship.bounds;
    let shield = b.translated(0.0, -b.height * SHIELD_OFFSET_FRAC);
    push_quad(out, &shield, color);
}

/// Tessellate the whole frame in draw order
pub fn scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2048);

    if settings.starfield {
        let star_count = settings.quality.stars_per_layer();
        for layer in 0..BACKDROP_LAYERS {
            push_starfield_layer(&mut out, layer, state.backdrop.offsets[layer], star_count);
        }
    }

    push_ship(&mut out, &state.enemy);
    push_shield(&mut out, &state.enemy);

    push_ship(&mut out, &state.player);
    push_shield(&mut out, &state.player);

    for laser in &state.player_lasers {
        push_quad(&mut out, &laser.bounds, colors::PLAYER_LASER);
    }
    for laser in &state.enemy_lasers {
        push_quad(&mut out, &laser.bounds, colors::ENEMY_LASER);
    }

    out
}
