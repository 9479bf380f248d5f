//! Sprite and overlay drawing for 2D primitives

use glam::Vec2;

use super::{BACKGROUND, Canvas, Color};

/// Plane hull: a flat triangle extending right from the plane position
const PLANE_LENGTH: f32 = 20.0;
const PLANE_HEIGHT: f32 = 3.0;
/// Dome above the hull center
const DOME_OFFSET: f32 = 3.0;
const DOME_RADIUS: f32 = 2.0;

/// Powerup marker half-width and point heights
const STAR_HALF_WIDTH: f32 = 5.0;
const STAR_BASE: f32 = 3.0;
const STAR_TIP: f32 = 6.0;

/// Score overlay layout
const STATS_SHOTS_POS: Vec2 = Vec2::new(20.0, 0.0);
const STATS_IMPACTS_POS: Vec2 = Vec2::new(160.0, 0.0);
const STATS_TEXT_SIZE: u8 = 1;
pub const SHOT_TEXT: &str = "Shot: ";
pub const IMPACTED_TEXT: &str = "Impacted: ";

/// Draw the plane sprite at `pos`, or erase it
pub fn plane(canvas: &mut dyn Canvas, pos: Vec2, erase: bool) {
    let apex = Vec2::new(pos.x + PLANE_LENGTH / 2.0, pos.y - PLANE_HEIGHT);
    let tail = Vec2::new(pos.x + PLANE_LENGTH, pos.y);
    let dome = Vec2::new(pos.x + PLANE_LENGTH / 2.0, pos.y - DOME_OFFSET);
    if erase {
        canvas.fill_circle(dome, DOME_RADIUS, BACKGROUND);
        canvas.fill_triangle(pos, tail, apex, BACKGROUND);
    } else {
        canvas.fill_triangle(pos, tail, apex, Color::WHITE);
        canvas.fill_circle(dome, DOME_RADIUS, Color::GREEN);
    }
}

/// Draw the powerup marker (two overlapping triangles) centered on `pos`
pub fn powerup(canvas: &mut dyn Canvas, pos: Vec2, colors: (Color, Color)) {
    let (up, down) = colors;
    canvas.fill_triangle(
        Vec2::new(pos.x - STAR_HALF_WIDTH, pos.y + STAR_BASE),
        Vec2::new(pos.x + STAR_HALF_WIDTH, pos.y + STAR_BASE),
        Vec2::new(pos.x, pos.y - STAR_TIP),
        up,
    );
    canvas.fill_triangle(
        Vec2::new(pos.x - STAR_HALF_WIDTH, pos.y - STAR_BASE),
        Vec2::new(pos.x + STAR_HALF_WIDTH, pos.y - STAR_BASE),
        Vec2::new(pos.x, pos.y + STAR_TIP),
        down,
    );
}

/// Erase the powerup marker centered on `pos`
pub fn erase_powerup(canvas: &mut dyn Canvas, pos: Vec2) {
    powerup(canvas, pos, (BACKGROUND, BACKGROUND));
}

/// Draw the shot/impact counters along the top edge
pub fn stats(canvas: &mut dyn Canvas, shots: u32, impacts: u32, color: Color) {
    canvas.set_cursor(STATS_SHOTS_POS);
    canvas.set_text_color(color);
    canvas.set_text_size(STATS_TEXT_SIZE);
    canvas.print(SHOT_TEXT);
    canvas.print_int(shots as i64);

    canvas.set_cursor(STATS_IMPACTS_POS);
    canvas.print(IMPACTED_TEXT);
    canvas.print_int(impacts as i64);
}
