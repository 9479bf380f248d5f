//! Rendering capability
//!
//! The simulation never owns a framebuffer. It paints through a `Canvas`,
//! and "erasing" is drawing the same primitive again in the background color.

pub mod command;
pub mod shapes;

pub use command::{DrawCommand, DrawRecorder};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 16-bit RGB565 color, the native format of the target LCD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);

    /// Pack 8-bit channels into RGB565
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 >> 3) << 11;
        let g = (g as u16 >> 2) << 5;
        let b = b as u16 >> 3;
        Color(r | g | b)
    }
}

/// Background color; drawing in it erases
pub const BACKGROUND: Color = Color::BLACK;

/// Drawing primitives the simulation needs. Implementations are
/// synchronous and must not fail.
pub trait Canvas {
    fn fill_screen(&mut self, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn set_cursor(&mut self, pos: Vec2);
    fn set_text_color(&mut self, color: Color);
    fn set_text_size(&mut self, size: u8);
    fn print(&mut self, text: &str);
    fn print_int(&mut self, value: i64);
}

/// Canvas that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn fill_screen(&mut self, _color: Color) {}
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn fill_triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _color: Color) {}
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {}
    fn set_cursor(&mut self, _pos: Vec2) {}
    fn set_text_color(&mut self, _color: Color) {}
    fn set_text_size(&mut self, _size: u8) {}
    fn print(&mut self, _text: &str) {}
    fn print_int(&mut self, _value: i64) {}
}
