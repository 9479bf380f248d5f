//! Recorded draw commands
//!
//! `DrawRecorder` keeps every primitive it is asked to draw, which makes the
//! erase/draw discipline of the state machines observable in tests and lets
//! the runner report how much drawing a run performed.

use glam::Vec2;

use super::{BACKGROUND, Canvas, Color};

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillScreen(Color),
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Triangle { a: Vec2, b: Vec2, c: Vec2, color: Color },
    Rect { origin: Vec2, size: Vec2, color: Color },
    Cursor(Vec2),
    TextColor(Color),
    TextSize(u8),
    Text(String),
    Int(i64),
}

impl DrawCommand {
    /// Color the primitive is drawn in, if it paints pixels
    pub fn color(&self) -> Option<Color> {
        match self {
            DrawCommand::FillScreen(color)
            | DrawCommand::Line { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Triangle { color, .. }
            | DrawCommand::Rect { color, .. } => Some(*color),
            _ => None,
        }
    }

    /// True if this primitive paints in the background color
    pub fn is_erase(&self) -> bool {
        self.color() == Some(BACKGROUND)
    }
}

/// Canvas that records everything drawn on it
#[derive(Debug, Default, Clone)]
pub struct DrawRecorder {
    pub commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Lines drawn in a non-background color
    pub fn lines_drawn(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }) && !c.is_erase())
    }

    /// Circles drawn in a non-background color
    pub fn circles_drawn(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }) && !c.is_erase())
    }

    /// Concatenated text output (labels and integers)
    pub fn text(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            match command {
                DrawCommand::Text(s) => out.push_str(s),
                DrawCommand::Int(v) => out.push_str(&v.to_string()),
                _ => {}
            }
        }
        out
    }
}

impl Canvas for DrawRecorder {
    fn fill_screen(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillScreen(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::Triangle { a, b, c, color });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }

    fn set_cursor(&mut self, pos: Vec2) {
        self.commands.push(DrawCommand::Cursor(pos));
    }

    fn set_text_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::TextColor(color));
    }

    fn set_text_size(&mut self, size: u8) {
        self.commands.push(DrawCommand::TextSize(size));
    }

    fn print(&mut self, text: &str) {
        self.commands.push(DrawCommand::Text(text.to_string()));
    }

    fn print_int(&mut self, value: i64) {
        self.commands.push(DrawCommand::Int(value));
    }
}
