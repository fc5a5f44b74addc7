//! Immediate-mode 2D drawing interface.
//!
//! The browser binding implements [`Canvas2d`] on top of a
//! `CanvasRenderingContext2d`; [`Recording`] is a headless implementation that
//! keeps every command, used for frame inspection and tests.

use crate::palette::Rgb;
use glam::Vec2;

/// Size of the display area in whole pixels, as a canvas element uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Line style for [`Canvas2d::stroke_line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub alpha: f32,
    pub width: f32,
}

pub trait Canvas2d {
    /// Clear the region `(0, 0)..size` to transparent.
    fn clear(&mut self, size: Viewport);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    Circle { center: Vec2, radius: f32, color: Rgb },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
}

/// Canvas that records commands instead of rasterising them.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub size: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl Recording {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands issued since the most recent clear, i.e. the visible frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Canvas2d for Recording {
    fn clear(&mut self, size: Viewport) {
        self.commands.push(DrawCommand::Clear(size));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(Viewport::new(100_000, 100_000).area(), 10_000_000_000);
    }

    #[test]
    fn last_frame_starts_after_clear() {
        let mut rec = Recording::new(Viewport::new(10, 10));
        rec.fill_circle(Vec2::ZERO, 1.0, Rgb::new(0, 0, 0));
        rec.clear(rec.size);
        rec.fill_circle(Vec2::ONE, 2.0, Rgb::new(1, 1, 1));
        assert_eq!(rec.commands.len(), 3);
        assert_eq!(rec.last_frame().len(), 1);
        assert_eq!(rec.circles().count(), 1);
        assert_eq!(rec.lines().count(), 0);
    }
}
