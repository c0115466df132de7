//! Retained-mode draw list
//!
//! Simulation and scenes never touch a graphics API. Each `render` call
//! appends primitives here and a presentation backend rasterizes them.

use glam::Vec2;

use crate::Color;

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    /// Circle outline
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// Axis-aligned rectangle; `width == 0` fills it
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Filled polygon
    Polygon { points: Vec<Vec2>, color: Color },
    /// Text anchored at its centre
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Ordered list of primitives for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    /// Translation applied to world-space primitives (camera)
    offset: Vec2,
    /// Uniform scale around the screen centre (zoom)
    scale: f32,
    pivot: Vec2,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            cmds: Vec::new(),
            offset: Vec2::ZERO,
            scale: 1.0,
            pivot: Vec2::ZERO,
        }
    }

    /// Set the camera transform for subsequent world-space primitives
    pub fn set_camera(&mut self, offset: Vec2, scale: f32, pivot: Vec2) {
        self.offset = offset;
        self.scale = scale;
        self.pivot = pivot;
    }

    /// Back to screen space (HUD, dialogs)
    pub fn reset_camera(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
        self.pivot = Vec2::ZERO;
    }

    #[inline]
    fn tx(&self, p: Vec2) -> Vec2 {
        self.pivot + (p + self.offset - self.pivot) * self.scale
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.cmds.push(DrawCmd::Circle {
            center: self.tx(center),
            radius: radius * self.scale,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        });
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.cmds.push(DrawCmd::Ring {
            center: self.tx(center),
            radius: radius * self.scale,
            width,
            color,
        });
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color, width: f32) {
        self.cmds.push(DrawCmd::Rect {
            min: self.tx(min),
            size: size * self.scale,
            color,
            alpha: 1.0,
            width,
        });
    }

    /// Translucent filled rectangle (overlays)
    pub fn shade(&mut self, min: Vec2, size: Vec2, color: Color, alpha: f32) {
        self.cmds.push(DrawCmd::Rect {
            min: self.tx(min),
            size: size * self.scale,
            color,
            alpha: alpha.clamp(0.0, 1.0),
            width: 0.0,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.cmds.push(DrawCmd::Line {
            from: self.tx(from),
            to: self.tx(to),
            width,
            color,
        });
    }

    pub fn polygon(&mut self, points: &[Vec2], color: Color) {
        let points = points.iter().map(|&p| self.tx(p)).collect();
        self.cmds.push(DrawCmd::Polygon { points, color });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            pos: self.tx(pos),
            text: text.into(),
            size,
            color,
        });
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Drop all primitives, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.reset_camera();
    }

    /// All text strings in draw order (handy for HUD assertions)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::WHITE;

    #[test]
    fn test_camera_transform() {
        let mut list = DrawList::new();
        list.set_camera(Vec2::new(10.0, 0.0), 2.0, Vec2::ZERO);
        list.circle(Vec2::new(5.0, 5.0), 3.0, WHITE, 1.0);
        match &list.cmds()[0] {
            DrawCmd::Circle { center, radius, .. } => {
                assert_eq!(*center, Vec2::new(30.0, 10.0));
                assert_eq!(*radius, 6.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_clear_resets_camera() {
        let mut list = DrawList::new();
        list.set_camera(Vec2::new(10.0, 10.0), 1.5, Vec2::ZERO);
        list.text(Vec2::ZERO, "hi", 20.0, WHITE);
        list.clear();
        assert!(list.is_empty());
        list.circle(Vec2::ONE, 1.0, WHITE, 2.0);
        assert_eq!(
            list.cmds()[0],
            DrawCmd::Circle {
                center: Vec2::ONE,
                radius: 1.0,
                color: WHITE,
                alpha: 1.0
            }
        );
    }
}
