//! Paint context - the line-drawing surface effects render into

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Color and width of a stroked line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D surface supporting clear and line strokes
///
/// Hosts implement this over their real rendering backend. Effects call
/// [`Canvas::detach`] once when they are torn down.
pub trait Canvas {
    /// Erase everything drawn so far
    fn clear(&mut self);

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Match the backing store to the host element's size
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Remove the surface from the host element
    fn detach(&mut self) {}
}

impl<C: Canvas> Canvas for Rc<RefCell<C>> {
    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.borrow_mut().stroke_line(from, to, style);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.borrow_mut().resize(width, height);
    }

    fn detach(&mut self) {
        self.borrow_mut().detach();
    }
}

/// A paint command recorded by [`PaintContext`]
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Clear { rect: Rect },
    StrokeLine {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
}

/// Recording canvas
///
/// Clearing discards previously recorded strokes, so [`commands`] always holds
/// exactly the current frame.
///
/// [`commands`]: PaintContext::commands
#[derive(Clone, Debug)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    bounds: Rect,
    attached: bool,
}

impl PaintContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            commands: Vec::new(),
            bounds: Rect::from_size(width, height),
            attached: true,
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Line segments in the current frame
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            PaintCommand::StrokeLine { from, to, .. } => Some((*from, *to)),
            PaintCommand::Clear { .. } => None,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Canvas for PaintContext {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(PaintCommand::Clear { rect: self.bounds });
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.commands.push(PaintCommand::StrokeLine {
            from,
            to,
            style: *style,
        });
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Rect::from_size(width, height);
    }

    fn detach(&mut self) {
        if self.attached {
            tracing::debug!("paint context detached");
        }
        self.attached = false;
        self.commands.clear();
    }
}
