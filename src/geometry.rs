use serde::{Deserialize, Serialize};

/// Top-left coordinate of a block on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer extent measured in pixels. Also used for canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Coordinates are signed so that directed overlap depths and candidate
/// positions left of / above the canvas can be represented before they are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_position(self, position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    pub fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..self
        }
    }

    /// True when the horizontal spans share at least one pixel.
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// True when the vertical spans share at least one pixel.
    pub fn spans_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }
}
