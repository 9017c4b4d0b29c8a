/// A pointer position in overlay-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayPoint {
    pub x: i32,
    pub y: i32,
}

impl OverlayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds a logical canvas position to the nearest pixel.
    pub fn from_logical(x: f32, y: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

/// Origin of the primary display in global screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenOffset {
    pub dx: i32,
    pub dy: i32,
}

impl ScreenOffset {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Geometry of the display the overlay is shown on. `width` and `height`
/// are in logical units, the same space as overlay pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub origin: ScreenOffset,
    pub width: u32,
    pub height: u32,
    pub scale_factor: f32,
}

/// Rectangle spanned by two corners. Only the normalized form is handed to
/// capture or rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRectangle {
    pub start: OverlayPoint,
    pub end: OverlayPoint,
}

impl SelectionRectangle {
    pub fn between(start: OverlayPoint, end: OverlayPoint) -> Self {
        Self { start, end }
    }

    pub fn normalized(&self) -> Self {
        Self {
            start: OverlayPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            end: OverlayPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        }
    }

    pub fn left(&self) -> i32 {
        self.start.x.min(self.end.x)
    }

    pub fn top(&self) -> i32 {
        self.start.y.min(self.end.y)
    }

    pub fn right(&self) -> i32 {
        self.start.x.max(self.end.x)
    }

    pub fn bottom(&self) -> i32 {
        self.start.y.max(self.end.y)
    }

    pub fn width(&self) -> u32 {
        self.right().abs_diff(self.left())
    }

    pub fn height(&self) -> u32 {
        self.bottom().abs_diff(self.top())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn translated(&self, offset: ScreenOffset) -> Self {
        Self {
            start: OverlayPoint::new(self.start.x + offset.dx, self.start.y + offset.dy),
            end: OverlayPoint::new(self.end.x + offset.dx, self.end.y + offset.dy),
        }
    }

    /// Normalizes, then moves both corners from overlay-local to global
    /// screen coordinates.
    pub fn to_global(&self, offset: ScreenOffset) -> Self {
        self.normalized().translated(offset)
    }
}
