/// Axis along which records are laid out, and therefore the pointer axis used
/// to pick the before/after half of a hovered record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An on-screen rectangle in the same coordinate space as pointer events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// `(origin, extent)` of this rectangle along `direction`.
    pub fn span(&self, direction: Direction) -> (f32, f32) {
        match direction {
            Direction::Vertical => (self.origin.y, self.height),
            Direction::Horizontal => (self.origin.x, self.width),
        }
    }

    /// A rectangle is measurable when both extents are finite and positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.
            || self.height <= 0.
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.width
            && point.y < self.origin.y + self.height
    }

    /// Offset of `point` relative to the rectangle's origin.
    pub fn offset_of(&self, point: Point) -> Point {
        Point::new(point.x - self.origin.x, point.y - self.origin.y)
    }
}
