//! Screen geometry: points, areas and grid layouts.

/// A position on the display, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Spacing removed from each side of a [`Rect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn sides(value: i32) -> Self {
        Self::new(0, value, 0, value)
    }
}

/// An axis-aligned area of the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
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

    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub const fn contains(&self, point: Point) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    pub fn inset(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0),
            (self.height - insets.top - insets.bottom).max(0),
        )
    }

    pub fn split_top(&self, height: i32) -> (Rect, Rect) {
        let height = height.clamp(0, self.height);
        (
            Rect::new(self.x, self.y, self.width, height),
            Rect::new(self.x, self.y + height, self.width, self.height - height),
        )
    }

    pub fn split_bottom(&self, height: i32) -> (Rect, Rect) {
        let height = height.clamp(0, self.height);
        self.split_top(self.height - height)
    }

    pub fn split_left(&self, width: i32) -> (Rect, Rect) {
        let width = width.clamp(0, self.width);
        (
            Rect::new(self.x, self.y, width, self.height),
            Rect::new(self.x + width, self.y, self.width - width, self.height),
        )
    }

    pub fn split_right(&self, width: i32) -> (Rect, Rect) {
        let width = width.clamp(0, self.width);
        self.split_left(self.width - width)
    }
}

/// A table of equally sized cells, numbered row by row starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub area: Rect,
    pub columns: i32,
    pub rows: i32,
    pub spacing: i32,
}

impl Grid {
    pub const fn new(area: Rect, columns: i32, rows: i32) -> Self {
        Self {
            area,
            columns,
            rows,
            spacing: 0,
        }
    }

    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Area of the `index`-th cell.
    pub fn cell(&self, index: usize) -> Rect {
        self.cells(index, 1, 1)
    }

    /// Area of the `index`-th cell merged with its neighbours to the right and below.
    pub fn cells(&self, index: usize, span_x: i32, span_y: i32) -> Rect {
        let columns = self.columns.max(1);
        let rows = self.rows.max(1);
        let w = self.area.width / columns;
        let h = self.area.height / rows;
        let index = index as i32;
        let x = (index % columns) * w;
        let y = (index / columns) * h;
        Rect::new(
            self.area.x + x,
            self.area.y + y,
            (w - self.spacing) * span_x,
            (h - self.spacing) * span_y,
        )
    }

    /// Index of the cell containing `point`, if any.
    pub fn cell_at(&self, point: Point, cell_count: usize) -> Option<usize> {
        (0..cell_count).find(|&index| self.cell(index).contains(point))
    }
}
