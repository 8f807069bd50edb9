//! Geometry reported by the host renderer.
//!
//! Widgets never lay themselves out. After drawing, the host hands each
//! widget the rectangles it occupied so the outside-pointer watcher can tell
//! "inside" from "outside".

/// A cell position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Where a dropdown was drawn on the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownLayout {
    /// Label, trigger and (for the search variant) query field.
    pub wrapper: Rect,
    /// Option panel, present only while open.
    pub panel: Option<Rect>,
    /// One rect per rendered option row, in row order.
    pub rows: Vec<Rect>,
}

impl DropdownLayout {
    pub fn new(wrapper: Rect) -> Self {
        Self {
            wrapper,
            panel: None,
            rows: Vec::new(),
        }
    }

    pub fn with_panel(mut self, panel: Rect, rows: Vec<Rect>) -> Self {
        self.panel = Some(panel);
        self.rows = rows;
        self
    }

    /// Whether a point falls on any part of the widget, panel included.
    pub fn contains(&self, point: Point) -> bool {
        self.wrapper.contains(point) || self.panel.is_some_and(|panel| panel.contains(point))
    }

    /// Index of the option row under a point.
    pub fn row_at(&self, point: Point) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(point))
    }
}
