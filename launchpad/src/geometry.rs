use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in client (or screen) pixel coordinates.
/// `right` and `bottom` are exclusive, matching native window rectangles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build a rectangle from an origin and a size
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Same size, translated by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Same origin, new size
    pub fn with_size(&self, width: i32, height: i32) -> Self {
        Self::from_size(self.left, self.top, width, height)
    }

    /// Same size, new origin
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self::from_size(x, y, self.width(), self.height())
    }

    /// Pull a saved window rectangle back onto the desktop.
    ///
    /// The size is kept; only the origin moves. Returns `None` for a rectangle
    /// that was never stored (zero or negative width).
    pub fn clamp_into(&self, desktop: &Rect) -> Option<Self> {
        if self.right <= self.left {
            return None;
        }

        let (w, h) = (self.width(), self.height());
        let x = self.left.max(desktop.left).min(desktop.right - w);
        let y = self.top.max(desktop.top).min(desktop.bottom - h);
        Some(Self::from_size(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_helpers() {
        let r = Rect::from_size(10, 20, 100, 50);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
        assert_eq!(r.offset(5, -5), Rect::new(15, 15, 115, 65));
        assert_eq!(r.with_size(30, 40), Rect::new(10, 20, 40, 60));
        assert_eq!(r.moved_to(0, 0), Rect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_clamp_into_desktop() {
        let desktop = Rect::new(0, 0, 1920, 1080);

        // Hanging off the bottom-right corner
        let saved = Rect::from_size(1800, 1000, 600, 400);
        assert_eq!(saved.clamp_into(&desktop), Some(Rect::from_size(1320, 680, 600, 400)));

        // Negative origin
        let saved = Rect::from_size(-50, -10, 600, 400);
        assert_eq!(saved.clamp_into(&desktop), Some(Rect::from_size(0, 0, 600, 400)));

        // Already on screen
        let saved = Rect::from_size(100, 100, 600, 400);
        assert_eq!(saved.clamp_into(&desktop), Some(saved));
    }

    #[test]
    fn test_clamp_ignores_unset_rect() {
        let desktop = Rect::new(0, 0, 1920, 1080);
        assert_eq!(Rect::default().clamp_into(&desktop), None);
    }
}
