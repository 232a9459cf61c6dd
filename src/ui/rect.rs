//! Rectangle type for screen layout and hit-testing

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Point relative to the top-left corner
    pub fn local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Split horizontally at fixed pixel position from left
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Split vertically at fixed pixel position from top
    pub fn split_v_px(&self, pixels: f32) -> (Self, Self) {
        let split_y = pixels.clamp(0.0, self.h);
        (
            Self::new(self.x, self.y, self.w, split_y),
            Self::new(self.x, self.y + split_y, self.w, self.h - split_y),
        )
    }

    /// Largest square that fits, anchored top-left
    pub fn square(&self) -> Self {
        let side = self.w.min(self.h);
        Self::new(self.x, self.y, side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_px() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (left, right) = r.split_h_px(30.0);
        assert!((left.w - 30.0).abs() < 0.001);
        assert!((right.x - 30.0).abs() < 0.001);
        let (top, bottom) = r.split_v_px(80.0);
        assert_eq!(top.h, 50.0);
        assert_eq!(bottom.h, 0.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(110.0, 40.0));
        assert!(!r.contains(50.0, 70.0));
        assert_eq!(r.local(15.0, 25.0), (5.0, 5.0));
    }
}
