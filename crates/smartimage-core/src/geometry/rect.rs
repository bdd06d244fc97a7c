/// A pixel-aligned region of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width x height` raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip to a `width x height` raster anchored at the origin.
    pub fn clip_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_inside_is_noop() {
        let r = Rect::new(10, 10, 20, 20);
        assert_eq!(r.clip_to(100, 100), r);
    }

    #[test]
    fn test_clip_overhang() {
        let r = Rect::new(90, 95, 20, 20).clip_to(100, 100);
        assert_eq!(r, Rect::new(90, 95, 10, 5));
    }

    #[test]
    fn test_clip_outside_is_empty() {
        let r = Rect::new(150, 0, 20, 20).clip_to(100, 100);
        assert!(r.is_empty());
    }
}
