//! Rect and Axis - geometry along the strip's axis of movement

/// Axis-aligned bounding box in client pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    /// Same box shifted by an offset
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }
}

/// The single axis a strip moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Leading edge coordinate (left or top)
    pub fn start(&self, rect: &Rect) -> f64 {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }

    /// Trailing edge coordinate (right or bottom)
    pub fn end(&self, rect: &Rect) -> f64 {
        self.start(rect) + self.extent(rect)
    }

    pub fn extent(&self, rect: &Rect) -> f64 {
        match self {
            Self::Horizontal => rect.w,
            Self::Vertical => rect.h,
        }
    }

    pub fn center(&self, rect: &Rect) -> f64 {
        self.start(rect) + self.extent(rect) / 2.0
    }

    /// Pick the component of a point that lies on this axis
    pub fn pick(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }

    /// CSS margin property holding the leading offset
    pub fn leading_margin(&self) -> &'static str {
        match self {
            Self::Horizontal => "margin-left",
            Self::Vertical => "margin-top",
        }
    }

    /// CSS margin property holding the separator gap
    pub fn trailing_margin(&self) -> &'static str {
        match self {
            Self::Horizontal => "margin-right",
            Self::Vertical => "margin-bottom",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "x" | "row" => Some(Self::Horizontal),
            "vertical" | "y" | "column" => Some(Self::Vertical),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_and_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), (60.0, 40.0));
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(110.0, 60.0));
        assert!(!r.contains(111.0, 30.0));
    }

    #[test]
    fn axis_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(Axis::Horizontal.start(&r), 10.0);
        assert_eq!(Axis::Horizontal.end(&r), 110.0);
        assert_eq!(Axis::Vertical.start(&r), 20.0);
        assert_eq!(Axis::Vertical.end(&r), 60.0);
        assert_eq!(Axis::Vertical.center(&r), 40.0);
    }

    #[test]
    fn axis_parse() {
        assert_eq!(Axis::parse("Vertical"), Some(Axis::Vertical));
        assert_eq!(Axis::parse(" x "), Some(Axis::Horizontal));
        assert_eq!(Axis::parse("diagonal"), None);
    }

    #[test]
    fn axis_margins() {
        assert_eq!(Axis::Horizontal.leading_margin(), "margin-left");
        assert_eq!(Axis::Vertical.trailing_margin(), "margin-bottom");
    }
}
