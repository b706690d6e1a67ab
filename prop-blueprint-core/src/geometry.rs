//! Vector primitives, styles and bounding boxes.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DETAIL_STROKE_WIDTH, GUIDE_DASH, GUIDE_STROKE, GUIDE_STROKE_WIDTH, LABEL_FILL,
    LABEL_FONT_FAMILY, LABEL_FONT_SIZE, MAIN_STROKE, MAIN_STROKE_WIDTH,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Scale this point by `s` about `c`.
    pub fn scale_about(self, c: Point, s: f64) -> Point {
        Point {
            x: c.x + (self.x - c.x) * s,
            y: c.y + (self.y - c.y) * s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    pub dash: Option<Vec<f64>>,
}

impl StrokeStyle {
    /// Solid dark stroke used for the prop silhouette.
    pub fn main() -> Self {
        StrokeStyle {
            color: MAIN_STROKE.to_string(),
            width: MAIN_STROKE_WIDTH,
            dash: None,
        }
    }

    /// Same color as [`StrokeStyle::main`], thinner.
    pub fn detail() -> Self {
        StrokeStyle {
            width: DETAIL_STROKE_WIDTH,
            ..Self::main()
        }
    }

    /// Light dashed stroke for dimension guides.
    pub fn guide() -> Self {
        StrokeStyle {
            color: GUIDE_STROKE.to_string(),
            width: GUIDE_STROKE_WIDTH,
            dash: Some(GUIDE_DASH.to_vec()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle { origin: Point, size: Size },
    Polyline { points: Vec<Point>, closed: bool },
    LineSegment { from: Point, to: Point },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    pub stroke: StrokeStyle,
    pub fill: Option<String>,
}

impl Primitive {
    pub fn rect(origin: Point, width: f64, height: f64, stroke: StrokeStyle) -> Self {
        Primitive {
            shape: Shape::Rectangle {
                origin,
                size: Size { width, height },
            },
            stroke,
            fill: None,
        }
    }

    pub fn polyline(points: Vec<Point>, closed: bool, stroke: StrokeStyle) -> Self {
        Primitive {
            shape: Shape::Polyline { points, closed },
            stroke,
            fill: None,
        }
    }

    pub fn line(from: Point, to: Point, stroke: StrokeStyle) -> Self {
        Primitive {
            shape: Shape::LineSegment { from, to },
            stroke,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = Some(fill.to_string());
        self
    }

    /// Corner points spanned by this primitive (rectangles yield all four).
    pub fn points(&self) -> Vec<Point> {
        match &self.shape {
            Shape::Rectangle { origin, size } => {
                let far = Point::new(origin.x + size.width, origin.y + size.height);
                vec![
                    *origin,
                    Point::new(far.x, origin.y),
                    far,
                    Point::new(origin.x, far.y),
                ]
            }
            Shape::Polyline { points, .. } => points.clone(),
            Shape::LineSegment { from, to } => vec![*from, *to],
        }
    }

    pub fn scale_about(&mut self, c: Point, s: f64) {
        match &mut self.shape {
            Shape::Rectangle { origin, size } => {
                *origin = origin.scale_about(c, s);
                size.width *= s;
                size.height *= s;
            }
            Shape::Polyline { points, .. } => {
                for p in points.iter_mut() {
                    *p = p.scale_about(c, s);
                }
            }
            Shape::LineSegment { from, to } => {
                *from = from.scale_about(c, s);
                *to = to.scale_about(c, s);
            }
        }
    }
}

/// Ordered collection of primitives making up one drawing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveGroup {
    pub items: Vec<Primitive>,
}

impl PrimitiveGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Primitive) {
        self.items.push(p);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Axis-aligned bounds over every primitive, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(self.items.iter().flat_map(|p| p.points()))
    }

    pub fn scale_about(&mut self, c: Point, s: f64) {
        for p in &mut self.items {
            p.scale_about(c, s);
        }
    }
}

/// Axis-aligned bounding box. Always derived, never stored on a group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn of_points<I: IntoIterator<Item = Point>>(pts: I) -> Option<Bounds> {
        let mut out: Option<Bounds> = None;
        for p in pts {
            out = Some(match out {
                None => Bounds {
                    left: p.x,
                    top: p.y,
                    right: p.x,
                    bottom: p.y,
                },
                Some(b) => Bounds {
                    left: b.left.min(p.x),
                    top: b.top.min(p.y),
                    right: b.right.max(p.x),
                    bottom: b.bottom.max(p.y),
                },
            });
        }
        out
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub color: String,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle {
            color: LABEL_FILL.to_string(),
            font_size: LABEL_FONT_SIZE,
            font_family: LABEL_FONT_FAMILY.to_string(),
        }
    }
}

/// A text item placed at `anchor`, rotated clockwise about it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub anchor: Point,
    pub text: String,
    pub rotation_deg: f64,
    pub align: TextAlign,
    pub style: LabelStyle,
}

impl Label {
    pub fn scale_about(&mut self, c: Point, s: f64) {
        self.anchor = self.anchor.scale_about(c, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_presets_follow_constants() {
        let guide = StrokeStyle::guide();
        assert_eq!(guide.width, GUIDE_STROKE_WIDTH);
        assert_eq!(guide.dash.as_deref(), Some(&GUIDE_DASH[..]));
        assert_eq!(StrokeStyle::main().width, MAIN_STROKE_WIDTH);
        assert_eq!(StrokeStyle::detail().width, DETAIL_STROKE_WIDTH);
        assert_eq!(StrokeStyle::detail().color, MAIN_STROKE);
    }

    #[test]
    fn bounds_cover_every_primitive_kind() {
        let mut g = PrimitiveGroup::new();
        g.push(Primitive::rect(Point::new(10.0, 20.0), 30.0, 40.0, StrokeStyle::main()));
        g.push(Primitive::line(
            Point::new(-5.0, 25.0),
            Point::new(0.0, 0.0),
            StrokeStyle::detail(),
        ));
        g.push(Primitive::polyline(
            vec![Point::new(15.0, 70.0), Point::new(50.0, 30.0)],
            false,
            StrokeStyle::main(),
        ));
        let b = g.bounds().unwrap();
        assert_eq!(b.left, -5.0);
        assert_eq!(b.top, 0.0);
        assert_eq!(b.right, 50.0);
        assert_eq!(b.bottom, 70.0);
        assert_eq!(b.width(), 55.0);
        assert_eq!(b.height(), 70.0);
    }

    #[test]
    fn negative_rectangle_sizes_still_bound_correctly() {
        let mut g = PrimitiveGroup::new();
        g.push(Primitive::rect(Point::new(0.0, 0.0), -10.0, 5.0, StrokeStyle::main()));
        let b = g.bounds().unwrap();
        assert_eq!((b.left, b.right), (-10.0, 0.0));
    }

    #[test]
    fn empty_group_has_no_bounds() {
        assert!(PrimitiveGroup::new().bounds().is_none());
    }

    #[test]
    fn scaling_about_center_keeps_center_fixed() {
        let c = Point::new(100.0, 100.0);
        let mut g = PrimitiveGroup::new();
        g.push(Primitive::rect(Point::new(90.0, 80.0), 20.0, 40.0, StrokeStyle::main()));
        g.scale_about(c, 2.0);
        let b = g.bounds().unwrap();
        assert_eq!(b.center(), c);
        assert_eq!(b.width(), 40.0);
        assert_eq!(b.height(), 80.0);
    }
}
