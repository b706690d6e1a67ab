//! Per-template geometry. Canvas coordinates: +x right, +y down.

use crate::constants::{FILL_OFF_WHITE, FILL_WHITE, TIER_SHRINK_MM};
use crate::geometry::{Point, Primitive, PrimitiveGroup, StrokeStyle};

/// Stacked tier rectangles. Tier `i` is `TIER_SHRINK_MM * i` narrower and
/// shifted right by half that, the stack is centered vertically on `c`.
pub fn stepped_tiers(c: Point, width: f64, height: f64, tiers: u32) -> PrimitiveGroup {
    let mut g = PrimitiveGroup::new();
    let stack_h = tiers as f64 * height;
    for i in 0..tiers {
        let fi = i as f64;
        let origin = Point::new(
            c.x - width / 2.0 + fi * TIER_SHRINK_MM / 2.0,
            c.y + fi * height - stack_h / 2.0,
        );
        let fill = if i % 2 == 0 { FILL_WHITE } else { FILL_OFF_WHITE };
        g.push(
            Primitive::rect(origin, width - fi * TIER_SHRINK_MM, height, StrokeStyle::main())
                .with_fill(fill),
        );
    }
    g
}

/// Side profile of a wedge stand. `angle` lowers the right edge of the top
/// by that many millimeters; it is not a trigonometric angle.
pub fn sloped_stand(c: Point, base: f64, height: f64, angle: f64) -> PrimitiveGroup {
    let (hw, hh) = (base / 2.0, height / 2.0);
    let pts = vec![
        Point::new(c.x - hw, c.y + hh),
        Point::new(c.x + hw, c.y + hh),
        Point::new(c.x + hw, c.y - hh + angle),
        Point::new(c.x - hw, c.y - hh),
    ];
    let mut g = PrimitiveGroup::new();
    g.push(Primitive::polyline(pts, true, StrokeStyle::main()).with_fill(FILL_WHITE));
    g
}

/// Tray seen from above: outer rim, inner floor inset by `depth`, and the
/// four corner connectors implying wall thickness.
pub fn box_tray(c: Point, width: f64, height: f64, depth: f64) -> PrimitiveGroup {
    let (hw, hh, d) = (width / 2.0, height / 2.0, depth);
    let mut g = PrimitiveGroup::new();
    g.push(Primitive::rect(
        Point::new(c.x - hw, c.y - hh),
        width,
        height,
        StrokeStyle::main(),
    ));
    g.push(Primitive::rect(
        Point::new(c.x - hw + d, c.y - hh + d),
        width - d * 2.0,
        height - d * 2.0,
        StrokeStyle::detail(),
    ));
    let corners = [
        (Point::new(c.x - hw, c.y - hh), Point::new(c.x - hw + d, c.y - hh + d)),
        (Point::new(c.x + hw, c.y - hh), Point::new(c.x + hw - d, c.y - hh + d)),
        (Point::new(c.x - hw, c.y + hh), Point::new(c.x - hw + d, c.y + hh - d)),
        (Point::new(c.x + hw, c.y + hh), Point::new(c.x + hw - d, c.y + hh - d)),
    ];
    for (outer, inner) in corners {
        g.push(Primitive::line(outer, inner, StrokeStyle::detail()));
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    const C: Point = Point::new(400.0, 300.0);

    fn rect_of(p: &Primitive) -> (Point, f64, f64) {
        match &p.shape {
            Shape::Rectangle { origin, size } => (*origin, size.width, size.height),
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn stepped_tiers_narrow_and_shift() {
        let g = stepped_tiers(C, 150.0, 40.0, 3);
        assert_eq!(g.len(), 3);
        let widths: Vec<f64> = g.items.iter().map(|p| rect_of(p).1).collect();
        assert_eq!(widths, [150.0, 120.0, 90.0]);

        let (o0, _, h0) = rect_of(&g.items[0]);
        let (o2, _, _) = rect_of(&g.items[2]);
        assert_eq!(o0, Point::new(325.0, 240.0));
        assert_eq!(h0, 40.0);
        assert_eq!(o2, Point::new(355.0, 320.0));

        let fills: Vec<_> = g.items.iter().map(|p| p.fill.as_deref()).collect();
        assert_eq!(fills, [Some(FILL_WHITE), Some(FILL_OFF_WHITE), Some(FILL_WHITE)]);

        let b = g.bounds().unwrap();
        assert_eq!(b.center(), C);
    }

    #[test]
    fn sloped_stand_is_a_closed_wedge() {
        let g = sloped_stand(C, 100.0, 80.0, 25.0);
        assert_eq!(g.len(), 1);
        match &g.items[0].shape {
            Shape::Polyline { points, closed } => {
                assert!(*closed);
                assert_eq!(
                    points,
                    &vec![
                        Point::new(350.0, 340.0),
                        Point::new(450.0, 340.0),
                        Point::new(450.0, 285.0),
                        Point::new(350.0, 260.0),
                    ]
                );
            }
            other => panic!("expected polyline, got {other:?}"),
        }
        assert_eq!(g.items[0].fill.as_deref(), Some(FILL_WHITE));
    }

    #[test]
    fn box_tray_insets_inner_rim_by_depth() {
        let g = box_tray(C, 180.0, 120.0, 20.0);
        assert_eq!(g.len(), 6);
        let (outer, ow, oh) = rect_of(&g.items[0]);
        let (inner, iw, ih) = rect_of(&g.items[1]);
        assert_eq!((ow, oh), (180.0, 120.0));
        assert_eq!(inner.x - outer.x, 20.0);
        assert_eq!(inner.y - outer.y, 20.0);
        assert_eq!((iw, ih), (140.0, 80.0));
        assert!(g.items[1].fill.is_none());
        assert!(g.items[1].stroke.width < g.items[0].stroke.width);
        let connectors = g.items[2..]
            .iter()
            .filter(|p| matches!(p.shape, Shape::LineSegment { .. }))
            .count();
        assert_eq!(connectors, 4);
    }
}
