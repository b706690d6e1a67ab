use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Label, LabelStyle, Point, Primitive, StrokeStyle, TextAlign};

/// Width and height dimension markers derived from a prop's bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub width_guide: Primitive,
    pub width_label: Label,
    pub height_guide: Primitive,
    pub height_label: Label,
}

impl Annotations {
    pub fn guides(&self) -> [&Primitive; 2] {
        [&self.width_guide, &self.height_guide]
    }

    pub fn labels(&self) -> [&Label; 2] {
        [&self.width_label, &self.height_label]
    }

    pub fn scale_about(&mut self, c: Point, s: f64) {
        self.width_guide.scale_about(c, s);
        self.height_guide.scale_about(c, s);
        self.width_label.scale_about(c, s);
        self.height_label.scale_about(c, s);
    }
}

pub fn dimension_text(axis: char, mm: f64) -> String {
    format!("{axis}: {mm:.1}mm")
}

/// Build the dimension markers for `b`, the bounds of the bare prop.
///
/// The width guide runs `margin` above the top edge with its label a further
/// `label_offset` above; the height guide runs `margin` right of the right
/// edge with its label rotated a quarter turn beside it.
pub fn annotate(b: &Bounds, margin: f64, label_offset: f64) -> Annotations {
    let mid = b.center();
    let guide_y = b.top - margin;
    let guide_x = b.right + margin;
    Annotations {
        width_guide: Primitive::line(
            Point::new(b.left, guide_y),
            Point::new(b.right, guide_y),
            StrokeStyle::guide(),
        ),
        width_label: Label {
            anchor: Point::new(mid.x, guide_y - label_offset),
            text: dimension_text('W', b.width()),
            rotation_deg: 0.0,
            align: TextAlign::Middle,
            style: LabelStyle::default(),
        },
        height_guide: Primitive::line(
            Point::new(guide_x, b.top),
            Point::new(guide_x, b.bottom),
            StrokeStyle::guide(),
        ),
        height_label: Label {
            anchor: Point::new(guide_x + label_offset, mid.y),
            text: dimension_text('H', b.height()),
            rotation_deg: 90.0,
            align: TextAlign::Start,
            style: LabelStyle::default(),
        },
    }
}
