//! Drawing surfaces the engine paints onto.

use crate::constants::{FILL_WHITE, LABEL_FILL};
use crate::geometry::{Label, Primitive, Shape, TextAlign};
use crate::viewport::ViewportSize;

/// A stateful drawing context owned by the render session.
///
/// `clear` must discard everything drawn before it; the session calls it
/// before every rebuild.
pub trait DrawingSurface {
    fn clear(&mut self, size: ViewportSize);
    fn draw_primitive(&mut self, p: &Primitive);
    fn draw_label(&mut self, l: &Label);
    fn draw_placeholder(&mut self, text: &str);
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Accumulates an SVG document in memory.
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    size: ViewportSize,
    body: String,
}

impl SvgSurface {
    pub fn new(size: ViewportSize) -> Self {
        SvgSurface {
            size,
            body: String::new(),
        }
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn is_blank(&self) -> bool {
        self.body.is_empty()
    }

    /// Complete standalone SVG for what is currently drawn.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\" stroke-linejoin=\"round\">\n"
        ));
        s.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{FILL_WHITE}\"/>\n"
        ));
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        s
    }
}

fn paint_attrs(p: &Primitive) -> String {
    let mut out = format!(
        "stroke=\"{}\" stroke-width=\"{:.2}\" fill=\"{}\"",
        svg_escape(&p.stroke.color),
        p.stroke.width,
        svg_escape(p.fill.as_deref().unwrap_or("none"))
    );
    if let Some(dash) = &p.stroke.dash {
        let parts: Vec<String> = dash.iter().map(|d| format!("{d:.2}")).collect();
        out.push_str(&format!(" stroke-dasharray=\"{}\"", parts.join(" ")));
    }
    out
}

impl DrawingSurface for SvgSurface {
    fn clear(&mut self, size: ViewportSize) {
        self.size = size;
        self.body.clear();
    }

    fn draw_primitive(&mut self, p: &Primitive) {
        let attrs = paint_attrs(p);
        let el = match &p.shape {
            Shape::Rectangle { origin, size } => {
                // SVG rejects negative extents
                let x = origin.x.min(origin.x + size.width);
                let y = origin.y.min(origin.y + size.height);
                format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {attrs}/>\n",
                    x,
                    y,
                    size.width.abs(),
                    size.height.abs()
                )
            }
            Shape::Polyline { points, closed } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|q| format!("{:.2},{:.2}", q.x, q.y))
                    .collect();
                let tag = if *closed { "polygon" } else { "polyline" };
                format!("<{tag} points=\"{}\" {attrs}/>\n", pts.join(" "))
            }
            Shape::LineSegment { from, to } => format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {attrs}/>\n",
                from.x, from.y, to.x, to.y
            ),
        };
        self.body.push_str(&el);
    }

    fn draw_label(&mut self, l: &Label) {
        let anchor = match l.align {
            TextAlign::Start => "start",
            TextAlign::Middle => "middle",
        };
        let (x, y) = (l.anchor.x, l.anchor.y);
        let transform = if l.rotation_deg != 0.0 {
            format!(" transform=\"rotate({:.2} {x:.2} {y:.2})\"", l.rotation_deg)
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" fill=\"{}\" font-size=\"{:.2}\" font-family=\"{}\" text-anchor=\"{anchor}\"{transform}>{}</text>\n",
            svg_escape(&l.style.color),
            l.style.font_size,
            svg_escape(&l.style.font_family),
            svg_escape(&l.text)
        ));
    }

    fn draw_placeholder(&mut self, text: &str) {
        let c = self.size.center();
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{LABEL_FILL}\" font-size=\"12.00\" font-family=\"monospace\" text-anchor=\"middle\">{}</text>\n",
            c.x,
            c.y,
            svg_escape(text)
        ));
    }
}
