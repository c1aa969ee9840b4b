//! SVG frame serialization
//!
//! One document per frame: the four boundary lines of the box, then every
//! disk as a filled circle in index order (later disks draw on top).

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::consts::BOUNDARY_STROKE;
use crate::sim::{Bounds, DiskRecord, DiskSystem};

/// Styling that is not part of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    pub boundary_stroke: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            boundary_stroke: BOUNDARY_STROKE.to_string(),
        }
    }
}

/// Render the current state of `system`
pub fn render_svg(system: &DiskSystem, style: &SvgStyle) -> String {
    render_records(system.records(), &system.bounds(), style)
}

/// Render an arbitrary snapshot
pub fn render_records<'a>(
    records: impl IntoIterator<Item = DiskRecord<'a>>,
    bounds: &Bounds,
    style: &SvgStyle,
) -> String {
    let (w, h) = (bounds.width, bounds.height);
    let stroke = escape(&style.boundary_stroke);
    let mut doc = String::with_capacity(4096);

    // Writing into a String cannot fail
    let _ = writeln!(doc, r#"<?xml version="1.0" encoding="utf-8" ?>"#);
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" baseProfile="full" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let corners = [(0.0, 0.0), (0.0, h), (w, h), (w, 0.0), (0.0, 0.0)];
    for pair in corners.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        let _ = writeln!(
            doc,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" />"#
        );
    }

    for record in records {
        let _ = writeln!(
            doc,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke-width="0" />"#,
            record.x,
            record.y,
            record.radius,
            escape(record.color.as_str())
        );
    }

    doc.push_str("</svg>\n");
    doc
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
