// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of scenes.
//!
//! One [`SvgScene`] is one `<svg>` element sized like the view's container. Scenes are appended
//! in paint order; within a scene marks are sorted by `(z_index, id)`. Active marks carry
//! `class="active"` and tooltips become `<title>` children.

use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use vizlink_core::{MarkId, MarkPayload, Scene, SceneMark, TextAnchor, TextBaseline};

#[derive(Debug)]
struct SvgMark {
    z_index: i32,
    mark: SceneMark,
    clip: Option<usize>,
}

/// An SVG document under construction.
#[derive(Debug)]
pub struct SvgScene {
    id: String,
    width: f64,
    height: f64,
    clips: Vec<Rect>,
    marks: Vec<SvgMark>,
}

impl SvgScene {
    /// Creates an empty document for the container `id` of the given size.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            clips: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Appends every mark of `scene`.
    pub fn push_scene(&mut self, scene: &Scene) -> &mut Self {
        self.push_scene_clipped(scene, None, |_| false)
    }

    /// Appends every mark of `scene`, clipping the marks selected by `clipped` to `clip`.
    pub fn push_scene_clipped(
        &mut self,
        scene: &Scene,
        clip: Option<Rect>,
        clipped: impl Fn(MarkId) -> bool,
    ) -> &mut Self {
        let clip_index = clip.map(|rect| {
            self.clips.push(rect);
            self.clips.len() - 1
        });
        for (id, mark) in scene.sorted() {
            self.marks.push(SvgMark {
                z_index: mark.z_index,
                mark: mark.clone(),
                clip: if clipped(id) { clip_index } else { None },
            });
        }
        self
    }

    /// Returns the number of marks appended so far.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Serializes the document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let id = escape_xml(&self.id);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}-svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );
        if !self.clips.is_empty() {
            out.push_str("<defs>\n");
            for (i, r) in self.clips.iter().enumerate() {
                let _ = writeln!(
                    out,
                    r#"<clipPath id="{id}-clip-{i}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    r.x0,
                    r.y0,
                    r.width(),
                    r.height(),
                );
            }
            out.push_str("</defs>\n");
        }
        let _ = writeln!(out, r#"<g id="{id}">"#);

        // Stable: scenes keep their relative order within a z level.
        let mut order: Vec<&SvgMark> = self.marks.iter().collect();
        order.sort_by_key(|m| m.z_index);
        for m in order {
            write_mark(&mut out, &id, m);
        }

        out.push_str("</g>\n</svg>\n");
        out
    }
}

fn write_mark(out: &mut String, svg_id: &str, m: &SvgMark) {
    let (tag, body) = match &m.mark.payload {
        MarkPayload::Rect(r) => {
            let mut attrs = format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_paint_attr(&mut attrs, "fill", &r.fill);
            write_stroke(&mut attrs, &r.stroke, r.stroke_width);
            ("rect", attrs)
        }
        MarkPayload::Path(p) => {
            let mut attrs = format!(r#"<path d="{}""#, p.path.to_svg());
            write_paint_attr(&mut attrs, "fill", &p.fill);
            write_stroke(&mut attrs, &p.stroke, p.stroke_width);
            ("path", attrs)
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let mut attrs = format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}""#,
                t.pos.x, t.pos.y, t.font_size
            );
            if t.angle != 0.0 {
                let _ = write!(
                    attrs,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            attrs.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(&mut attrs, "fill", &t.fill);
            ("text", attrs)
        }
    };
    out.push_str(&body);
    if m.mark.active {
        out.push_str(r#" class="active""#);
    }
    if let Some(clip) = m.clip {
        let _ = write!(out, r#" clip-path="url(#{svg_id}-clip-{clip})""#);
    }
    out.push('>');
    if let Some(tooltip) = &m.mark.tooltip {
        let _ = write!(out, "<title>{}</title>", escape_xml(tooltip));
    }
    if let MarkPayload::Text(t) = &m.mark.payload {
        out.push_str(&escape_xml(&t.text));
    }
    let _ = writeln!(out, "</{tag}>");
}

fn write_stroke(out: &mut String, brush: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", brush);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (value, opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

/// Escapes text for XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use peniko::color::palette::css;
    use vizlink_core::{Mark, TableId};

    #[test]
    fn active_marks_tooltips_and_clips_are_serialized() {
        let mut scene = Scene::new();
        let bar = MarkId::for_row(TableId(1), 7);
        scene.tick([
            Mark::builder(bar)
                .rect()
                .x(0.0)
                .y(0.0)
                .w(10.0)
                .h(10.0)
                .fill(css::GREEN)
                .tooltip("a < b")
                .build(),
            Mark::builder(MarkId::from_raw(1))
                .text()
                .x(1.0)
                .y(2.0)
                .content("Trails")
                .build(),
        ]);
        assert!(scene.set_active(bar, true));

        let mut svg = SvgScene::new("barchart", 260.0, 300.0);
        svg.push_scene_clipped(&scene, Some(Rect::new(0.0, 0.0, 5.0, 5.0)), |id| id == bar);
        let text = svg.to_svg_string();
        assert!(text.contains(r#"<g id="barchart">"#));
        assert!(text.contains(r#"class="active""#));
        assert!(text.contains("<title>a &lt; b</title>"));
        assert!(text.contains(r#"clip-path="url(#barchart-clip-0)""#));
        assert!(text.contains(">Trails</text>"));
        assert!(scene.hit_test(Point::new(5.0, 5.0)).is_some());
    }
}
