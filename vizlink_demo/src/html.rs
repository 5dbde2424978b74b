// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self-contained HTML report of rendered view states.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One rendered state: a heading, a caption and one or more inline SVG documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlSection {
    /// Heading.
    pub title: String,
    /// Caption describing the interaction that produced this state.
    pub description: String,
    /// SVG documents shown side by side.
    pub svgs: Vec<String>,
}

impl HtmlSection {
    /// Creates a section.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            svgs: Vec::new(),
        }
    }

    /// Appends an SVG document.
    pub fn with_svg(mut self, svg: String) -> Self {
        self.svgs.push(svg);
        self
    }
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
section { margin-bottom: 3em; }
.views { display: flex; flex-wrap: wrap; gap: 2em; align-items: flex-start; }
.active { stroke: #333; stroke-width: 2; }
";

/// Renders the report.
pub fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    let title = escape_xml(title);
    let _ = writeln!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>"
    );
    let _ = writeln!(out, "<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>");
    for section in sections {
        let _ = writeln!(
            out,
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n<div class=\"views\">",
            escape_xml(&section.title),
            escape_xml(&section.description)
        );
        for svg in &section.svgs {
            out.push_str(svg);
        }
        out.push_str("</div>\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
