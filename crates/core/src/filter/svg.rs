//! SVG markup for filter graphs
//!
//! The fragment is what hosts insert into their canvas: a `<filter>`
//! definition followed by a `<rect>` covering the component bounds and
//! referencing the filter through `url(#id)`.

use super::{DiffuseLighting, FilterGraph, Primitive, TransferFunction, Turbulence};
use crate::core_types::Channel;

/// SVG namespace for standalone documents.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Width and height of a standalone document when the host sets none.
pub const DEFAULT_VIEWPORT: f64 = 200.0;

const INDENT: &str = "  ";

impl FilterGraph {
    /// `<filter>` and covering `<rect>` markup.
    pub fn to_svg_fragment(&self) -> String {
        let mut w = MarkupWriter::new(0);
        self.write_fragment(&mut w);
        w.finish()
    }

    /// Fragment wrapped in a standalone `<svg>` element.
    pub fn to_svg_document(&self, width: f64, height: f64) -> String {
        let mut w = MarkupWriter::new(0);
        w.start(
            "svg",
            &[
                ("xmlns", SVG_NAMESPACE.to_string()),
                ("width", number(width)),
                ("height", number(height)),
            ],
        );
        self.write_fragment(&mut w);
        w.end("svg");
        w.finish()
    }

    fn write_fragment(&self, w: &mut MarkupWriter) {
        w.start("filter", &[("id", self.id.clone())]);
        for primitive in &self.primitives {
            write_primitive(w, primitive);
        }
        w.end("filter");

        w.empty(
            "rect",
            &[
                ("x", "0".to_string()),
                ("y", "0".to_string()),
                ("width", "100%".to_string()),
                ("height", "100%".to_string()),
                ("filter", self.reference()),
            ],
        );
    }
}

fn write_primitive(w: &mut MarkupWriter, primitive: &Primitive) {
    let name = primitive.element_name();
    match primitive {
        Primitive::Turbulence(t) => w.empty(name, &turbulence_attrs(t)),
        Primitive::ComponentTransfer(ct) => {
            w.start(name, &[("in", ct.input.clone())]);
            for channel in Channel::ALL {
                w.empty(channel.element_name(), &transfer_attrs(ct.function(channel)));
            }
            w.end(name);
        }
        Primitive::DiffuseLighting(dl) => {
            w.start(name, &lighting_attrs(dl));
            w.empty(
                "feDistantLight",
                &[
                    ("azimuth", number(dl.light_source.azimuth)),
                    ("elevation", number(dl.light_source.elevation)),
                ],
            );
            w.end(name);
        }
    }
}

fn turbulence_attrs(t: &Turbulence) -> Vec<(&'static str, String)> {
    vec![
        ("type", t.kind.as_svg_str().to_string()),
        ("baseFrequency", t.base_frequency()),
        ("numOctaves", t.num_octaves.to_string()),
        ("result", t.result.clone()),
        ("seed", number(t.seed)),
    ]
}

fn transfer_attrs(function: &TransferFunction) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("type", function.kind_str().to_string())];
    match function {
        TransferFunction::Discrete(values) | TransferFunction::Table(values) => {
            attrs.push(("tableValues", number_list(values)));
        }
        TransferFunction::Linear { slope, intercept } => {
            attrs.push(("slope", number(*slope)));
            attrs.push(("intercept", number(*intercept)));
        }
        TransferFunction::Gamma {
            amplitude,
            exponent,
            offset,
        } => {
            attrs.push(("amplitude", number(*amplitude)));
            attrs.push(("exponent", number(*exponent)));
            attrs.push(("offset", number(*offset)));
        }
    }
    attrs
}

fn lighting_attrs(dl: &DiffuseLighting) -> Vec<(&'static str, String)> {
    vec![
        ("in", dl.input.clone()),
        ("lighting-color", dl.lighting_color.clone()),
        ("surfaceScale", number(dl.surface_scale)),
        ("diffuseConstant", number(dl.diffuse_constant)),
    ]
}

/// Shortest decimal form that reads back to the same value (`3`, `0.01`).
pub fn number(value: f64) -> String {
    value.to_string()
}

/// Space separated number list, as used by `tableValues`.
pub fn number_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

/// Indented element writer. One element per line.
struct MarkupWriter {
    buf: String,
    depth: usize,
}

impl MarkupWriter {
    fn new(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    fn start(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.open_tag(name, attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.open_tag(name, attrs);
        self.buf.push_str("/>\n");
    }

    fn end(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    fn open_tag(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_attr(value));
            self.buf.push('"');
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Channels, Effect, LightingParams, NoiseKind, ResolvedNoise};
    use crate::filter::build_filter_graph;

    fn noise() -> ResolvedNoise {
        ResolvedNoise {
            noise_kind: NoiseKind::Turbulence,
            frequency_x: 0.01,
            frequency_y: 0.02,
            octaves: 3,
            seed: 1.0,
        }
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number(3.0), "3");
        assert_eq!(number(0.01), "0.01");
        assert_eq!(number(20.0), "20");
        assert_eq!(number(4821.5), "4821.5");
        assert_eq!(number_list(&[0.0, 0.5, 0.25]), "0 0.5 0.25");
        assert_eq!(number_list(&[]), "");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(escape_attr("a\"b<c>&"), "a&quot;b&lt;c&gt;&amp;");
    }

    #[test]
    fn test_noise_only_fragment() {
        let graph = build_filter_graph("perlin_Ab3dE9", &noise(), &Effect::None);
        let expected = "\
<filter id=\"perlin_Ab3dE9\">
  <feTurbulence type=\"turbulence\" baseFrequency=\"0.01 0.02\" numOctaves=\"3\" result=\"turbulence\" seed=\"1\"/>
</filter>
<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" filter=\"url(#perlin_Ab3dE9)\"/>
";
        assert_eq!(graph.to_svg_fragment(), expected);
    }

    #[test]
    fn test_table_fragment_lists_values() {
        let tables = Channels::new(
            vec![0.0, 0.5, 0.25],
            vec![0.0, 0.75, 0.25],
            vec![0.25, 0.75, 0.0],
            vec![1.0, 1.0, 1.0],
        );
        let graph = build_filter_graph("perlin_x", &noise(), &Effect::Table(tables));
        let svg = graph.to_svg_fragment();
        assert!(svg.contains("<feComponentTransfer in=\"turbulence\">"));
        assert!(svg.contains("<feFuncR type=\"table\" tableValues=\"0 0.5 0.25\"/>"));
        assert!(svg.contains("<feFuncA type=\"table\" tableValues=\"1 1 1\"/>"));
        assert!(svg.contains("</feComponentTransfer>"));
    }

    #[test]
    fn test_lighting_fragment() {
        let svg = build_filter_graph(
            "perlin_x",
            &noise(),
            &Effect::Lighting(LightingParams::default()),
        )
        .to_svg_fragment();
        assert!(svg.contains(
            "<feDiffuseLighting in=\"turbulence\" lighting-color=\"#FFFFFF\" surfaceScale=\"20\" diffuseConstant=\"1\">"
        ));
        assert!(svg.contains("<feDistantLight azimuth=\"40\" elevation=\"60\"/>"));
        assert!(svg.contains("</feDiffuseLighting>"));
    }

    #[test]
    fn test_document_wraps_fragment() {
        let graph = build_filter_graph("perlin_x", &noise(), &Effect::None);
        let doc = graph.to_svg_document(DEFAULT_VIEWPORT, DEFAULT_VIEWPORT);
        assert!(doc.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"200\">\n"
        ));
        assert!(doc.contains("  <filter id=\"perlin_x\">\n"));
        assert!(doc.contains("  <rect "));
        assert!(doc.ends_with("</svg>\n"));
    }
}
