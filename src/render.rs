//! SVG rendering of a laid-out merged graph
//!
//! Each vertex is a filled rectangle with one text line per member text;
//! each edge is a polyline. The drawing is shifted so the bounding box of
//! the boxes starts at `margin`, and the document is the bounding box plus
//! the margin on every side.

use crate::errors::Result;
use crate::graph::MergedGraph;
use crate::layout::{Layout, LayoutHints, Layouter};

/// Visual parameters for [`render_svg`]
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    pub margin: f64,
    pub line_height: f64,
    /// Baseline offset of the first text line from the top of its box
    pub baseline: f64,
    pub vertex_fill: String,
    pub stroke: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            margin: 10.0,
            line_height: 20.0,
            baseline: 16.0,
            vertex_fill: "mintcream".to_string(),
            stroke: "black".to_string(),
        }
    }
}

/// Render `graph` placed by `layout` as a standalone SVG document.
///
/// Fails if `layout` does not cover every vertex and edge of `graph`.
pub fn render_svg(graph: &MergedGraph, layout: &Layout, style: &SvgStyle) -> Result<String> {
    layout.check(graph)?;

    let (left, top, width, height) = layout
        .bounds()
        .map(|b| (b.left, b.top, b.width(), b.height()))
        .unwrap_or((0.0, 0.0, 0.0, 0.0));

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        width + 2.0 * style.margin,
        height + 2.0 * style.margin
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        style.margin - left,
        style.margin - top
    ));

    svg.push_str("<g class=\"edges\">\n");
    for &(u, v) in graph.edges() {
        let Some(path) = layout.edge_path(u, v) else {
            continue;
        };
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\"/>\n",
            path_data(&path.points),
            escape(&style.stroke)
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g class=\"vertices\">\n");
    for id in graph.vertices() {
        let (Some(vertex), Some(b)) = (graph.vertex(id), layout.vertex_box(id)) else {
            continue;
        };
        svg.push_str(&format!(
            "<g transform=\"translate({},{})\">\n",
            b.left(),
            b.top()
        ));
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\"/>\n",
            b.width,
            b.height,
            escape(&style.vertex_fill),
            escape(&style.stroke)
        ));
        for (i, text) in vertex.texts.iter().enumerate() {
            svg.push_str(&format!(
                "<text y=\"{}\">{}</text>\n",
                style.line_height * i as f64 + style.baseline,
                escape(text)
            ));
        }
        svg.push_str("</g>\n");
    }
    svg.push_str("</g>\n");

    svg.push_str("</g>\n</svg>\n");
    Ok(svg)
}

/// Lay out `graph` with `layouter` and render the result.
pub fn render_with<L: Layouter + ?Sized>(
    graph: &MergedGraph,
    layouter: &L,
    hints: &LayoutHints,
    style: &SvgStyle,
) -> Result<String> {
    let layout = layouter.layout(graph, hints)?;
    render_svg(graph, &layout, style)
}

fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&format!("{x},{y}"));
    }
    d
}

/// Escape text for XML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;
    use crate::layout::{EdgePath, VertexBox};

    /// Stacks vertices top to bottom and joins box centres
    struct StackLayouter;

    impl Layouter for StackLayouter {
        fn layout(&self, graph: &MergedGraph, hints: &LayoutHints) -> Result<Layout> {
            let mut y = 0.0;
            let mut vertices = Vec::new();
            for id in graph.vertices() {
                let vertex = graph
                    .vertex(id)
                    .ok_or_else(|| GraphError::layout("unknown vertex"))?;
                let (width, height) = hints.vertex_size(vertex);
                vertices.push(VertexBox {
                    x: width / 2.0,
                    y: y + height / 2.0,
                    width,
                    height,
                });
                y += height + hints.layer_margin;
            }
            let edges = graph
                .edges()
                .iter()
                .map(|&(u, v)| EdgePath {
                    source: u,
                    target: v,
                    points: vec![
                        (vertices[u].x, vertices[u].y),
                        (vertices[v].x, vertices[v].y),
                    ],
                })
                .collect();
            Ok(Layout { vertices, edges })
        }
    }

    fn graph() -> MergedGraph {
        let mut g = MergedGraph::new();
        g.add_vertex(vec!["00 a<b".to_string(), "10 c&d".to_string()]);
        g.add_vertex(vec!["21 e".to_string()]);
        g.add_edge(0, 1);
        g
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
        assert_eq!(escape("停電"), "停電");
    }

    #[test]
    fn test_render() {
        let svg = render_with(
            &graph(),
            &StackLayouter,
            &LayoutHints::default(),
            &SvgStyle::default(),
        )
        .unwrap();

        // 40 + 200 + 20 tall, 1000 wide, plus 10 on each side
        assert!(svg.contains("width=\"1020\" height=\"280\""));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("<text y=\"16\">00 a&lt;b</text>"));
        assert!(svg.contains("<text y=\"36\">10 c&amp;d</text>"));
        assert!(svg.contains("fill=\"mintcream\""));
        assert!(svg.contains("d=\"M500,20L500,250\""));
    }

    #[test]
    fn test_render_rejects_incomplete_layout() {
        let layout = Layout {
            vertices: vec![VertexBox {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            }],
            edges: Vec::new(),
        };
        let err = render_svg(&graph(), &layout, &SvgStyle::default()).unwrap_err();
        assert!(matches!(err, GraphError::Layout { .. }));
    }

    #[test]
    fn test_render_empty() {
        let svg = render_svg(&MergedGraph::new(), &Layout::default(), &SvgStyle::default()).unwrap();
        assert!(svg.contains("width=\"20\" height=\"20\""));
        assert_eq!(svg.matches("<rect").count(), 0);
    }
}
