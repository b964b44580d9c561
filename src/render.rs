//! Graph export for renderers.
//!
//! A renderer receives the explored graph and the winning path once a
//! search is over. Two writers ship with the crate:
//!
//! ```text
//! LinkGraph + Path → DotRenderer  → Graphviz DOT (dot -Tsvg, xdot, ...)
//!                  → JsonRenderer → {"nodes": [...], "edges": [...], "path": [...]}
//! ```
//!
//! Both keep node roles (start, end, normal, intersection) apart and flag
//! path edges so they can be drawn distinctly from the rest.

use std::io::Write;
use serde::Serialize;

use crate::model::{LinkGraph, NodeRole, Path, Title};
use crate::{Error, Result};

/// Consumer of a finished search.
pub trait GraphRenderer {
    fn render(&mut self, graph: &LinkGraph, path: &Path) -> Result<()>;
}

// ============================================================================
// DOT
// ============================================================================

/// Writes the graph as a Graphviz `graph` (undirected).
pub struct DotRenderer<W: Write> {
    writer: W,
}

impl<W: Write> DotRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GraphRenderer for DotRenderer<W> {
    fn render(&mut self, graph: &LinkGraph, path: &Path) -> Result<()> {
        write_dot(&mut self.writer, graph, path)
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::Render(e.to_string()))
    }
}

fn write_dot(w: &mut dyn Write, graph: &LinkGraph, path: &Path) -> std::io::Result<()> {
    writeln!(w, "// linkpath exploration: {path}")?;
    writeln!(w, "// Nodes: {}", graph.node_count())?;
    writeln!(w, "// Edges: {}", graph.edge_count())?;
    writeln!(w, "graph linkpath {{")?;
    writeln!(w, "  bgcolor=\"#2b2b2b\";")?;
    writeln!(w, "  node [shape=point, color=\"#95a5a6\"];")?;
    writeln!(w, "  edge [color=\"#ecf0f1\", penwidth=0.5];")?;

    for (title, role) in graph.nodes() {
        let on_path = path.contains(title.as_str());
        writeln!(w, "  {} [{}];", quote(title), node_attrs(role, on_path, title))?;
    }

    for edge in graph.edges() {
        let on_path = is_path_edge(path, &edge.a, &edge.b);
        let attrs = if on_path { " [color=\"#f1c40f\", penwidth=3.0]" } else { "" };
        writeln!(w, "  {} -- {}{};", quote(&edge.a), quote(&edge.b), attrs)?;
    }

    writeln!(w, "}}")?;
    Ok(())
}

fn node_attrs(role: NodeRole, on_path: bool, title: &Title) -> String {
    // Path nodes are labelled and highlighted regardless of role.
    if on_path {
        return format!(
            "shape=circle, style=filled, fillcolor=\"#f1c40f\", fontcolor=white, label={}",
            quote(title),
        );
    }
    match role {
        NodeRole::Start => "shape=circle, style=filled, fillcolor=\"#3498db\"".into(),
        NodeRole::End => "shape=circle, style=filled, fillcolor=\"#e74c3c\"".into(),
        NodeRole::Intersection => "shape=circle, style=filled, fillcolor=\"#2ecc71\"".into(),
        NodeRole::Normal => "label=\"\"".into(),
    }
}

/// Quote a title as a DOT identifier.
fn quote(title: &Title) -> String {
    format!("\"{}\"", title.as_str().replace('\\', "\\\\").replace('"', "\\\""))
}

fn is_path_edge(path: &Path, a: &Title, b: &Title) -> bool {
    path.steps().any(|(x, y)| (x == a && y == b) || (x == b && y == a))
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonGraph<'a> {
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
    path: &'a Path,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    title: &'a Title,
    role: NodeRole,
    on_path: bool,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a Title,
    target: &'a Title,
    on_path: bool,
}

/// Writes the graph as one pretty-printed JSON document.
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GraphRenderer for JsonRenderer<W> {
    fn render(&mut self, graph: &LinkGraph, path: &Path) -> Result<()> {
        let doc = JsonGraph {
            nodes: graph.nodes()
                .map(|(title, role)| JsonNode { title, role, on_path: path.contains(title.as_str()) })
                .collect(),
            edges: graph.edges()
                .map(|e| JsonEdge { source: &e.a, target: &e.b, on_path: is_path_edge(path, &e.a, &e.b) })
                .collect(),
            path,
        };
        serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (LinkGraph, Path) {
        let mut g = LinkGraph::new();
        let (a, b, c, x) = (Title::from("A"), Title::from("B"), Title::from("C"), Title::from("X"));
        g.add_node(a.clone(), NodeRole::Start);
        g.add_node(c.clone(), NodeRole::End);
        g.add_edge(&a, &b);
        g.add_edge(&b, &c);
        g.add_edge(&a, &x);
        g.set_role(&b, NodeRole::Intersection);
        (g, Path::from_titles(vec![a, b, c]).unwrap())
    }

    #[test]
    fn test_dot_highlights_path_edges() {
        let (g, p) = sample();
        let mut r = DotRenderer::new(Vec::new());
        r.render(&g, &p).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();

        assert!(out.starts_with("// linkpath exploration: A -> B -> C"));
        assert!(out.contains("\"A\" -- \"B\" [color=\"#f1c40f\", penwidth=3.0];"));
        assert!(out.contains("\"A\" -- \"X\";"));
        assert!(out.contains("\"X\" [label=\"\"];"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(&Title::from("Say \"hi\"")), "\"Say \\\"hi\\\"\"");
    }

    #[test]
    fn test_json_roles_and_path() {
        let (g, p) = sample();
        let mut r = JsonRenderer::new(Vec::new());
        r.render(&g, &p).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&r.into_inner()).unwrap();

        assert_eq!(v["path"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(v["nodes"][0]["role"], "start");
        let b = v["nodes"].as_array().unwrap().iter().find(|n| n["title"] == "B").unwrap();
        assert_eq!(b["role"], "intersection");
        let off_path = v["edges"].as_array().unwrap().iter().filter(|e| e["on_path"] == false).count();
        assert_eq!(off_path, 1);
    }
}
