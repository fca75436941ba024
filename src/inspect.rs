//! Read-only views over derived surfaces: the state inspector and preview.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::processor::Surface;

pub use crate::processor::ResolvedNode;

pub const EMPTY_PREVIEW: &str = "No surfaces to render. Send a payload to start.";

/// What the state inspector shows for one surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSummary {
    pub root_component_id: Option<String>,
    pub data_model: Map<String, Value>,
    pub components_count: usize,
    pub component_ids: Vec<String>,
}

pub type StateSnapshot = BTreeMap<String, SurfaceSummary>;

pub fn snapshot(surfaces: &BTreeMap<String, Surface>) -> StateSnapshot {
    surfaces
        .iter()
        .map(|(id, surface)| {
            let summary = SurfaceSummary {
                root_component_id: surface.root_component_id.clone(),
                data_model: surface.data_model.clone(),
                components_count: surface.components.len(),
                component_ids: surface.component_ids().map(str::to_string).collect(),
            };
            (id.clone(), summary)
        })
        .collect()
}

pub fn snapshot_json(surfaces: &BTreeMap<String, Surface>) -> String {
    serde_json::to_string_pretty(&snapshot(surfaces)).unwrap_or_else(|_| "{}".to_string())
}

/// Text rendering of every surface's component tree.
pub fn preview_lines(surfaces: &BTreeMap<String, Surface>) -> Vec<String> {
    if surfaces.is_empty() {
        return vec![EMPTY_PREVIEW.to_string()];
    }

    let mut lines = Vec::new();
    for (id, surface) in surfaces {
        lines.push(format!("Surface: {id}"));
        match surface.resolve_root() {
            Some(root) => push_node(&root, 1, &mut lines),
            None => lines.push("  (waiting for beginRendering)".to_string()),
        }
    }
    lines
}

fn push_node(node: &ResolvedNode, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        ResolvedNode::Component {
            id,
            kind,
            text,
            action,
            children,
        } => {
            let mut line = format!("{indent}{kind} #{id}");
            if let Some(text) = text {
                line.push_str(&format!(" {text:?}"));
            }
            if let Some(action) = action {
                line.push_str(&format!(" [{action}]"));
            }
            lines.push(line);
            for child in children {
                push_node(child, depth + 1, lines);
            }
        }
        ResolvedNode::Missing { id } => lines.push(format!("{indent}#{id} (missing)")),
        ResolvedNode::Cycle { id } => lines.push(format!("{indent}#{id} (cycle)")),
    }
}
