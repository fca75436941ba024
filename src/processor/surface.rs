//! Reference surface processor for A2UI v0.8.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

use super::data_model;
use super::{ProcessorError, StateProcessor};
use crate::protocol::{ComponentInstance, ProtocolMessage};

/// Derived state of one surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub root_component_id: Option<String>,
    pub styles: Map<String, Value>,
    pub components: BTreeMap<String, Component>,
    pub data_model: Map<String, Value>,
    /// Component ids in the order they were first defined
    #[serde(skip)]
    component_order: Vec<String>,
}

/// A component definition as last set by a `surfaceUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Component type name, e.g. `Text` or `Column`.
    pub kind: String,
    pub properties: Value,
}

impl Component {
    fn from_instance(surface_id: &str, instance: &ComponentInstance) -> Result<Self, ProcessorError> {
        let invalid = |reason: String| ProcessorError::InvalidComponent {
            surface_id: surface_id.to_string(),
            id: instance.id.clone(),
            reason,
        };

        let mut types = instance.component.iter();
        let (kind, properties) = match (types.next(), types.next()) {
            (Some(only), None) => only,
            (None, _) => return Err(invalid("no component type given".to_string())),
            (Some(_), Some(_)) => {
                return Err(invalid(format!(
                    "expected one component type, found {}",
                    instance.component.len()
                )))
            }
        };

        Ok(Self {
            id: instance.id.clone(),
            weight: instance.weight,
            kind: kind.clone(),
            properties: properties.clone(),
        })
    }

    /// Child ids from `child` or `children.explicitList`, in order.
    pub fn child_ids(&self) -> Vec<&str> {
        if let Some(child) = self.properties.get("child").and_then(Value::as_str) {
            return vec![child];
        }
        self.properties
            .get("children")
            .and_then(|children| children.get("explicitList"))
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Display text, reading `path` bindings from the surface data model.
    pub fn text(&self, data_model: &Map<String, Value>) -> Option<String> {
        let text = self.properties.get("text")?;
        if let Some(literal) = text.as_str() {
            return Some(literal.to_string());
        }
        if let Some(literal) = text.get("literalString").and_then(Value::as_str) {
            return Some(literal.to_string());
        }
        let path = text.get("path").and_then(Value::as_str)?;
        match data_model::lookup(data_model, path)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn action_name(&self) -> Option<&str> {
        self.properties
            .get("action")
            .and_then(|action| action.get("name"))
            .and_then(Value::as_str)
    }
}

/// A component tree resolved from a surface root.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedNode {
    Component {
        id: String,
        kind: String,
        text: Option<String>,
        action: Option<String>,
        children: Vec<ResolvedNode>,
    },
    /// Referenced but not (yet) defined.
    Missing { id: String },
    /// Already on the path from the root.
    Cycle { id: String },
}

impl ResolvedNode {
    pub fn id(&self) -> &str {
        match self {
            ResolvedNode::Component { id, .. }
            | ResolvedNode::Missing { id }
            | ResolvedNode::Cycle { id } => id,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ResolvedNode::Component { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ResolvedNode] {
        match self {
            ResolvedNode::Component { children, .. } => children,
            _ => &[],
        }
    }
}

impl Surface {
    /// Ids of all components, in the order they were first defined.
    ///
    /// Redefining a component keeps its original position.
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.component_order.iter().map(String::as_str)
    }

    fn insert_component(&mut self, component: Component) {
        if !self.components.contains_key(&component.id) {
            self.component_order.push(component.id.clone());
        }
        self.components.insert(component.id.clone(), component);
    }

    /// Resolve the tree under the root component, if a root was announced.
    pub fn resolve_root(&self) -> Option<ResolvedNode> {
        let root = self.root_component_id.as_deref()?;
        let mut path = HashSet::new();
        Some(self.resolve(root, &mut path))
    }

    fn resolve<'a>(&'a self, id: &'a str, path: &mut HashSet<&'a str>) -> ResolvedNode {
        let Some(component) = self.components.get(id) else {
            return ResolvedNode::Missing { id: id.to_string() };
        };
        if !path.insert(id) {
            return ResolvedNode::Cycle { id: id.to_string() };
        }
        let children = component
            .child_ids()
            .into_iter()
            .map(|child| self.resolve(child, path))
            .collect();
        path.remove(id);

        ResolvedNode::Component {
            id: id.to_string(),
            kind: component.kind.clone(),
            text: component.text(&self.data_model),
            action: component.action_name().map(str::to_string),
            children,
        }
    }
}

/// Folds A2UI messages into a set of surfaces.
///
/// Each message is validated before anything is mutated, so a rejected
/// message leaves the surfaces as they were.
#[derive(Debug, Default)]
pub struct SurfaceProcessor {
    surfaces: BTreeMap<String, Surface>,
}

impl SurfaceProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, message: &ProtocolMessage) -> Result<(), ProcessorError> {
        match message {
            ProtocolMessage::BeginRendering(body) => {
                let surface = self.surfaces.entry(body.surface_id.clone()).or_default();
                surface.root_component_id = Some(body.root.clone());
                if let Some(styles) = &body.styles {
                    surface.styles = styles.clone();
                }
            }
            ProtocolMessage::SurfaceUpdate(body) => {
                let components = body
                    .components
                    .iter()
                    .map(|instance| Component::from_instance(&body.surface_id, instance))
                    .collect::<Result<Vec<_>, _>>()?;
                let surface = self.surfaces.entry(body.surface_id.clone()).or_default();
                for component in components {
                    surface.insert_component(component);
                }
            }
            ProtocolMessage::DataModelUpdate(body) => {
                let value = data_model::contents_to_value(&body.contents).map_err(|reason| {
                    ProcessorError::InvalidDataEntry {
                        surface_id: body.surface_id.clone(),
                        reason,
                    }
                })?;
                let path = body.path.as_deref().unwrap_or("/");
                let mut data = self
                    .surfaces
                    .get(&body.surface_id)
                    .map(|surface| surface.data_model.clone())
                    .unwrap_or_default();
                data_model::merge_at(&mut data, path, value).map_err(|reason| {
                    ProcessorError::InvalidPath {
                        surface_id: body.surface_id.clone(),
                        path: path.to_string(),
                        reason,
                    }
                })?;
                self.surfaces
                    .entry(body.surface_id.clone())
                    .or_default()
                    .data_model = data;
            }
            ProtocolMessage::DeleteSurface(body) => {
                if self.surfaces.remove(&body.surface_id).is_none() {
                    tracing::debug!(surface_id = %body.surface_id, "deleteSurface for unknown surface");
                }
            }
            ProtocolMessage::Malformed { kind, reason, .. } => {
                return Err(ProcessorError::Malformed {
                    kind: *kind,
                    reason: reason.clone(),
                });
            }
            ProtocolMessage::Unknown(_) => {
                tracing::debug!("Ignoring message with no recognised kind");
            }
        }
        Ok(())
    }
}

impl StateProcessor for SurfaceProcessor {
    type Surface = Surface;

    fn apply_messages(&mut self, messages: &[ProtocolMessage]) -> Result<(), ProcessorError> {
        messages.iter().try_for_each(|message| self.apply(message))
    }

    fn reset(&mut self) {
        self.surfaces.clear();
    }

    fn surfaces(&self) -> &BTreeMap<String, Surface> {
        &self.surfaces
    }
}
