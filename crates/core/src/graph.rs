//! Typed node/edge graph model and its editor interchange JSON shape.
//!
//! The serde form of [`Graph`] is exactly what the graph-editing surface
//! consumes and produces: nodes as `{id, type, data}` records and edges as
//! `{source, target, type}` records. Deserialization is tolerant of two
//! editor-side representations that predate the typed model: attribute
//! maps instead of attribute lists, and multi-value fields flattened into
//! a single delimiter-joined string.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Reserved internal delimiter used when a multi-value field (probability,
/// temporal) arrives flattened into one string. Never appears in clause
/// text itself.
pub const CLAUSE_DELIMITER: &str = "#end#";

/// A complete graph: the unit handed to and received from the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges of the given kind leaving `id`, in insertion order.
    pub fn outgoing<'a>(&'a self, id: &'a str, kind: EdgeKind) -> impl Iterator<Item = &'a Edge> {
        self.edges
            .iter()
            .filter(move |e| e.kind == kind && e.source == id)
    }

    /// Edges of the given kind arriving at `id`, in insertion order.
    pub fn incoming<'a>(&'a self, id: &'a str, kind: EdgeKind) -> impl Iterator<Item = &'a Edge> {
        self.edges
            .iter()
            .filter(move |e| e.kind == kind && e.target == id)
    }
}

/// A graph node: a minted id plus kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub data: NodeData,
}

impl Node {
    pub fn label(&self) -> &str {
        match &self.data {
            NodeData::Entity(e) => &e.label,
            NodeData::Event(e) => &e.label,
            NodeData::Rule(r) => &r.label,
        }
    }
}

/// Kind-specific node payload, tagged `"type"` / `"data"` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeData {
    Entity(EntityData),
    Event(EventData),
    Rule(RuleData),
}

/// A stateful object type with named attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityData {
    pub label: String,
    #[serde(deserialize_with = "de_attributes")]
    pub attributes: Vec<Attribute>,
}

/// One `key: value` pair from a `State` block. Insertion order is
/// significant and preserved end to end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An entity-owned action with guard, effect, probability clauses, and
/// optional target/trigger references.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventData {
    pub label: String,
    /// Entity label this event acts upon, as written in the source.
    pub target: String,
    pub requires: String,
    pub effect: String,
    #[serde(deserialize_with = "de_clauses")]
    pub probability: Vec<String>,
    /// Event reference that causes this event, as written in the source.
    /// Either `Entity.Event` or a bare event name resolved against the
    /// configured default entity.
    pub trigger: String,
    /// Owning-entity back-reference, set once the owns-event edge is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

/// A global guarded effect with optional temporal/probabilistic formulas.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleData {
    pub label: String,
    pub when: String,
    pub effect: String,
    #[serde(deserialize_with = "de_clauses")]
    pub temporal: Vec<String>,
}

/// A directed, typed edge between two node ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Structural containment, entity -> its event.
    OwnsEvent,
    /// Event -> entity it acts upon.
    Target,
    /// Causal, triggering event -> triggered event.
    Trigger,
    /// Rule -> entity inferred to be affected by it.
    RuleEffect,
}

/// Mints sequential string ids. Ids grow monotonically and are never
/// reused, including after node deletion.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    pub fn mint(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator::new()
    }
}

/// Join an ordered clause list into the flat editor representation.
pub fn join_clauses(clauses: &[String]) -> String {
    clauses.join(CLAUSE_DELIMITER)
}

/// Split a flat editor representation back into an ordered clause list,
/// trimming each clause and dropping empties.
pub fn split_clauses(joined: &str) -> Vec<String> {
    joined
        .split(CLAUSE_DELIMITER)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Accept a multi-value field as either a clause list or a single
/// delimiter-joined string.
fn de_clauses<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(clauses) => clauses,
        Raw::Joined(joined) => split_clauses(&joined),
    })
}

/// Accept attributes as either an ordered `{name, value}` list or a JSON
/// object map. A list keeps its order; a map contributes its iteration
/// order. Non-string map values are rendered to their JSON string form.
fn de_attributes<'de, D>(deserializer: D) -> Result<Vec<Attribute>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Attribute>),
        Map(serde_json::Map<String, serde_json::Value>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(attributes) => attributes,
        Raw::Map(map) => map
            .into_iter()
            .map(|(name, value)| Attribute {
                name,
                value: match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect(),
    })
}
