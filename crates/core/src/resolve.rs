//! Cross-reference resolution: a post-parse pass that turns the raw
//! `target`/`trigger` field values on events into edges.
//!
//! Target and trigger references may point at entities or events declared
//! later in the document, so they cannot be resolved while the block parser
//! is still scanning. The parser instead records every declaration in the
//! symbol tables and this pass runs once over the finished node list.
//! Unresolvable references produce no edge and no error.

use std::collections::HashMap;

use crate::graph::{Edge, EdgeKind, Node, NodeData};
use crate::parser::ParseOptions;

/// Name-to-id lookup tables filled in by the block parser.
#[derive(Debug, Default)]
pub struct SymbolTables {
    /// Entity label -> node id.
    pub entities: HashMap<String, String>,
    /// `"Entity.Event"` -> node id.
    pub events: HashMap<String, String>,
}

/// Qualify a trigger reference: a value without a `.` is treated as an
/// event of the configured default entity.
pub fn qualify_trigger(reference: &str, options: &ParseOptions) -> String {
    if reference.contains('.') {
        reference.to_owned()
    } else {
        format!("{}.{}", options.default_entity, reference)
    }
}

/// Emit target and trigger edges for every event whose references resolve.
///
/// Events are visited in node index order; each contributes its target edge
/// before its trigger edge, keeping edge emission deterministic for a given
/// input.
pub fn resolve_references(
    nodes: &[Node],
    edges: &mut Vec<Edge>,
    tables: &SymbolTables,
    options: &ParseOptions,
) {
    for node in nodes {
        let NodeData::Event(event) = &node.data else {
            continue;
        };

        if !event.target.is_empty() {
            if let Some(entity_id) = tables.entities.get(&event.target) {
                edges.push(Edge {
                    source: node.id.clone(),
                    target: entity_id.clone(),
                    kind: EdgeKind::Target,
                });
            }
        }

        if !event.trigger.is_empty() {
            let qualified = qualify_trigger(&event.trigger, options);
            if let Some(event_id) = tables.events.get(&qualified) {
                edges.push(Edge {
                    source: event_id.clone(),
                    target: node.id.clone(),
                    kind: EdgeKind::Trigger,
                });
            }
        }
    }
}
