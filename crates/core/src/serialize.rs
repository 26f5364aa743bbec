//! Graph -> `.spec` text emission: the inverse of the block parser.
//!
//! The graph may have been freely mutated by the editor, so rendering
//! trusts edges over raw field values: `Target:` and `Trigger:` lines are
//! derived from target/trigger edges, and nested `Event` blocks from
//! owns-event edges. Edges whose endpoints no longer exist are dropped
//! silently; serialization has no failure mode.

use std::collections::HashMap;

use crate::graph::{
    EdgeKind, EntityData, EventData, Graph, Node, NodeData, RuleData, CLAUSE_DELIMITER,
};

const INDENT: &str = "    ";

/// Render a graph back into rule-spec text. An empty graph renders as an
/// empty string.
///
/// Entities come first, in graph order, each with its `State` block and its
/// owned events nested inside; rules follow, flat.
pub fn serialize(graph: &Graph) -> String {
    // Owning entity of each event, recovered from owns-event edges.
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for edge in &graph.edges {
        if edge.kind == EdgeKind::OwnsEvent
            && graph.node(&edge.source).is_some()
            && graph.node(&edge.target).is_some()
        {
            owners.insert(edge.target.as_str(), edge.source.as_str());
        }
    }

    let mut sections: Vec<String> = Vec::new();
    for node in &graph.nodes {
        if let NodeData::Entity(entity) = &node.data {
            sections.push(render_entity(graph, &owners, node, entity));
        }
    }
    for node in &graph.nodes {
        if let NodeData::Rule(rule) = &node.data {
            sections.push(render_rule(rule));
        }
    }

    sections.join("\n\n")
}

fn render_entity(
    graph: &Graph,
    owners: &HashMap<&str, &str>,
    node: &Node,
    entity: &EntityData,
) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push(format!("Entity {} {{", entity.label));

    out.push(format!("{INDENT}State {{"));
    for attribute in &entity.attributes {
        out.push(format!(
            "{INDENT}{INDENT}{}: {}",
            attribute.name, attribute.value
        ));
    }
    out.push(format!("{INDENT}}}"));

    for edge in graph.outgoing(&node.id, EdgeKind::OwnsEvent) {
        let Some(owned) = graph.node(&edge.target) else {
            continue;
        };
        let NodeData::Event(event) = &owned.data else {
            continue;
        };
        out.push(String::new());
        out.push(render_event(graph, owners, owned, event));
    }

    out.push("}".to_owned());
    out.join("\n")
}

fn render_event(
    graph: &Graph,
    owners: &HashMap<&str, &str>,
    node: &Node,
    event: &EventData,
) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push(format!("{INDENT}Event {} {{", event.label));

    if !event.requires.is_empty() {
        out.push(format!("{INDENT}{INDENT}Requires: {}", event.requires));
    }

    for edge in graph.outgoing(&node.id, EdgeKind::Target) {
        if let Some(target) = graph.node(&edge.target) {
            out.push(format!("{INDENT}{INDENT}Target: {}", target.label()));
        }
    }

    for edge in graph.incoming(&node.id, EdgeKind::Trigger) {
        if let Some(source) = graph.node(&edge.source) {
            out.push(format!(
                "{INDENT}{INDENT}Trigger: {}",
                trigger_reference(graph, owners, source)
            ));
        }
    }

    if !event.effect.is_empty() {
        out.push(format!("{INDENT}{INDENT}Effect: {}", event.effect));
    }

    for clause in flatten_clauses(&event.probability) {
        let wrapped = if clause.starts_with("P[") {
            clause
        } else {
            format!("P[{clause}]")
        };
        out.push(format!("{INDENT}{INDENT}{wrapped}"));
    }

    out.push(format!("{INDENT}}}"));
    out.join("\n")
}

/// The textual reference for a trigger source event: qualified
/// `Owner.Event` when the owning entity is known, bare label otherwise.
/// The qualified form survives a re-parse regardless of which entity the
/// source event belongs to.
fn trigger_reference(graph: &Graph, owners: &HashMap<&str, &str>, source: &Node) -> String {
    match owners
        .get(source.id.as_str())
        .and_then(|owner_id| graph.node(owner_id))
    {
        Some(owner) => format!("{}.{}", owner.label(), source.label()),
        None => source.label().to_owned(),
    }
}

fn render_rule(rule: &RuleData) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push(format!("Rule {} {{", rule.label));
    if !rule.when.is_empty() {
        out.push(format!("{INDENT}When: {}", rule.when));
    }
    if !rule.effect.is_empty() {
        out.push(format!("{INDENT}Effect: {}", rule.effect));
    }
    for formula in flatten_clauses(&rule.temporal) {
        out.push(format!("{INDENT}{formula}"));
    }
    out.push("}".to_owned());
    out.join("\n")
}

/// Expand clause entries that still carry the internal delimiter, trim,
/// and drop empties. Typed graphs keep one clause per entry, but a graph
/// edited through the flat field representation may not.
fn flatten_clauses(clauses: &[String]) -> Vec<String> {
    clauses
        .iter()
        .flat_map(|entry| entry.split(CLAUSE_DELIMITER))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect()
}
