//! Block parser: `.spec` text -> typed graph.
//!
//! A hand-rolled recursive block parser over normalized lines. Blocks are
//! recognized by keyword prefix (`Entity`, `State`, `Event`, `Rule`) and
//! closed by a bare `}` line. The parser is deliberately permissive: it is
//! feeding a visual editor, not a compiler. Unrecognized lines are skipped,
//! an unterminated block stops cleanly at end-of-input, and unresolvable
//! cross-references simply produce no edge. `parse` never fails.

use crate::graph::{
    Attribute, Edge, EdgeKind, EntityData, EventData, Graph, IdAllocator, Node, NodeData, RuleData,
};
use crate::lines;
use crate::resolve::{self, SymbolTables};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Entity name used to qualify bare `Trigger:` references.
    pub default_entity: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_entity: "Player".to_owned(),
        }
    }
}

/// Parse a rule-spec document into a graph.
///
/// Nodes are minted in document encounter order. Owns-event edges are
/// emitted as each event block closes, rule-effect edges as each rule block
/// closes, and target/trigger edges in a resolution pass once every
/// declaration is known (forward references resolve; see [`resolve`]).
pub fn parse(text: &str, options: &ParseOptions) -> Graph {
    Parser::new(text, options).parse()
}

struct Parser<'a> {
    lines: Vec<String>,
    pos: usize,
    ids: IdAllocator,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    tables: SymbolTables,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(text: &str, options: &'a ParseOptions) -> Self {
        Parser {
            lines: lines::normalize(text),
            pos: 0,
            ids: IdAllocator::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            tables: SymbolTables::default(),
            options,
        }
    }

    fn parse(mut self) -> Graph {
        while self.pos < self.lines.len() {
            let line = self.current_line();
            if line.starts_with("Entity") {
                self.parse_entity(&line);
            } else if line.starts_with("Rule") {
                self.parse_rule(&line);
            } else {
                self.pos += 1;
            }
        }

        resolve::resolve_references(&self.nodes, &mut self.edges, &self.tables, self.options);

        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }

    /// Current line with any trailing `}` stripped.
    fn current_line(&self) -> String {
        lines::clean(&self.lines[self.pos]).to_owned()
    }

    /// True while inside a block: not at end-of-input and not on the
    /// closing `}` line. Running out of input ends the block scan cleanly.
    fn in_block(&self) -> bool {
        self.pos < self.lines.len() && self.lines[self.pos] != "}"
    }

    fn parse_entity(&mut self, header: &str) {
        let Some(name) = second_word(header) else {
            self.pos += 1;
            return;
        };

        let entity_id = self.ids.mint();
        self.tables.entities.insert(name.clone(), entity_id.clone());
        let entity_index = self.nodes.len();
        self.nodes.push(Node {
            id: entity_id.clone(),
            data: NodeData::Entity(EntityData {
                label: name.clone(),
                attributes: Vec::new(),
            }),
        });
        self.pos += 1;

        while self.in_block() {
            let inner = self.current_line();
            if inner.starts_with("State") {
                self.parse_state(entity_index);
            } else if inner.starts_with("Event") {
                self.parse_event(&inner, &entity_id, &name);
            } else {
                self.pos += 1;
            }
        }
        self.pos += 1; // entity closing }
    }

    fn parse_state(&mut self, entity_index: usize) {
        self.pos += 1; // State {
        while self.in_block() {
            let line = self.current_line();
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    if let NodeData::Entity(entity) = &mut self.nodes[entity_index].data {
                        entity.attributes.push(Attribute {
                            name: key.to_owned(),
                            value: value.trim().to_owned(),
                        });
                    }
                }
            }
            self.pos += 1;
        }
        self.pos += 1; // state closing }
    }

    fn parse_event(&mut self, header: &str, entity_id: &str, entity_label: &str) {
        let Some(name) = second_word(header) else {
            self.pos += 1;
            return;
        };

        let event_id = self.ids.mint();
        self.tables
            .events
            .insert(format!("{entity_label}.{name}"), event_id.clone());

        let mut data = EventData {
            label: name,
            entity: Some(entity_id.to_owned()),
            ..EventData::default()
        };

        self.pos += 1;
        while self.in_block() {
            let line = self.current_line();
            if let Some(rest) = line.strip_prefix("Target:") {
                data.target = rest.trim().to_owned();
            } else if let Some(rest) = line.strip_prefix("Requires:") {
                data.requires = rest.trim().to_owned();
            } else if let Some(rest) = line.strip_prefix("Effect:") {
                data.effect = rest.trim().to_owned();
            } else if let Some(rest) = line.strip_prefix("Trigger:") {
                data.trigger = rest.trim().to_owned();
            } else if line.starts_with("P[") {
                data.probability.push(line);
            }
            self.pos += 1;
        }
        self.pos += 1; // event closing }

        self.nodes.push(Node {
            id: event_id.clone(),
            data: NodeData::Event(data),
        });
        // Both endpoints are known here, so containment needs no second pass.
        self.edges.push(Edge {
            source: entity_id.to_owned(),
            target: event_id,
            kind: EdgeKind::OwnsEvent,
        });
    }

    fn parse_rule(&mut self, header: &str) {
        let Some(name) = second_word(header) else {
            self.pos += 1;
            return;
        };

        let rule_id = self.ids.mint();
        let mut data = RuleData {
            label: name,
            ..RuleData::default()
        };

        self.pos += 1;
        while self.in_block() {
            let line = self.current_line();
            if let Some(rest) = line.strip_prefix("When:") {
                data.when = rest.trim().to_owned();
            } else if let Some(rest) = line.strip_prefix("Effect:") {
                data.effect = rest.trim().to_owned();
            } else if is_temporal(&line) {
                data.temporal.push(line);
            }
            self.pos += 1;
        }
        self.pos += 1; // rule closing }

        // Link the rule to every entity declared so far whose label occurs
        // in the When: text. Entities declared after the rule are not yet
        // in the node list and stay unlinked. Plain substring containment,
        // so a label like "Go" also matches inside "Dragon"; the intended
        // granularity is still an open question upstream.
        let when = data.when.clone();
        self.nodes.push(Node {
            id: rule_id.clone(),
            data: NodeData::Rule(data),
        });
        if !when.is_empty() {
            let mut affected = Vec::new();
            for node in &self.nodes {
                if let NodeData::Entity(entity) = &node.data {
                    if when.contains(&entity.label) {
                        affected.push(node.id.clone());
                    }
                }
            }
            for entity_id in affected {
                self.edges.push(Edge {
                    source: rule_id.clone(),
                    target: entity_id,
                    kind: EdgeKind::RuleEffect,
                });
            }
        }
    }
}

/// Block name from a header line like `Entity Player {`.
fn second_word(line: &str) -> Option<String> {
    let word = line.split_whitespace().nth(1)?.trim_end_matches('{');
    if word.is_empty() {
        None
    } else {
        Some(word.to_owned())
    }
}

/// A rule body line holding a temporal/probabilistic formula rather than a
/// named field: `G(...)`, `F(...)`, `P[...]`, or an implication arrow.
fn is_temporal(line: &str) -> bool {
    line.starts_with("G(") || line.starts_with("F(") || line.starts_with("P[") || line.contains("->")
}
