//! specgraph-core: bidirectional transformation between rule-spec text
//! and the typed graph edited on the visual canvas.
//!
//! ```text
//! .spec text ──[lines]──[parser]──[resolve]──▶ Graph   (to the editor)
//! Graph      ──────────[serialize]──────────▶ .spec text
//! ```
//!
//! # Public API
//!
//! - [`parse()`] -- text to `{nodes, edges}` graph; permissive, never fails
//! - [`serialize()`] -- graph back to text; empty graph yields `""`
//! - [`Graph`], [`Node`], [`Edge`] -- the data model, whose serde form is
//!   the editor interchange JSON
//! - [`ParseOptions`] -- configuration, notably the default entity used to
//!   qualify bare `Trigger:` references
//!
//! The core is a pure transformation: synchronous, single-threaded, no I/O,
//! no state beyond one call. File transport, persistence, and layout belong
//! to the collaborators around it.

pub mod graph;
pub mod lines;
pub mod parser;
pub mod resolve;
pub mod serialize;

pub use graph::{
    join_clauses, split_clauses, Attribute, Edge, EdgeKind, EntityData, EventData, Graph,
    IdAllocator, Node, NodeData, RuleData, CLAUSE_DELIMITER,
};
pub use parser::{parse, ParseOptions};
pub use serialize::serialize;
