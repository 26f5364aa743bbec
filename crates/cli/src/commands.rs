use std::fs;
use std::path::Path;

use specgraph_core::{parse, serialize, Graph, ParseOptions};

use crate::error::CliError;

fn options(default_entity: &str) -> ParseOptions {
    ParseOptions {
        default_entity: default_entity.to_owned(),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::read(path, e))
}

fn write_out(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, content).map_err(|e| CliError::write(path, e)),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Parse a `.spec` file into pretty-printed interchange graph JSON.
pub(crate) fn cmd_parse(
    file: &Path,
    output: Option<&Path>,
    default_entity: &str,
) -> Result<(), CliError> {
    let text = read(file)?;
    let graph = parse(&text, &options(default_entity));
    let json = serde_json::to_string_pretty(&graph)?;
    write_out(output, &json)
}

/// Serialize an interchange graph JSON file back into `.spec` text.
pub(crate) fn cmd_emit(graph_file: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let json = read(graph_file)?;
    let graph: Graph = serde_json::from_str(&json)?;
    write_out(output, &serialize(&graph))
}

/// Parse then re-serialize a `.spec` file, printing the regenerated
/// document. Useful for checking what survives the graph representation.
pub(crate) fn cmd_roundtrip(file: &Path, default_entity: &str) -> Result<(), CliError> {
    let text = read(file)?;
    let graph = parse(&text, &options(default_entity));
    println!("{}", serialize(&graph));
    Ok(())
}
