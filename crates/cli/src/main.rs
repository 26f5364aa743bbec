mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Rule-spec graph toolchain.
#[derive(Parser)]
#[command(name = "specgraph", version, about = "Rule-spec graph toolchain")]
struct Cli {
    /// Entity name used to qualify bare Trigger references
    #[arg(long, global = true, default_value = "Player")]
    default_entity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .spec file into editor graph JSON
    Parse {
        /// Path to the .spec source file
        file: PathBuf,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serialize a graph JSON file back into .spec text
    Emit {
        /// Path to the graph JSON file
        graph: PathBuf,
        /// Write the .spec text here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse then re-serialize a .spec file
    Roundtrip {
        /// Path to the .spec source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Parse { file, output } => {
            commands::cmd_parse(file, output.as_deref(), &cli.default_entity)
        }
        Commands::Emit { graph, output } => commands::cmd_emit(graph, output.as_deref()),
        Commands::Roundtrip { file } => commands::cmd_roundtrip(file, &cli.default_entity),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
