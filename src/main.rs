// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Arbor CLI entrypoint.
//!
//! Builds the explore graph for a stored chat transcript and prints it as JSON.

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use arbor::explore::IngestOutcome;
use arbor::layout::LayoutDirection;
use arbor::model::GraphBatch;
use arbor::store::{load_transcript, write_graph_snapshot};
use arbor::ArborConfig;

#[derive(Debug, Parser)]
#[command(name = "arbor", version, about = "Branching conversation graphs for explore chats")]
struct Cli {
    /// JSON config file (layout and label settings).
    #[arg(long, global = true, env = "ARBOR_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the configured layout direction (TB, BT, LR, RL).
    #[arg(long, global = true)]
    direction: Option<LayoutDirection>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the whole graph from a transcript with one global layout pass.
    Hydrate(TranscriptArgs),
    /// Feed the transcript one message at a time, laying out each batch on its own.
    Replay(TranscriptArgs),
    /// Print the JSON Schema of the `{nodes, edges}` output.
    Schema,
}

#[derive(Debug, Args)]
struct TranscriptArgs {
    /// Chat export: `{ chat, messages }` or an array of message rows.
    transcript: PathBuf,

    /// Write the graph here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<ArborConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => ArborConfig::load(path)?,
        None => ArborConfig::default(),
    };
    if let Some(direction) = cli.direction {
        config.layout.direction = direction;
    }
    Ok(config)
}

fn emit(graph: &GraphBatch, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            write_graph_snapshot(path, graph)?;
            tracing::info!(?path, nodes = graph.nodes.len(), edges = graph.edges.len(), "wrote graph");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, graph)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Hydrate(args) => {
            let transcript = load_transcript(&args.transcript)?;
            let mut accumulator = config.accumulator();
            accumulator.hydrate(&transcript.messages);
            emit(accumulator.graph(), args.out.as_deref())
        }
        Command::Replay(args) => {
            let transcript = load_transcript(&args.transcript)?;
            let mut accumulator = config.accumulator();
            for message in &transcript.messages {
                if let IngestOutcome::Appended { nodes, edges } = accumulator.ingest(message) {
                    tracing::info!(message_id = %message.id(), nodes, edges, "appended");
                }
            }
            emit(accumulator.graph(), args.out.as_deref())
        }
        Command::Schema => {
            let schema = schemars::schema_for!(GraphBatch);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn main() {
    arbor::logging::init("warn");

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("arbor: {err}");
        std::process::exit(1);
    }
}
