use callflow::config::{GenerationConfig, OpenRouterConfig};
use callflow::generation::OpenRouterTransport;
use callflow::prelude::*;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Settings file layout: both sections are optional.
#[derive(Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    generation: Option<GenerationConfig>,
    #[serde(default)]
    openrouter: Option<OpenRouterConfig>,
}

/// Design, validate and save telephony call flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a call flow from a natural-language description
    Generate {
        /// Description of the desired call flow
        query: String,
        /// Where to write the flow document
        #[arg(short, long, default_value = "flows/flow.json")]
        output: PathBuf,
        /// JSON settings file with `generation` and `openrouter` sections
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Model to request, overriding config and environment
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Check a saved flow document against the graph invariants
    Validate {
        /// Path to the flow JSON file
        path: PathBuf,
    },
    /// List the available verbs and their roles
    Verbs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            query,
            output,
            config,
            model,
        } => run_generate(&query, &output, config.as_deref(), model).await,
        Command::Validate { path } => run_validate(&path),
        Command::Verbs => run_verbs(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

async fn run_generate(query: &str, output: &Path, config_path: Option<&Path>, model: Option<String>) {
    let file_config = match config_path {
        Some(path) => load_config(path),
        None => FileConfig::default(),
    };

    let mut generation = file_config
        .generation
        .unwrap_or_else(GenerationConfig::from_env);
    if let Some(model) = model {
        generation.model = model;
    }
    let provider = file_config
        .openrouter
        .or_else(OpenRouterConfig::from_env)
        .unwrap_or_else(|| {
            exit_with_error("OPENROUTER_API_KEY is not set and no `openrouter` config was given.")
        });

    let generator = FlowGenerator::with_config(OpenRouterTransport::new(provider), generation);

    println!("Generating call flow...");
    let start = Instant::now();
    let flow = generator
        .generate(query)
        .await
        .unwrap_or_else(|e| exit_with_error(&describe_generation_error(&e)));
    println!(
        "Generated {} nodes and {} edges in {:?}",
        flow.node_count(),
        flow.edge_count(),
        start.elapsed()
    );
    println!("{}", ViolationFormatter::outline(&flow));

    save_flow(output, &flow);
    println!("Flow saved to '{}'", output.display());
}

fn run_validate(path: &Path) {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", path.display(), e))
    });
    let flow = FlowGraph::from_json_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)));

    println!("{}", ViolationFormatter::outline(&flow));
    match flow.validate() {
        Ok(()) => println!("\nFlow is valid."),
        Err(violations) => {
            println!("\nFlow has {} problem(s):", violations.len());
            println!("{}", ViolationFormatter::format_block(&violations));
            std::process::exit(2);
        }
    }
}

fn run_verbs() {
    println!("--- Available Verbs ---");
    for verb in Verb::ALL {
        let role = match verb.role() {
            Role::Entry => "entry",
            Role::Terminal => "terminal",
            Role::Branching => "branching",
        };
        println!("  {:<10} {:<14} {}", verb.as_str(), verb.display_name(), role);
    }
}

fn load_config(path: &Path) -> FileConfig {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read config '{}': {}", path.display(), e))
    });
    serde_json::from_str(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse config JSON: {}", e)))
}

/// Writes the canonical document, creating parent directories as needed.
fn save_flow(path: &Path, flow: &FlowGraph) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        });
    }
    fs::write(path, flow.to_json_pretty()).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
    });
}

fn describe_generation_error(error: &GenerationError) -> String {
    match error {
        GenerationError::Parse { raw, .. } | GenerationError::Document { raw, .. } => {
            format!("{}\n\nRaw content:\n{}", error, raw)
        }
        GenerationError::Schema { violations } => format!(
            "Generated flow is invalid:\n{}",
            ViolationFormatter::format_block(violations)
        ),
        other => other.to_string(),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
