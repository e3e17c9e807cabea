//! CLI: Run a prompt-chain pipeline from a JSON definition.
//!
//! Runs against a local Ollama instance; `--analyze` prints the state
//! dependency report instead of executing.
//!
//! Usage: `run_chain [OPTIONS] <path-to-pipeline-json>`
//! Example: run_chain --set item="rusty dagger" pipelines/item_stats.json
//!
//! Set RUST_LOG=statweave=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use statweave::links::LinkRegistry;
use statweave::ollama::{DEFAULT_OLLAMA_URL, OllamaClient};
use statweave::service::CompletionService;
use statweave::types::ChainState;
use statweave::{ChainExecutor, analyze, pipeline_io};
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Run a prompt-chain pipeline from a JSON definition.
#[derive(Parser, Debug)]
#[command(name = "run_chain")]
#[command(
  after_help = r#"Environment variables (override flags when set):
  STATWEAVE_OLLAMA_URL  Base URL of the Ollama instance (default: http://localhost:11434).

Examples:
  run_chain --set item="rusty dagger" pipelines/item_stats.json
  run_chain --analyze pipelines/item_stats.json"#
)]
struct Args {
  /// Base URL of the Ollama instance. Overridden by STATWEAVE_OLLAMA_URL if set.
  #[arg(long, value_name = "URL", default_value = DEFAULT_OLLAMA_URL)]
  ollama_url: String,

  /// Initial state entry KEY=VALUE (repeatable).
  #[arg(long = "set", value_name = "KEY=VALUE")]
  set: Vec<String>,

  /// Write the final state to this path as JSON.
  #[arg(long, value_name = "PATH")]
  out: Option<PathBuf>,

  /// Print the state dependency report instead of running the pipeline.
  #[arg(long)]
  analyze: bool,

  /// Path to the pipeline JSON definition
  #[arg(value_name = "path-to-pipeline-json")]
  pipeline_path: PathBuf,
}

fn parse_set(pairs: &[String]) -> Result<ChainState, String> {
  let mut state = ChainState::new();
  for pair in pairs {
    let (key, value) = pair
      .split_once('=')
      .ok_or_else(|| format!("--set expects KEY=VALUE, got '{}'", pair))?;
    state.insert(key.to_string(), value.to_string());
  }
  Ok(state)
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .init();

  info!("run_chain starting");
  let args = Args::parse();

  let ollama_url = env::var("STATWEAVE_OLLAMA_URL")
    .ok()
    .unwrap_or_else(|| args.ollama_url.clone());
  info!(ollama_url = %ollama_url, pipeline = %args.pipeline_path.display(), "options (env or flags)");

  let def = match pipeline_io::load_definition(&args.pipeline_path) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Error reading {}: {}", args.pipeline_path.display(), e);
      process::exit(1);
    }
  };

  let registry = LinkRegistry::with_builtins();

  if args.analyze {
    let report = analyze(&def, &registry);
    println!("Pipeline: {} ({} steps)", def.name, def.steps.len());
    for (key, usage) in &report.keys {
      println!(
        "  {:<24} {:?}  read_by={:?} written_by={:?}",
        key, usage.role, usage.read_by, usage.written_by
      );
    }
    return;
  }

  let initial = match parse_set(&args.set) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  };

  let service: Option<Arc<dyn CompletionService>> = if def.has_llm_steps() {
    Some(Arc::new(OllamaClient::new(ollama_url)))
  } else {
    None
  };

  let executor = match ChainExecutor::from_definition(&def, service, &registry) {
    Ok(ex) => ex,
    Err(e) => {
      eprintln!("Pipeline error: {}", e);
      process::exit(1);
    }
  };

  let result = executor.run(initial).await;
  info!(links = ?result.completed_links, "pipeline completed");

  println!("Pipeline completed.");
  println!("  Completed links: {:?}", result.completed_links);
  let mut keys: Vec<&String> = result.state.keys().collect();
  keys.sort();
  println!("  Final state:");
  for key in keys {
    println!("    {} = {}", key, result.state[key]);
  }

  if let Some(out) = args.out {
    if let Err(e) = pipeline_io::save_state(&out, &result.state) {
      eprintln!("Error writing {}: {}", out.display(), e);
      process::exit(1);
    }
    println!("  State written to {}", out.display());
  }
}
