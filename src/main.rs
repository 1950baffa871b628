//! dl-eval CLI: evaluate description-logic expressions over an RDF knowledge base.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use dl_eval::config::EngineConfig;
use dl_eval::engine::Engine;

#[derive(Parser)]
#[command(name = "dl-eval", version, about = "Description-logic expression evaluator")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base namespace for names in expressions (overrides the source's default prefix).
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more expressions against a knowledge base.
    Eval {
        /// Path to an RDF file (Turtle, N-Triples, RDF/XML, ...).
        #[arg(long)]
        file: PathBuf,

        /// Expressions such as "male ⊓ ∃hasChild.female".
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse an expression and print its structure as JSON.
    Parse {
        expression: String,
    },

    /// Materialize a knowledge base and write all facts as N-Triples.
    Materialize {
        #[arg(long)]
        file: PathBuf,

        /// Output file (defaults to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show knowledge base statistics.
    Info {
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if cli.namespace.is_some() {
        config.namespace = cli.namespace.clone();
    }

    match cli.command {
        Commands::Eval {
            file,
            expressions,
            json,
        } => {
            let engine = open(&file, config)?;
            let mut results = serde_json::Map::new();
            for expression in &expressions {
                let matched = engine.evaluate(expression)?;
                if json {
                    results.insert(expression.clone(), serde_json::to_value(&matched).into_diagnostic()?);
                } else {
                    println!("{expression} ({}):", matched.len());
                    for individual in &matched {
                        println!("  {individual}");
                    }
                }
            }
            if json {
                let out = serde_json::to_string_pretty(&results).into_diagnostic()?;
                println!("{out}");
            }
        }

        Commands::Parse { expression } => {
            let parsed = dl_eval::expr::parse(&expression)?;
            let out = serde_json::to_string_pretty(&parsed).into_diagnostic()?;
            println!("{out}");
        }

        Commands::Materialize { file, output } => {
            let engine = open(&file, config)?;
            let written = match output {
                Some(path) => {
                    let out = std::fs::File::create(&path).into_diagnostic()?;
                    let written = engine
                        .export_ntriples(std::io::BufWriter::new(out))
                        .into_diagnostic()?;
                    eprintln!("Wrote {written} triples to {}", path.display());
                    written
                }
                None => engine
                    .export_ntriples(std::io::stdout().lock())
                    .into_diagnostic()?,
            };
            tracing::debug!(written, "export finished");
        }

        Commands::Info { file } => {
            let engine = open(&file, config)?;
            println!("{}", engine.info());
        }
    }

    Ok(())
}

/// The CLI always queries a materialized store.
fn open(file: &Path, config: EngineConfig) -> Result<Engine> {
    let config = EngineConfig {
        materialize_on_load: true,
        ..config
    };
    Ok(Engine::open(file, config)?)
}
