//! taskmatch - resolve a free-text query against a task sheet.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use taskmatch::{
    build_index_from_csv, parse_steps, InstructionClient, PipelineError, Provider, SearchHit,
    TaskMatchConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskmatch")]
#[command(about = "Fuzzy task lookup and step-by-step instructions from a CSV task sheet")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the single best matching task
    Search {
        /// CSV sheet with Task, Description, Actions and Objects columns
        #[arg(long)]
        records: PathBuf,

        query: String,
    },
    /// Print up to `limit` matching tasks, best first
    Top {
        #[arg(long)]
        records: PathBuf,

        /// Defaults to the configured matcher limit
        #[arg(long)]
        limit: Option<usize>,

        query: String,
    },
    /// Match a task, then ask a provider for instructions and a duration estimate
    Instructions {
        #[arg(long)]
        records: PathBuf,

        /// groq, gemini, mistral, together or deepseek
        #[arg(long)]
        provider: Option<Provider>,

        /// Skip the whole-task duration estimate
        #[arg(long)]
        no_duration: bool,

        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = TaskMatchConfig::from_optional_file(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command {
        Commands::Search { records, query } => {
            let index = load_index(&records, &cfg)?;
            match index.search(&query).into_hit() {
                Some(hit) => print_hit(&hit),
                None => println!("No match found for {query:?}."),
            }
        }
        Commands::Top {
            records,
            limit,
            query,
        } => {
            let index = load_index(&records, &cfg)?;
            let limit = limit.unwrap_or(cfg.matcher.default_limit);
            let hits = index.search_top_k(&query, limit);
            if hits.is_empty() {
                println!("No match found for {query:?}.");
            }
            for hit in &hits {
                print_hit(hit);
            }
        }
        Commands::Instructions {
            records,
            provider,
            no_duration,
            query,
        } => {
            let index = load_index(&records, &cfg)?;
            let Some(hit) = index.search(&query).into_hit() else {
                println!("No match found for {query:?}.");
                return Ok(());
            };
            print_hit(&hit);

            let client = InstructionClient::new(cfg.instruct.clone())?;
            let provider = provider.unwrap_or(cfg.instruct.default_provider);
            let text = client
                .generate_instructions(Some(provider), &hit.record)
                .await
                .with_context(|| format!("Failed to generate instructions using {provider}"))?;

            println!();
            println!("Instructions ({}):", provider.display_name());
            for step in parse_steps(&text) {
                let duration = step.duration.as_deref().unwrap_or("-");
                let kind = step.instruction_type.as_deref().unwrap_or("-");
                println!("  {}. {} [{duration}] ({kind})", step.number, step.text);
            }

            if !no_duration {
                let estimate = client
                    .estimate_duration(&hit.record)
                    .await
                    .context("Failed to generate duration estimate")?;
                println!();
                println!("Estimated duration: {estimate}");
            }
        }
    }

    Ok(())
}

fn load_index(path: &Path, cfg: &TaskMatchConfig) -> anyhow::Result<taskmatch::MatchIndex> {
    build_index_from_csv(path, cfg).map_err(|err: PipelineError| {
        let what = if err.is_validation() {
            "task sheet rejected"
        } else {
            "could not load task sheet"
        };
        anyhow::Error::new(err).context(format!("{what}: {}", path.display()))
    })
}

fn print_hit(hit: &SearchHit) {
    println!(
        "#{:<4} {:<24} score {:.3}  {}",
        hit.index, hit.record.task, hit.score, hit.record.description
    );
    if !hit.record.actions.is_empty() {
        println!("      actions: {}", hit.record.actions);
    }
    if !hit.record.objects.is_empty() {
        println!("      objects: {}", hit.record.objects);
    }
}
