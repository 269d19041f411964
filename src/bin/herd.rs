//! Herd Command Line Interface
//!
//! Classify purity, inspect the rule tables and print genealogy trees for
//! the seeded demo herd.
//!
//! # Usage
//!
//! ```bash
//! # Grade for a calf of a PO dam and an F1 sire
//! herd classify --mother PO --father F1
//!
//! # Rule table in evaluation order
//! herd rules --table progressive
//!
//! # Ancestors of an animal in the demo herd
//! herd genealogy BNN-0040 --max-level 3
//!
//! # Demo herd summary as JSON
//! herd -o json seed
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use boi_na_nuvem::genealogy::{build_genealogy_tree, GenealogyNode};
use boi_na_nuvem::models::Breed;
use boi_na_nuvem::purity::{PurityClassifier, PurityGrade, PurityTable};
use boi_na_nuvem::seed::{generate_herd, HerdSummary};
use boi_na_nuvem::HerdConfig;

#[derive(Parser)]
#[command(name = "herd")]
#[command(version)]
#[command(about = "Breed purity and genealogy tools for the Boi na Nuvem herd registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(long, short, global = true, env = "HERD_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the purity grade for a calf
    Classify {
        /// Dam's grade (omit when the dam has no birth record)
        #[arg(long)]
        mother: Option<PurityGrade>,

        /// Sire's grade (omit when the sire has no birth record)
        #[arg(long)]
        father: Option<PurityGrade>,

        #[arg(long)]
        mother_breed: Option<Breed>,

        #[arg(long)]
        father_breed: Option<Breed>,

        /// Rule table: canonical or progressive (defaults to configuration)
        #[arg(long)]
        table: Option<PurityTable>,
    },

    /// List purity rules in evaluation order
    Rules {
        #[arg(long)]
        table: Option<PurityTable>,
    },

    /// Print the ancestor tree of an animal in the demo herd
    Genealogy {
        /// Animal UUID or herd code
        animal: String,

        #[arg(long)]
        max_level: Option<u32>,
    },

    /// Generate the demo herd and summarize it
    Seed {
        /// Override the configured RNG seed
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = HerdConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Commands::Classify {
            mother,
            father,
            mother_breed,
            father_breed,
            table,
        } => {
            let table = table.unwrap_or(config.purity.table);
            let decision = PurityClassifier::new(table).classify(
                *mother,
                *father,
                *mother_breed,
                *father_breed,
            );
            match cli.format {
                OutputFormat::Json => print_json(&decision)?,
                OutputFormat::Text => println!(
                    "{} ({} {}: {})",
                    decision.grade, table, decision.rule_id, decision.rule
                ),
            }
        }

        Commands::Rules { table } => {
            let table = table.unwrap_or(config.purity.table);
            let rules = table.rules();
            match cli.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = rules
                        .iter()
                        .map(|r| {
                            serde_json::json!({
                                "id": r.id,
                                "description": r.description,
                                "result": r.result,
                            })
                        })
                        .collect();
                    print_json(&rows)?;
                }
                OutputFormat::Text => {
                    for rule in rules {
                        println!("{:<4} {:<28} -> {}", rule.id, rule.description, rule.result);
                    }
                }
            }
        }

        Commands::Genealogy { animal, max_level } => {
            let max_level = max_level.unwrap_or(config.genealogy.max_level);
            let store = generate_herd(&config.seed, config.purity.table)?;
            let subject = store
                .resolve_animal(animal)
                .ok_or_else(|| anyhow!("Animal not found: {}", animal))?;
            let tree = build_genealogy_tree(&store, subject.id, 0, max_level)
                .ok_or_else(|| anyhow!("Animal not found: {}", animal))?;

            match cli.format {
                OutputFormat::Json => print_json(&tree)?,
                OutputFormat::Text => print_tree(&tree, "", ""),
            }
        }

        Commands::Seed { rng_seed } => {
            let mut seed = config.seed.clone();
            if let Some(rng_seed) = rng_seed {
                seed.rng_seed = *rng_seed;
            }
            let store = generate_herd(&seed, config.purity.table)?;
            let summary = HerdSummary::of(&store);
            match cli.format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => {
                    println!(
                        "{} animals ({} female, {} male), seed {}",
                        summary.animals, summary.females, summary.males, seed.rng_seed
                    );
                    for (grade, count) in &summary.purity {
                        println!("  {:<3} {}", grade, count);
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

fn print_tree(node: &GenealogyNode, prefix: &str, role: &str) {
    let grade = node
        .birth
        .as_ref()
        .map(|b| format!("{} {}", b.breed, b.purity))
        .unwrap_or_else(|| "no birth record".to_string());
    println!("{}{}{} [{}]", prefix, role, node.code, grade);

    let child_prefix = format!("{}    ", prefix);
    if let Some(mother) = node.mother.as_deref() {
        print_tree(mother, &child_prefix, "dam: ");
    }
    if let Some(father) = node.father.as_deref() {
        print_tree(father, &child_prefix, "sire: ");
    }
}
