use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use rxcheck::config::{default_config_path, load_config, save_config, RxCheckConfig};
use rxcheck::errors::{Result, RxCheckError};
use rxcheck::mcp::McpServer;
use rxcheck::report::*;
use rxcheck::service::RxCheck;
use rxcheck::types::*;

/// Deterministic drug-interaction checker.
#[derive(Parser)]
#[command(name = "rxcheck", version, about = "Deterministic drug-interaction checker")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check two or more drugs for interactions
    Check {
        /// Drug names, matched exactly
        #[arg(required = true, num_args = 2..)]
        drugs: Vec<String>,
        /// Output format (markdown or json)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Show the category of a drug and how it was determined
    Classify {
        /// Drug name
        drug: String,
    },
    /// List known drugs
    Drugs {
        /// Only drugs in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Predict side effects for a set of drugs
    SideEffects {
        /// Drug names, matched exactly
        #[arg(required = true)]
        drugs: Vec<String>,
        /// Age in years
        #[arg(long, default_value = "30")]
        age: u32,
        /// Body weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Height in centimetres
        #[arg(long)]
        height: Option<f64>,
        /// male, female or other
        #[arg(long)]
        sex: Option<String>,
        /// Medical condition (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
        /// Output format (markdown or json)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Show statistics about the loaded reference tables
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Write the loaded reference tables as a knowledge file
    Export {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Start the JSON-RPC tool server on stdio
    Serve,
}

fn main() {
    // stdout carries results and JSON-RPC traffic; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.or_else(default_config_path);

    if let Commands::Init { force } = cli.command {
        let path = config_path.ok_or_else(|| RxCheckError::Config {
            message: "no config directory on this platform; pass --config".to_string(),
        })?;
        if path.exists() && !force {
            return Err(RxCheckError::Config {
                message: format!(
                    "config already exists at '{}'; use --force to overwrite",
                    path.display()
                ),
            });
        }
        save_config(&path, &RxCheckConfig::default())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => RxCheckConfig::default(),
    };
    let rx = RxCheck::open(config)?;

    match cli.command {
        Commands::Check { drugs, format } => {
            let format = parse_format(format, &rx)?;
            let names: Vec<&str> = drugs.iter().map(String::as_str).collect();
            if names.len() == 2 {
                let verdict = rx.resolve(names[0], names[1])?;
                match format {
                    OutputFormat::Json => println!("{}", format_verdict_as_json(&verdict)),
                    OutputFormat::Markdown => print!("{}", format_verdict_as_markdown(&verdict)),
                }
            } else {
                let verdicts = rx.resolve_all(&names)?;
                match format {
                    OutputFormat::Json => println!("{}", format_verdicts_as_json(&verdicts)),
                    OutputFormat::Markdown => print!("{}", format_verdicts_as_markdown(&verdicts)),
                }
            }
        }
        Commands::Classify { drug } => {
            let c = rx.classify(&drug)?;
            println!("{}: {} (via {})", c.name, c.category, c.source.as_str());
            println!("  {}", c.description);
        }
        Commands::Drugs { category, search } => {
            let mut names = match category {
                Some(label) => {
                    let category = Category::from_str(&label).ok_or_else(|| {
                        RxCheckError::InvalidInput {
                            message: format!("unknown category: {}", label),
                        }
                    })?;
                    rx.drugs_in(category)?
                }
                None => rx.drug_names()?,
            };
            if let Some(term) = search {
                let matches = rx.search(&term)?;
                names.retain(|name| matches.contains(name));
            }
            print!("{}", format_drug_list(&names));
        }
        Commands::SideEffects {
            drugs,
            age,
            weight,
            height,
            sex,
            conditions,
            format,
        } => {
            let format = parse_format(format, &rx)?;
            let sex = match sex {
                Some(s) => Sex::from_str(&s).ok_or_else(|| RxCheckError::InvalidInput {
                    message: format!("unknown sex: {}", s),
                })?,
                None => Sex::default(),
            };
            let conditions = conditions
                .iter()
                .map(|c| {
                    MedicalCondition::from_str(c).ok_or_else(|| RxCheckError::InvalidInput {
                        message: format!("unknown condition: {}", c),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let profile = PatientProfile {
                age,
                sex,
                weight_kg: weight,
                height_cm: height,
                conditions,
            };
            let names: Vec<&str> = drugs.iter().map(String::as_str).collect();
            let effects = rx.predict_side_effects(&names, &profile)?;
            match format {
                OutputFormat::Json => println!("{}", format_side_effects_as_json(&effects)),
                OutputFormat::Markdown => print!("{}", format_side_effects_as_markdown(&effects)),
            }
        }
        Commands::Status { json } => {
            let stats = rx.stats()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).unwrap_or_default()
                );
            } else {
                println!("rxcheck status");
                println!("  Drugs:           {}", stats.drug_count);
                println!("  Records:         {}", stats.record_count);
                println!("  Keyword rules:   {}", stats.keyword_rule_count);
                println!("  High-risk pairs: {}", stats.high_risk_pairs);
                println!("  Moderate pairs:  {}", stats.moderate_risk_pairs);
                println!("  Detail records:  {}", stats.detail_records);
                println!("  Fingerprint:     {}", stats.fingerprint);
                println!(
                    "  Strict mode:     {}",
                    rx.config().strict_classification
                );
            }
        }
        Commands::Export { output } => {
            let json = rx.knowledge()?.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported knowledge file to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            let server = McpServer::new(rx);
            runtime.block_on(server.run())?;
        }
        // Handled before the service is opened.
        Commands::Init { .. } => {}
    }
    Ok(())
}

/// Parses an optional `--format` flag, falling back to the configured default.
fn parse_format(format: Option<String>, rx: &RxCheck) -> Result<OutputFormat> {
    match format {
        None => Ok(rx.config().output_format),
        Some(s) => OutputFormat::from_str(&s).ok_or_else(|| RxCheckError::InvalidInput {
            message: format!("unknown format: {}", s),
        }),
    }
}
