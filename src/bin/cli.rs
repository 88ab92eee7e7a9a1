//! Interviewer CLI
//!
//! Command-line client for the interviewer API:
//! - List, create, show and delete candidates
//! - Walk through the interview steps (consent, reflection, ratings, conclusion)
//! - Keep notes and export the evaluation report

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use interviewer::candidate::{
    format_timestamp, Candidate, CandidateSummary, Dimension, Rating, TextField,
};
use interviewer::client::{CandidateClient, ClientError, ExportFormat, DEFAULT_API_BASE};
use interviewer::config::generate_default_config;

#[derive(Parser)]
#[command(name = "interviewer-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Structured candidate interviews from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL
    #[arg(long, default_value = DEFAULT_API_BASE, global = true)]
    pub api_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NoteKind {
    General,
    Star,
    Vesier,
}

impl NoteKind {
    fn field(self) -> TextField {
        match self {
            NoteKind::General => TextField::Notes,
            NoteKind::Star => TextField::StarNotes,
            NoteKind::Vesier => TextField::VesierNotes,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all candidates
    List,

    /// Create a new candidate
    New,

    /// Show a candidate's interview record
    Show {
        /// Candidate id (BW-YYYY-NNNNN)
        id: String,
    },

    /// Record (or revoke) data processing consent
    Consent {
        id: String,
        /// Withdraw consent and clear the consent date
        #[arg(long)]
        revoke: bool,
    },

    /// Save the candidate's self-reflection
    Reflect {
        id: String,
        /// Reflection text
        text: String,
        /// Store as the interviewer's consistency assessment instead
        #[arg(long)]
        consistency: bool,
    },

    /// Rate one dimension on the 1-5 scale
    Rate {
        id: String,
        /// communication, teamwork, problem_solving, expertise, motivation, reliability, adaptability
        dimension: Dimension,
        /// 1 (poor) to 5 (excellent)
        score: i64,
    },

    /// Save the final conclusion
    Conclude { id: String, text: String },

    /// Save interviewer notes
    Note {
        id: String,
        text: String,
        /// Which notes field to write
        #[arg(short, long, value_enum, default_value_t = NoteKind::General)]
        kind: NoteKind,
    },

    /// Delete a candidate
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the evaluation report
    Export {
        id: String,
        /// Output file (default: <id>.pdf or <id>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export the HTML report instead of the PDF
        #[arg(long)]
        html: bool,
    },

    /// Check the API server
    Status,

    /// Generate default server config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = CandidateClient::new(&cli.api_url);

    match run(&cli, &client).await {
        Err(e) if is_connect_error(&e) => {
            eprintln!("Cannot connect to interviewer API at {}", client.base_url());
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Make sure the API server is running:");
            eprintln!("  cargo run --bin interviewer");
            std::process::exit(1);
        }
        other => other,
    }
}

async fn run(cli: &Cli, client: &CandidateClient) -> anyhow::Result<()> {
    match &cli.command {
        Commands::List => {
            let candidates = client.list().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&candidates)?),
                OutputFormat::Csv => write_csv(io::stdout().lock(), &candidates)?,
                OutputFormat::Table => print_table(&candidates),
            }
        }

        Commands::New => {
            let id = client.create().await?;
            if cli.format == OutputFormat::Json {
                println!("{}", json!({ "id": id }));
            } else {
                println!("Created candidate {}", id);
            }
        }

        Commands::Show { id } => {
            let candidate = client.get(id).await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&candidate)?);
            } else {
                print_candidate(&candidate);
            }
        }

        Commands::Consent { id, revoke } => {
            let body = if *revoke {
                json!({ "consented": false, "consent_date": null })
            } else {
                json!({ "consented": true, "consent_date": format_timestamp(&Utc::now()) })
            };
            client.update(id, &body).await?;
            println!(
                "Consent {} for {}",
                if *revoke { "revoked" } else { "recorded" },
                id
            );
        }

        Commands::Reflect {
            id,
            text,
            consistency,
        } => {
            let field = if *consistency {
                TextField::ReflectionConsistency
            } else {
                TextField::SelfReflection
            };
            save_text(client, id, field, text).await?;
        }

        Commands::Rate {
            id,
            dimension,
            score,
        } => {
            let rating = Rating::new(*score).map_err(|e| anyhow!(e))?;
            let completeness = client.rate(id, *dimension, rating).await?;
            println!("{}: {} = {}", id, dimension.label(), rating);
            println!("{}", completeness.message());
        }

        Commands::Conclude { id, text } => {
            save_text(client, id, TextField::Conclusion, text).await?;
        }

        Commands::Note { id, text, kind } => {
            save_text(client, id, kind.field(), text).await?;
        }

        Commands::Delete { id, yes } => {
            let prompt = format!("Delete candidate {}? This cannot be undone.", id);
            let confirmed = *yes || confirm(&mut io::stdin().lock(), &mut io::stderr(), &prompt)?;
            if !confirmed {
                println!("Aborted");
                return Ok(());
            }
            client.delete(id).await?;
            println!("Deleted {}", id);
        }

        Commands::Export { id, output, html } => {
            let format = if *html {
                ExportFormat::Html
            } else {
                ExportFormat::Pdf
            };
            let bytes = client.export(id, format).await?;
            let path = output
                .clone()
                .unwrap_or_else(|| default_export_path(id, format));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Exported {} ({} bytes) to {:?}", id, bytes.len(), path);
        }

        Commands::Status => {
            let status = client.status().await?;
            println!("Interviewer CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("API: {} ({})", client.base_url(), status);
        }

        Commands::Config { output } => {
            let config = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

async fn save_text(
    client: &CandidateClient,
    id: &str,
    field: TextField,
    text: &str,
) -> anyhow::Result<()> {
    let mut body = serde_json::Map::new();
    body.insert(field.name().to_string(), json!(text));
    client.update(id, &body.into()).await?;
    println!("Saved {} for {}", field.name(), id);
    Ok(())
}

/// Ask a yes/no question, defaulting to no
fn confirm(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn default_export_path(id: &str, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!("{}.{}", id, format.as_str()))
}

fn is_connect_error(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<ClientError>(), Some(ClientError::Http(e)) if e.is_connect())
}

fn print_table(candidates: &[CandidateSummary]) {
    if candidates.is_empty() {
        println!("No candidates yet.");
        println!();
        println!("Start an interview with:");
        println!("  interviewer-cli new");
        return;
    }

    println!("{:<16} {:<22} {}", "ID", "Created", "Consent");
    println!("{}", "-".repeat(48));
    for candidate in candidates {
        println!(
            "{:<16} {:<22} {}",
            candidate.id,
            format_timestamp(&candidate.created_at),
            if candidate.consented { "yes" } else { "no" }
        );
    }
}

fn write_csv(writer: impl Write, candidates: &[CandidateSummary]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "created_at", "consented"])?;
    for candidate in candidates {
        wtr.write_record([
            candidate.id.as_str(),
            &format_timestamp(&candidate.created_at),
            if candidate.consented { "true" } else { "false" },
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_candidate(candidate: &Candidate) {
    println!("Candidate {}", candidate.id);
    println!("  Created: {}", format_timestamp(&candidate.created_at));
    match (candidate.consented, &candidate.consent_date) {
        (true, Some(date)) => println!("  Consent: given {}", format_timestamp(date)),
        (true, None) => println!("  Consent: given"),
        (false, _) => println!("  Consent: not given"),
    }

    print_section("Self-reflection", &candidate.self_reflection);
    print_section("Consistency", &candidate.reflection_consistency);

    println!();
    println!("Ratings ({})", candidate.ratings.completeness().message());
    for dimension in Dimension::ALL {
        let value = candidate
            .ratings
            .get(dimension)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<24} {}", dimension.label(), value);
    }

    print_section("Conclusion", &candidate.conclusion);
    print_section("Notes", &candidate.notes);
    print_section("STAR notes", &candidate.star_notes);
    print_section("VeSiEr notes", &candidate.vesier_notes);
}

fn print_section(title: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for line in text.lines() {
        println!("  {}", line);
    }
}
