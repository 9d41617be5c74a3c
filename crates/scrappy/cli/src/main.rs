//! Scrappy Experiments CLI - scripted playthroughs of the experiment game
//!
//! Loads an idea catalog and a simulation config, lets a scripted learner
//! rank, schedule and execute every round, then prints the results and the
//! scorecard.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scrappy_outcome::FitEvaluator;
use scrappy_session::{EmptyRoundPolicy, ScoringSpec, Session, SessionError};
use scrappy_types::{AssumptionId, Catalog, IdeaId};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod output;
mod strategy;

use output::{OutputFormat, PlaythroughReport};
use strategy::Strategy;

/// Scrappy Experiments CLI
#[derive(Parser)]
#[command(name = "scrappy")]
#[command(about = "Scrappy Experiments - outcome simulation and scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Idea catalog (JSON)
    #[arg(long, env = "SCRAPPY_CATALOG", default_value = "data/thermaloop.json")]
    catalog: String,

    /// Simulation configuration file (TOML)
    #[arg(short, long, env = "SCRAPPY_CONFIG")]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Log level
    #[arg(long, env = "SCRAPPY_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "SCRAPPY_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// List the ideas in the catalog
    Ideas,

    /// Play every round with a scripted learner and score the result
    Play {
        /// Idea id (defaults to the first idea in the catalog)
        #[arg(short, long)]
        idea: Option<String>,

        /// Seed override
        #[arg(short, long)]
        seed: Option<u64>,

        /// How the scripted learner picks experiments
        #[arg(long, value_enum, default_value = "best-fit")]
        strategy: Strategy,

        /// Risk ranking, riskiest first (comma separated assumption ids)
        #[arg(long, value_delimiter = ',')]
        ranking: Vec<String>,

        /// Record learner verdicts and grade them
        #[arg(long)]
        grade_statuses: bool,
    },
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_catalog(path: &str) -> Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path))?;
    Catalog::from_json_str(&json).with_context(|| format!("loading catalog {}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let catalog = load_catalog(&cli.catalog)?;

    match &cli.command {
        Commands::Ideas => {
            output::print_ideas(catalog.ideas(), cli.output)?;
        }
        Commands::Play {
            idea,
            seed,
            strategy,
            ranking,
            grade_statuses,
        } => {
            let mut config = config::load(cli.config.as_deref()).context("loading configuration")?;
            if let Some(seed) = seed {
                config.seed = Some(*seed);
            }
            if *grade_statuses {
                config.scoring = ScoringSpec::with_status_alignment();
            }

            let idea_id = match idea {
                Some(id) => IdeaId::new(id.as_str()),
                None => match catalog.ideas().first() {
                    Some(first) => first.id.clone(),
                    None => bail!("catalog has no ideas"),
                },
            };

            let mut session = Session::from_catalog(&catalog, &idea_id, config)?;
            if !ranking.is_empty() {
                session.submit_ranking(ranking.iter().map(AssumptionId::new).collect())?;
            }

            play(&mut session, *strategy, *grade_statuses)?;

            let report = PlaythroughReport {
                session: session.id(),
                seed: session.seed(),
                idea: session.idea().title.clone(),
                rounds: session.rounds().to_vec(),
                ledger: session.ledger(),
                elapsed_days: session.elapsed_days(),
                scorecard: session.score(),
            };
            output::print_report(&report, session.config().signal_scale, cli.output)?;
        }
    }

    Ok(())
}

fn play(session: &mut Session, strategy: Strategy, grade_statuses: bool) -> Result<()> {
    let fit = FitEvaluator::new(session.config().fit.clone())?;

    while let Some(round) = session.current_round() {
        let planned = strategy::plan_round(session, round, strategy, &fit)?;
        if planned == 0 && session.config().empty_round == EmptyRoundPolicy::Reject {
            warn!(round = %round, "Nothing affordable to schedule, stopping early");
            break;
        }

        match session.execute_round(round) {
            Ok(results) => info!(round = %round, results = results.len(), "Round played"),
            Err(SessionError::InvalidTransition(reason)) => {
                warn!(round = %round, %reason, "Round could not execute, stopping early");
                break;
            }
            Err(other) => return Err(other.into()),
        }

        if grade_statuses {
            strategy::assess_round(session, round)?;
        }
    }
    Ok(())
}
