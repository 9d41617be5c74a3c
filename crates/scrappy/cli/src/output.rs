//! Output formatting for playthrough reports.

use colored::*;
use scrappy_session::{Scorecard, SessionId};
use scrappy_types::{Idea, LedgerSnapshot, RoundRecord, SignalScale};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tables and coloured text
    #[default]
    Text,
    /// One JSON document
    Json,
}

/// Everything a playthrough produced.
#[derive(Debug, Serialize)]
pub struct PlaythroughReport {
    pub session: SessionId,
    pub seed: u64,
    pub idea: String,
    pub rounds: Vec<RoundRecord>,
    pub ledger: LedgerSnapshot,
    pub elapsed_days: u32,
    pub scorecard: Scorecard,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Assumption")]
    assumption: String,
    #[tabled(rename = "Experiment")]
    experiment: String,
    #[tabled(rename = "Cost")]
    cost: u32,
    #[tabled(rename = "Fit")]
    fit: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Result")]
    headline: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Why")]
    reason: String,
}

#[derive(Tabled)]
struct IdeaRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Assumptions")]
    assumptions: usize,
    #[tabled(rename = "Experiments")]
    experiments: usize,
}

pub fn print_ideas(ideas: &[Idea], format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            let rows: Vec<IdeaRow> = ideas
                .iter()
                .map(|i| IdeaRow {
                    id: i.id.to_string(),
                    title: i.title.clone(),
                    assumptions: i.assumptions.len(),
                    experiments: i.experiments.len(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Json => {
            let public: Vec<serde_json::Value> = ideas
                .iter()
                .map(|i| {
                    serde_json::json!({
                        "id": i.id,
                        "title": i.title,
                        "description": i.description,
                        "assumptions": i.assumptions.iter().map(|a| a.public_view()).collect::<Vec<_>>(),
                        "experiments": i.experiments,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&public)?);
        }
    }
    Ok(())
}

pub fn print_report(
    report: &PlaythroughReport,
    scale: SignalScale,
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print_text(report, scale),
    }
    Ok(())
}

fn signal_cell(record: &scrappy_types::ExperimentResult, scale: SignalScale) -> String {
    let label = record.signal.label(scale);
    match record.signal {
        scrappy_types::Signal::Strong => label.green().to_string(),
        scrappy_types::Signal::Weak => label.yellow().to_string(),
        scrappy_types::Signal::None => label.red().to_string(),
    }
}

fn print_text(report: &PlaythroughReport, scale: SignalScale) {
    println!(
        "{} {}  {}",
        "Idea:".bold(),
        report.idea,
        format!("(seed {})", report.seed).dimmed()
    );

    for round in report.rounds.iter().filter(|r| r.is_executed()) {
        let budget = report.ledger.round(round.index);
        println!();
        println!(
            "{} {}",
            format!("Round {}", round.index.0).bold(),
            format!(
                "spent {} tokens, {} days",
                round.committed_cost(),
                round.elapsed_days()
            )
            .dimmed()
        );
        if let Some(b) = budget {
            if b.carried_in > 0 {
                println!("  {}", format!("{} tokens carried in", b.carried_in).dimmed());
            }
        }
        if round.results.is_empty() {
            println!("  {}", "No experiments ran".dimmed());
            continue;
        }
        let rows: Vec<ResultRow> = round
            .results
            .iter()
            .map(|r| ResultRow {
                entry: r.entry_id.to_string(),
                assumption: r.assumption_id.to_string(),
                experiment: r.experiment_id.to_string(),
                cost: r.cost,
                fit: format!("{:.2}", r.fit),
                signal: signal_cell(r, scale),
                headline: r.snippet.headline.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    println!();
    println!(
        "{} {} of {} tokens committed, {} days elapsed",
        "Ledger:".bold(),
        report.ledger.committed,
        report.ledger.total_budget,
        report.elapsed_days
    );

    let rows: Vec<CategoryRow> = report
        .scorecard
        .categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            weight: format!("{:.2}", c.weight),
            score: if c.degenerate {
                format!("{:.1}*", c.score)
            } else {
                format!("{:.1}", c.score)
            },
            reason: c.reason.clone(),
        })
        .collect();
    println!();
    println!("{}", Table::new(rows));
    println!(
        "{} {}",
        "Total:".bold(),
        format!("{:.1} / 100", report.scorecard.total).cyan().bold()
    );
}
