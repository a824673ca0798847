//! Command-line front end for the research pipeline.
//!
//! Streams progress to the terminal as each article is processed, or
//! emits one JSON snapshot per line with `--json`.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use futures::StreamExt;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use research::{
    ArticleResult, ExtractorConfig, GoogleSearch, OpenAI, PipelineConfig, ProgressSnapshot,
    ResearchPipeline, ResearchRequest, RunStatus, Settings, WebExtractor,
};

#[derive(Parser)]
#[command(name = "research")]
#[command(about = "Research a topic: plan searches, read the top articles, summarize them")]
struct Cli {
    /// Topic to research (prompted for when omitted)
    topic: Option<String>,

    /// Maximum number of articles to process (1-10)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=10))]
    max_articles: u16,

    /// Print one JSON snapshot per line instead of the human view
    #[arg(long)]
    json: bool,

    /// Write the final articles to this file as JSON
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_env().context("Failed to load configuration")?;

    let topic = match cli.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_string(),
        _ => prompt_topic()?,
    };

    let ai = OpenAI::new(settings.model.api_key.clone())
        .with_base_url(settings.model.base_url.clone())
        .with_planner_model(settings.model.planner_model.clone())
        .with_summarizer_model(settings.model.summarizer_model.clone());
    let searcher = GoogleSearch::new(
        settings.search.api_key.clone(),
        settings.search.engine_id.clone(),
    )
    .with_base_url(settings.search.base_url.clone());
    let extractor =
        WebExtractor::new(ExtractorConfig::default()).context("Failed to build HTTP client")?;

    let config = PipelineConfig::default().with_max_articles(usize::from(cli.max_articles));
    let pipeline = ResearchPipeline::with_config(ai, searcher, extractor, config);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    tracing::info!(topic = %topic, max_articles = cli.max_articles, "Starting research");
    if !cli.json {
        println!("{} {}", "Researching:".bright_cyan().bold(), topic.bold());
        println!();
    }

    let mut run = pipeline.run_with_cancel(ResearchRequest::new(topic), cancel.clone());
    let mut last: Option<ProgressSnapshot> = None;

    while let Some(snapshot) = run.next().await {
        let snapshot = snapshot.context("Research failed")?;
        if cli.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            render_snapshot(&snapshot);
        }
        last = Some(snapshot);
    }

    if cancel.is_cancelled() {
        eprintln!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let Some(last) = last else {
        return Ok(());
    };

    if !cli.json && last.status == RunStatus::Completed {
        render_articles(&last.articles);
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&last.articles)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.json {
            println!(
                "{} {}",
                "Saved articles to".green(),
                path.display().to_string().bold()
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,research=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .init();
}

fn prompt_topic() -> Result<String> {
    let topic: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to research?")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Topic cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(topic.trim().to_string())
}

fn render_snapshot(snapshot: &ProgressSnapshot) {
    if let Some(plan) = &snapshot.plan {
        println!("{}", plan.thought.dimmed());
        for (i, query) in plan.queries.iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).dimmed(), query);
        }
        println!();
    }

    let elapsed = format!("{:.1}s", snapshot.duration.as_secs_f64()).dimmed();

    match snapshot.status {
        RunStatus::NoResults => {
            println!("{} {}", snapshot.status.to_string().red().bold(), elapsed);
        }
        RunStatus::Processed { .. } => {
            let latest = snapshot
                .articles
                .last()
                .map(|a| a.title().unwrap_or(a.url()).to_string())
                .unwrap_or_default();
            println!(
                "{} {} {} {} {}",
                format!("[{}]", snapshot.status).bright_blue(),
                format!("✓ {}", snapshot.successful_articles).green(),
                format!("✗ {}", snapshot.failed_articles).red(),
                elapsed,
                latest.dimmed()
            );
        }
        _ => {
            println!(
                "{} {} {}",
                snapshot.status.to_string().bright_blue().bold(),
                format!(
                    "({}/{} succeeded)",
                    snapshot.successful_articles, snapshot.total_articles
                )
                .dimmed(),
                elapsed
            );
        }
    }
}

fn render_articles(articles: &[ArticleResult]) {
    if articles.is_empty() {
        return;
    }

    println!();
    for (i, article) in articles.iter().enumerate() {
        let title = article.title().unwrap_or("(not extracted)");
        println!("{} {}", format!("{}.", i + 1).bright_cyan(), title.bold());
        println!("   {}", article.url().underline().dimmed());

        match (article.summary(), article.error()) {
            (Some(summary), _) => {
                for line in summary.lines().filter(|l| !l.trim().is_empty()) {
                    println!("   {}", line);
                }
            }
            (None, Some(error)) => println!("   {}", error.red()),
            (None, None) => {}
        }
        println!();
    }
}
