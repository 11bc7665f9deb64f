//! CLI entrypoint for Stamp Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use stamp_application::{ActivitySink, CompositeActivitySink, EnginePorts, ModerationEngine};
use stamp_domain::{StampState, SubjectId, SubjectRef};
use stamp_infrastructure::{
    ChannelTaskQueue, ConfigLoader, FileConfig, InMemoryActivitySink, InMemoryNotificationSink,
    InMemorySubjectStore, JsonlActivityLog, Scenario, Severity, TaskWorker, WorkerReport,
};
use stamp_presentation::{
    Cli, Command, ConsoleFormatter, FailureLine, JsonFormatter, OutputFormat, OutputFormatter,
    RunReport, TaskLine, TaskResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        show_config(&cli);
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        bail!("A command is required. Run with --help for usage.");
    };

    info!("Starting Stamp Quorum");

    // === Configuration ===
    let file_config = load_config(&cli)?;
    let config = file_config
        .engine_config()
        .context("Invalid engine configuration")?;
    info!("Conclusion policy: {}", config.policy);

    // === Dependency Injection ===
    let scenario = Scenario::load(command.scenario())?;
    let stores = scenario.seed().await?;
    let notifications = Arc::new(InMemoryNotificationSink::new());
    let feed = Arc::new(InMemoryActivitySink::new());
    let activities = activity_sink(&file_config, feed.clone())?;
    let (queue, task_rx) = ChannelTaskQueue::new();

    let ports = EnginePorts {
        votes: stores.votes.clone(),
        subjects: stores.subjects.clone(),
        notifications: notifications.clone(),
        activities,
        tasks: Arc::new(queue),
    };
    let engine = ModerationEngine::new(ports, config);
    let mut worker = TaskWorker::new(task_rx, engine.task_handler());

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let mut report = match command {
        Command::Evaluate { subject, .. } => {
            let evaluation = engine.evaluate(subject).await?;
            println!(
                "{}",
                formatter.format_evaluation(&evaluation, &engine.config().policy)
            );
            return Ok(());
        }
        Command::Conclude { subjects, .. } => {
            let ids = if subjects.is_empty() {
                in_progress(&stores.subjects).await
            } else {
                subjects
            };
            conclude_all(&engine, &ids).await
        }
        Command::Sweep { now, .. } => sweep(&engine, now.unwrap_or_else(Utc::now)).await?,
    };

    report.tasks = task_lines(worker.drain().await);
    report.subjects = stores.subjects.all().await;
    report.notifications = notifications.notifications().await;
    report.activities = feed.activities().await;

    println!("{}", formatter.format_report(&report));

    let failed = report.failures.len()
        + report
            .tasks
            .iter()
            .filter(|t| matches!(t.result, TaskResult::Failed { .. }))
            .count();
    if failed > 0 {
        bail!("{} stamp(s) could not be concluded", failed);
    }

    Ok(())
}

/// Console logs on stderr by verbosity, plus an optional daily log file
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<()> {
    // Initialize logging based on verbosity level
    let filter = || match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "stamp-quorum.log");
        fmt::layer()
            .with_ansi(false)
            .with_writer(appender)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_without_files()?
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    Ok(config)
}

fn show_config(cli: &Cli) {
    ConfigLoader::print_config_sources(cli.config.as_ref());
    println!();

    match load_config(cli) {
        Ok(config) => {
            let issues = config.validate();
            if issues.is_empty() {
                println!("Configuration OK");
            }
            for issue in issues {
                println!(
                    "{}",
                    ConsoleFormatter::format_issue(
                        issue.severity == Severity::Error,
                        issue.field,
                        &issue.message
                    )
                );
            }
        }
        Err(e) => println!("{}", ConsoleFormatter::format_issue(true, "config", &e.to_string())),
    }
}

/// In-memory feed, plus the JSONL audit log when one is configured
fn activity_sink(
    config: &FileConfig,
    feed: Arc<InMemoryActivitySink>,
) -> Result<Arc<dyn ActivitySink>> {
    let Some(path) = &config.engine.activity_log else {
        return Ok(feed);
    };
    let Some(log) = JsonlActivityLog::new(path) else {
        bail!("Could not open activity log {}", path.display());
    };
    info!("Recording activities to {}", log.path().display());
    let delegates: Vec<Arc<dyn ActivitySink>> = vec![feed, Arc::new(log)];
    Ok(Arc::new(CompositeActivitySink::new(delegates)))
}

async fn in_progress(subjects: &InMemorySubjectStore) -> Vec<SubjectId> {
    subjects
        .all()
        .await
        .into_iter()
        .filter(|s| s.state == StampState::InProgress)
        .map(|s| s.id)
        .collect()
}

async fn conclude_all(engine: &ModerationEngine, ids: &[SubjectId]) -> RunReport {
    let mut report = RunReport::default();
    for id in ids {
        match engine.conclude(*id).await {
            Ok(output) => report.evaluations.push(output.evaluation),
            Err(e) => report.failures.push(FailureLine {
                subject: SubjectRef::stamp(*id),
                error: e.to_string(),
            }),
        }
    }
    report
}

async fn sweep(engine: &ModerationEngine, now: DateTime<Utc>) -> Result<RunReport> {
    let result = engine.sweep(now).await.context("Sweep is unavailable")?;
    Ok(RunReport {
        sweep_cutoff: Some(result.cutoff),
        evaluations: result.concluded.iter().map(|c| c.evaluation).collect(),
        failures: result
            .failed
            .iter()
            .map(|(subject, e)| FailureLine {
                subject: *subject,
                error: e.to_string(),
            })
            .collect(),
        ..Default::default()
    })
}

fn task_lines(worker: WorkerReport) -> Vec<TaskLine> {
    let applied = worker.applied.into_iter().map(|(task, state)| TaskLine {
        task,
        result: TaskResult::Applied { state },
    });
    let skipped = worker.skipped.into_iter().map(|(task, violation)| TaskLine {
        task,
        result: TaskResult::Skipped {
            reason: violation.to_string(),
        },
    });
    let failed = worker.failed.into_iter().map(|(task, e)| TaskLine {
        task,
        result: TaskResult::Failed {
            error: e.to_string(),
        },
    });
    applied.chain(skipped).chain(failed).collect()
}
