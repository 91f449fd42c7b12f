use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use dayflow::cli::{Cli, Commands, format_schedule, format_schedule_json};
use dayflow::config::Config;
use dayflow::editor::TaskEditor;
use dayflow::planner::{HttpPlannerClient, PlannerClient};
use dayflow::session::PlannerSession;

fn setup_logging(filter: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dayflow")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("dayflow.log");

    // File output keeps the TUI's alternate screen clean
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let client = HttpPlannerClient::from_config(&config.api).context("Failed to create planner client")?;
    info!("Planning service: {} ({:?})", client.endpoint(), client.contract());

    match &cli.command {
        None => {
            // Default: launch TUI mode
            dayflow::tui::run(config, Arc::new(client), TaskEditor::new()).await
        }
        Some(Commands::Plan { tasks, stdin, json }) => handle_plan_command(tasks, *stdin, *json, &client).await,
    }
}

async fn handle_plan_command(tasks: &[String], stdin: bool, json: bool, client: &dyn PlannerClient) -> Result<()> {
    let mut editor = TaskEditor::with_tasks(tasks);
    if stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read tasks from stdin")?;
        editor.add_lines(&input);
    }

    if editor.tasks().is_empty() {
        bail!("no tasks to schedule; pass tasks as arguments or use --stdin");
    }

    info!("Planning {} tasks", editor.tasks().len());
    if !json {
        println!("{} {} tasks...", "Optimizing:".cyan(), editor.tasks().len());
    }

    let mut session = PlannerSession::with_editor(editor);
    session.submit_with(client).await;

    if let Some(message) = session.error() {
        eprintln!("{}", message.red());
        bail!("schedule request failed");
    }

    let Some(schedule) = session.schedule() else {
        bail!("schedule request did not complete");
    };

    if json {
        println!("{}", format_schedule_json(schedule)?);
    } else {
        print!("{}", format_schedule(schedule));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, then layer command-line flags on top
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_overrides(&cli.api.to_overrides());

    setup_logging(&config.log_filter(cli.is_verbose())).context("Failed to setup logging")?;
    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
