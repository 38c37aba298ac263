mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use output::{output_error, output_success};
use tracing_subscriber::EnvFilter;
use tracker_core::{AppConfig, ViewMode};

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TRACKER_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON responses.
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn run(ctx: &mut CliContext, command: Commands) -> anyhow::Result<serde_json::Value> {
    match command {
        Commands::Project(cmd) => handlers::project::handle(ctx, cmd.action),
        Commands::Task(cmd) => handlers::task::handle(ctx, cmd.action),
        Commands::Commit(cmd) => handlers::commit::handle(ctx, cmd.action),
        Commands::File(cmd) => handlers::file::handle(ctx, cmd.action),
        Commands::Show(args) => handlers::show::handle(ctx, args),
        Commands::Export(args) => handlers::export::handle_export(ctx, args).await,
        Commands::Import(args) => handlers::export::handle_import(ctx, args).await,
        Commands::Completions { .. } => anyhow::bail!("completions need no document"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "tracker", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let file_path = config.resolve_data_file(cli.file.as_deref(), cli.dev);
    let view = cli
        .view
        .map(ViewMode::from)
        .unwrap_or_else(|| config.effective_view());
    tracing::debug!("Using document {}", file_path.display());

    let mut ctx = match CliContext::open(&file_path, cli.reset, &config, view).await {
        Ok(ctx) => ctx,
        Err(e) => output_error(&e.to_string()),
    };

    let result = run(&mut ctx, cli.command).await;
    // Pending saves land before anything is reported.
    let finished = ctx.finish().await;

    match (result, finished) {
        (Ok(data), Ok(())) => output_success(data),
        (Err(e), _) | (Ok(_), Err(e)) => output_error(&e.to_string()),
    }
    Ok(())
}
