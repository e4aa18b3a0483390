use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_fetch::{display, FetchConfig, FetchTodoUseCase, ReqwestTransport};

/// Fetch one todo and print every state the observer sees.
#[derive(Debug, Parser)]
#[command(name = "fetch-todo", version)]
struct Args {
    /// TOML config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    base_url: Option<String>,

    /// Todo id to request.
    #[arg(long)]
    id: Option<i64>,

    /// Total request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Connection timeout in seconds.
    #[arg(long)]
    connect_timeout_secs: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn resolve_config(args: Args) -> anyhow::Result<FetchConfig> {
    let mut config = match &args.config {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(id) = args.id {
        config.todo_id = id;
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    if args.connect_timeout_secs.is_some() {
        config.connect_timeout_secs = args.connect_timeout_secs;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let config = resolve_config(Args::parse())?;

    let transport = ReqwestTransport::new(&config.transport())?;
    let use_case = Arc::new(FetchTodoUseCase::new(transport, config.endpoint()));
    tracing::info!(url = use_case.url(), "starting fetch");

    let mut rx = use_case.subscribe();
    println!("{}", display::render(&rx.borrow_and_update()));
    let observer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            println!("{}", display::render(&state));
            if !state.is_loading {
                break;
            }
        }
    });

    let result = use_case.spawn_fetch().await?;
    observer.await?;

    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}
