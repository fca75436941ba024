use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use a2ui_debugger::{
    config::Config, demo, input::parse_payload, inspect, ui, util, App, DebugSession,
    SurfaceProcessor,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

/// Time-travel debugger for A2UI message streams
#[derive(Parser, Debug)]
#[command(author, version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Data directory (default: ~/.a2ui-debugger)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    tui: TuiArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console (default)
    Tui(TuiArgs),
    /// Load a payload file and print the state inspector snapshot
    Replay {
        file: PathBuf,
        /// History index to jump to, -1 for the start (default: latest)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<isize>,
    },
    /// Serve the scripted demo stream
    ServeDemo {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct TuiArgs {
    /// SSE endpoint to connect to
    #[arg(long)]
    url: Option<String>,
    /// Connect to the stream on startup
    #[arg(long)]
    connect: bool,
    /// Start from a recorded payload file
    #[arg(long)]
    load: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    match cli.command {
        None => run_tui(cli.tui).await,
        Some(Command::Tui(args)) => run_tui(args).await,
        Some(Command::Replay { file, at }) => {
            init_stderr_logging();
            println!("{}", replay_file(&file, at)?);
            Ok(())
        }
        Some(Command::ServeDemo {
            host,
            port,
            interval_ms,
        }) => {
            init_stderr_logging();
            let mut config = Config::load()?.demo;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(ms) = interval_ms {
                config.interval = Duration::from_millis(ms.max(1));
            }
            demo::run_server(&config).await
        }
    }
}

async fn run_tui(args: TuiArgs) -> Result<()> {
    // The console owns the terminal, so logs go to ~/.a2ui-debugger/logs
    fs::create_dir_all(util::logs_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let mut config = Config::load()?;
    if let Some(url) = args.url {
        config = config.with_stream_url(url);
    }
    if args.connect {
        config = config.with_auto_connect(true);
    }

    let mut app = App::new(config);
    if let Some(path) = args.load {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if let Err(e) = app.load_history(&text) {
            bail!("Failed to load {}: {}", path.display(), e);
        }
    }

    ui::install_panic_hook();
    app.run().await
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn replay_file(path: &Path, at: Option<isize>) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = parse_payload(&text);
    if let Some(err) = parsed.error {
        bail!("{}: {}", path.display(), err);
    }

    let mut session = DebugSession::new(SurfaceProcessor::new());
    session.load_history(parsed.messages)?;
    if let Some(position) = at {
        if !session.jump_to(position)? {
            bail!(
                "Index {} is out of range for {} messages",
                position,
                session.len()
            );
        }
    }
    tracing::info!(cursor = %session.cursor(), len = session.len(), "Replayed payload file");

    Ok(inspect::snapshot_json(session.surfaces()))
}
