use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::{client::ClientOpts, prelude::*};

/// Loaded in order; variables already set are never overridden
const ENV_FILES: &[&str] = &[".env.local", ".env"];

#[derive(Debug, clap::Parser)]
#[command(version, author, about)]
struct Opts {
    /// Log filter, using env_logger-like syntax
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,

    #[command(flatten)]
    client: ClientOpts,
}

fn load_env() -> Result<Vec<PathBuf>> {
    ENV_FILES
        .iter()
        .filter_map(|name| match dotenvy::from_filename(name) {
            Ok(path) => Some(Ok(path)),
            Err(e) if e.not_found() => None,
            Err(e) => Some(Err(e).with_context(|| format!("Error loading {name}"))),
        })
        .collect()
}

fn init_logging(filter: &str) -> Result {
    let env_filter =
        EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter {filter:?}"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Error initializing logger")
}

pub fn main() {
    // Read before parsing so the files can supply options
    let env = load_env();
    let opts: Opts = clap::Parser::parse();

    if let Err(e) = init_logging(&opts.log_filter) {
        eprintln!("{e:?}");
        std::process::exit(1);
    }

    let res = env.and_then(|files| {
        for file in files {
            debug!(file = %file.display(), "Loaded environment");
        }

        tokio::runtime::Runtime::new()
            .context("Error starting async runtime")?
            .block_on(run(opts.client))
    });

    if let Err(e) = res {
        error!("{e:?}");
        std::process::exit(1);
    }
}

#[derive(Debug)]
enum Exit {
    Signal(&'static str),
    Disconnected(serenity::Result<()>),
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate()).context("Error hooking SIGTERM")?;

    tokio::select! {
        r = tokio::signal::ctrl_c() => r.map(|()| "SIGINT").context("Error waiting for SIGINT"),
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Error waiting for Ctrl-C")?;
    Ok("Ctrl-C")
}

#[instrument(level = "error", skip_all)]
async fn run(opts: ClientOpts) -> Result {
    let (mut client, bot) = crate::client::build(opts).await?;

    let exit = tokio::select! {
        s = wait_for_signal() => Exit::Signal(s?),
        r = client.start() => Exit::Disconnected(r),
    };

    let res = match exit {
        Exit::Signal(sig) => {
            warn!(signal = sig, "Shutting down");
            Ok(())
        },
        Exit::Disconnected(Ok(())) => Err(anyhow!("Gateway connection closed unexpectedly")),
        // The shards are already gone, leave the commands for the next run
        Exit::Disconnected(Err(e)) => return Err(e).context("Fatal client error"),
    };

    // Deleting commands needs the HTTP client, so do it before the shards close
    if let Err(e) = bot.unpublish().await {
        error!("{e:?}");
    }

    info!("Stopping shards");
    client.shard_manager.shutdown_all().await;
    info!("Shutdown complete");

    res
}
