//! elastop - live terminal dashboard for Elasticsearch clusters.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use elastop::client::{EsClient, FetchError, GithubReleases, ReleaseLookup, VersionCache};
use elastop::config::{Config, ConnectOptions};
use elastop::dashboard::Dashboard;
use elastop::tui::App;

/// Live terminal dashboard for Elasticsearch clusters.
#[derive(Parser)]
#[command(name = "elastop", about = "Live terminal dashboard for Elasticsearch", version)]
struct Args {
    /// Elasticsearch host, including scheme.
    #[arg(long, default_value = "http://localhost")]
    host: String,

    /// Elasticsearch port.
    #[arg(long, default_value = "9200")]
    port: u16,

    /// Username for basic authentication.
    #[arg(long, env = "ES_USER")]
    user: Option<String>,

    /// Password for basic authentication.
    #[arg(long, env = "ES_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// API key, used instead of username/password.
    #[arg(long, env = "ES_API_KEY", hide_env_values = true)]
    apikey: Option<String>,

    /// Connect without authentication.
    #[arg(long)]
    authless: bool,

    /// Refresh interval in seconds.
    #[arg(short, long, default_value = "5")]
    interval: u64,

    /// Forget indices absent from this many consecutive refreshes.
    /// By default indices are tracked for the life of the process.
    #[arg(long, value_name = "CYCLES")]
    evict_after: Option<u64>,

    /// Write logs to this file. Logging is disabled otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Installs a file-backed tracing subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(path: &Path, verbose: u8) -> std::io::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("elastop={}", level)));
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Stands in when the release client cannot be built; the version column
/// then shows every node as unknown.
struct NoReleases;

impl ReleaseLookup for NoReleases {
    fn latest_release(&self) -> Result<String, FetchError> {
        Err(FetchError::Transport("release lookup unavailable".to_string()))
    }
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: cannot open log file {}: {}", path.display(), e);
        process::exit(1);
    }

    let connect = ConnectOptions {
        host: args.host,
        port: args.port,
        user: args.user,
        password: args.password,
        api_key: args.apikey,
        authless: args.authless,
    };
    let config = match Config::new(
        &connect,
        Duration::from_secs(args.interval),
        args.evict_after,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!(
        base_url = %config.base_url,
        auth = ?config.auth,
        interval_secs = config.interval.as_secs(),
        eviction = ?config.eviction,
        "starting"
    );

    let client = match EsClient::new(config.base_url.clone(), config.auth.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let releases: Box<dyn ReleaseLookup> = match GithubReleases::new() {
        Ok(lookup) => Box::new(lookup),
        Err(e) => {
            warn!(error = %e, "release lookup disabled");
            Box::new(NoReleases)
        }
    };

    let dashboard = Dashboard::new(config.eviction, VersionCache::new(releases));
    if let Err(e) = App::new(dashboard, Box::new(client)).run(config.interval) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    info!("stopped");
}
