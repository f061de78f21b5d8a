use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use wordle_sessions::{
    api,
    client::{GameClient, SyncClient},
    config::{ClientConfig, GameConfig},
    play,
    service::SessionService,
    store::SessionStore,
    words::WordLists,
};

#[derive(Parser)]
#[command(name = "wordle")]
#[command(about = "Multi-session Wordle server and polling display client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Default)]
struct ServerArgs {
    /// Config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the word-list files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Guesses allowed per game
    #[arg(long)]
    max_guesses: Option<u32>,
}

#[derive(clap::Args, Clone)]
struct ClientArgs {
    /// API base URL (default: $WORDLE_URL or http://127.0.0.1:8000/api/v1)
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "8000")]
        port: u16,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Play in the terminal, following a game on the server
    Play {
        /// Follow an existing game instead of starting one
        #[arg(short, long)]
        session: Option<Uuid>,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "500")]
        poll_ms: u64,

        /// Run the game in-process instead of talking to a server
        #[arg(long)]
        local: bool,

        #[command(flatten)]
        client: ClientArgs,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Print the state of a game
    State {
        #[arg(short, long)]
        session: Uuid,

        #[command(flatten)]
        client: ClientArgs,
    },
    /// Submit one guess to a game
    Guess {
        #[arg(short, long)]
        session: Uuid,

        word: String,

        #[command(flatten)]
        client: ClientArgs,
    },
}

/// Initialize tracing with output to stderr (interactive modes) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "wordle_sessions=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Interactive modes print the board on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Build the session service from config file, environment and flags.
fn build_service(args: &ServerArgs) -> anyhow::Result<SessionService> {
    let mut config = GameConfig::load(args.config.as_deref())?.with_env_overrides()?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(max) = args.max_guesses {
        config.max_guesses = max;
    }
    config.validate()?;

    let data_dir = config.data_dir()?;
    let words = WordLists::load(&data_dir, config.word_list_guess, config.word_list_ans)
        .with_context(|| format!("loading word lists from {}", data_dir.display()))?;

    let store = SessionStore::new(Arc::new(words), config.max_guesses)?;
    Ok(SessionService::new(store))
}

fn client_config(args: &ClientArgs) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.url {
        config.base_url = url.clone();
    }
    config
}

async fn serve(port: u16, args: &ServerArgs) -> anyhow::Result<()> {
    tracing::info!("Starting wordle server on port {}", port);

    let app = api::create_router(build_service(args)?);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Wordle server listening on http://127.0.0.1:{}/api/v1", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve { port, server }) => serve(port, &server).await?,
        Some(Commands::Play {
            session,
            poll_ms,
            local,
            client,
            server,
        }) => {
            let poll_interval = Duration::from_millis(poll_ms);
            let handle = if local {
                SyncClient::new(build_service(&server)?, poll_interval).spawn()
            } else {
                let api = GameClient::new(&client_config(&client))?;
                SyncClient::new(api, poll_interval).spawn()
            };

            match session {
                Some(id) => handle.attach(id).await?,
                None => handle.start().await?,
            }

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            play::run(handle, stdin).await?;
        }
        Some(Commands::State { session, client }) => {
            let api = GameClient::new(&client_config(&client))?;
            let state = api.get_game(session).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Some(Commands::Guess {
            session,
            word,
            client,
        }) => {
            let api = GameClient::new(&client_config(&client))?;
            let state = api.make_guess(session, &word).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        None => serve(8000, &ServerArgs::default()).await?,
    }

    Ok(())
}
