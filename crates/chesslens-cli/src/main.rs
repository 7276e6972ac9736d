use anyhow::Result;
use chesslens_core::LensError;
use chesslens_core::fen::Side;
use chesslens_core::filter::CategoryFilter;
use chesslens_core::navigation::Route;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "chesslens")]
#[command(about = "ChessLens CLI - turn board photos into positions and keep a library of them", long_about = None)]
struct Cli {
    /// API base URL (overrides config.toml and CHESSLENS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the credential
    Login {
        username: String,
        #[arg(long, env = "CHESSLENS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved credential
    Logout,
    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(long, env = "CHESSLENS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Predict the position in a board photo and save it when signed in
    Analyze {
        image: PathBuf,
        /// Print the analysis link instead of opening a browser
        #[arg(long)]
        no_browser: bool,
    },
    /// List saved boards
    Library {
        /// All, Uncategorized, or a category label such as Tactics
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
    },
    /// Show one saved board
    Show { id: String },
    /// Edit a saved board; all fields are sent together
    Edit {
        id: String,
        #[arg(long)]
        fen: Option<String>,
        /// Side to move: w or b
        #[arg(long)]
        turn: Option<Side>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a saved board
    Delete { id: String },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chesslens=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let app = app::App::init(cli.api_url)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&app, &username, &password).await?
        }
        Commands::Logout => commands::auth::logout(&app)?,
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&app, username, email, password).await?,
        Commands::Analyze { image, no_browser } => {
            commands::analyze::run(&app, &image, no_browser).await?
        }
        Commands::Library { category } => commands::library::list(&app, category).await?,
        Commands::Show { id } => commands::board::show(&app, &id.into()).await?,
        Commands::Edit {
            id,
            fen,
            turn,
            category,
            notes,
        } => {
            let changes = commands::board::Changes {
                fen,
                turn,
                category,
                notes,
            };
            commands::board::edit(&app, &id.into(), changes).await?
        }
        Commands::Delete { id } => commands::library::delete(&app, &id.into()).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(LensError::Unauthenticated) = err.downcast_ref::<LensError>() {
                eprintln!("{}", format!("Not signed in, redirecting to {}", Route::Login).yellow());
                eprintln!("Run `chesslens login <username>` first.");
            } else {
                eprintln!("{}", format!("Error: {err:#}").red());
            }
            ExitCode::FAILURE
        }
    }
}
