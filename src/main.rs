//! djdb - browse and manage the DJ Databass directory from the terminal

mod commands;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use djdatabass::{ApiClient, AuthContext, ClientConfig, Paths};

/// DJ Databass command-line client
#[derive(Parser, Debug)]
#[command(name = "djdb")]
#[command(version)]
#[command(about = "Browse and manage the DJ Databass directory")]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, overriding settings.json
    #[arg(long, global = true, env = "DJDB_API_BASE_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List DJs, optionally filtered
    List(ListArgs),
    /// Ask the backend to search DJ names
    Search { term: String },
    /// List genres
    Genres,
    /// List the subgenres of a genre
    Subgenres { genre: String },
    /// List venues
    Venues,
    /// Manage your favourite DJs
    #[command(subcommand)]
    Fav(FavCommand),
    /// Show, add, update or delete a DJ
    #[command(subcommand)]
    Dj(DjCommand),
    /// Sign in
    Login(CredentialArgs),
    /// Create an account and sign in
    Signup(CredentialArgs),
    /// Sign out
    Logout,
    /// Show or update your profile
    Me {
        /// Change your username
        #[arg(long)]
        username: Option<String>,
        /// Upload a new profile picture
        #[arg(long, conflicts_with = "remove_picture")]
        picture: Option<PathBuf>,
        /// Remove your profile picture
        #[arg(long)]
        remove_picture: bool,
    },
    /// Change your password
    Password {
        #[arg(long, env = "DJDB_OLD_PASSWORD", hide_env_values = true)]
        old: String,
        #[arg(long, env = "DJDB_NEW_PASSWORD", hide_env_values = true)]
        new: String,
        #[arg(long, env = "DJDB_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive name substring
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    /// Subgenre; searches every genre when --genre is not given
    #[arg(long)]
    pub subgenre: Option<String>,
    #[arg(long)]
    pub venue: Option<String>,
    /// yes or no
    #[arg(long)]
    pub produces: Option<String>,
    /// List your favourites instead of the whole catalog
    #[arg(long)]
    pub favourites: bool,
}

#[derive(Subcommand, Debug)]
pub enum FavCommand {
    /// List your favourites
    List,
    /// Add a DJ to your favourites
    Add { id: i64 },
    /// Remove a DJ from your favourites
    Remove { id: i64 },
}

#[derive(ClapArgs, Debug, Default)]
pub struct DjFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Genre with its subgenres, e.g. "Techno:Acid,Minimal". Repeatable.
    #[arg(long = "genre")]
    pub genres: Vec<String>,
    /// Repeatable
    #[arg(long = "venue")]
    pub venues: Vec<String>,
    /// yes or no
    #[arg(long)]
    pub produces: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DjCommand {
    /// Show one DJ
    Show { id: i64 },
    /// Add a DJ
    Add(DjFields),
    /// Update a DJ; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: DjFields,
    },
    /// Delete a DJ
    Delete { id: i64 },
    /// Upload a profile picture
    UploadPicture { id: i64, file: PathBuf },
    /// Remove the profile picture
    DeletePicture { id: i64 },
}

#[derive(ClapArgs, Debug)]
pub struct CredentialArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "DJDB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };

    // keep the HTTP stack quiet unless asked
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let paths = Paths::init(args.config)?;
    tracing::debug!("Config directory: {:?}", paths.config_dir());

    let mut config = ClientConfig::load()?;
    if let Some(url) = args.api_url {
        config = config.with_api_url(url);
    }

    let auth = Arc::new(
        AuthContext::load(paths.session_path()).context("Failed to load saved session")?,
    );
    let api = Arc::new(ApiClient::new(&config, auth.clone())?);
    tracing::debug!("Using backend {}", api.base_url());

    let app = commands::App { api, auth };

    match args.command {
        Command::List(list) => app.list(list).await,
        Command::Search { term } => app.search(&term).await,
        Command::Genres => app.genres().await,
        Command::Subgenres { genre } => app.subgenres(&genre).await,
        Command::Venues => app.venues().await,
        Command::Fav(fav) => app.fav(fav).await,
        Command::Dj(dj) => app.dj(dj).await,
        Command::Login(creds) => app.login(creds, false).await,
        Command::Signup(creds) => app.login(creds, true).await,
        Command::Logout => app.logout().await,
        Command::Me {
            username,
            picture,
            remove_picture,
        } => app.me(username, picture, remove_picture).await,
        Command::Password { old, new, confirm } => app.password(&old, &new, &confirm).await,
    }
}
