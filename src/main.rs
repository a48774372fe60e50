mod cli;
mod menu;

use clap::Parser;
use colored::Colorize;
use inquire::Confirm;
use tracing_subscriber::EnvFilter;

use ghfaves::{
    config::Config,
    error::AppError,
    favorites::FavoritesStore,
    lookup::GithubLookup,
    render::{render_detail, TableRenderer},
    storage::{FileStorage, KeyValueStorage, MemoryStorage},
    validation::validate_input_username,
};

use crate::cli::{Cli, Commands};

/// Store wired with the configured backend and the GitHub API
pub type Store = FavoritesStore<Box<dyn KeyValueStorage>, GithubLookup>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config: Config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log_level);

    let storage: Box<dyn KeyValueStorage> = if cli.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage::new(config.storage_path()?))
    };
    let lookup = GithubLookup::new(config.lookup_config())?;

    let mut store: Store = FavoritesStore::open(storage, lookup);
    let mut renderer = TableRenderer::new(store.subscribe());

    match cli.command {
        Some(Commands::Add { username }) => add_favorite(&mut store, &mut renderer, &username).await,
        Some(Commands::Delete { login, yes }) => delete_favorite(&mut store, &mut renderer, &login, yes),
        Some(Commands::Show { login }) => show_favorite(&store, &login),
        Some(Commands::List) => list_favorites(&store, &mut renderer),
        None => menu::run_menu(&mut store, &mut renderer).await,
    }
}

/// Logs to stderr, filtered by `RUST_LOG` or the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Adds a user to favorites and redraws the table
pub async fn add_favorite(store: &mut Store, renderer: &mut TableRenderer, username: &str) -> Result<(), AppError> {
    validate_input_username(username)?;

    let added = store.add(username).await?;
    println!("{} {}", "added favorite:".green(), added.login);
    renderer.refresh_if_changed(store.entries());
    Ok(())
}

/// Removes a favorite after confirmation and redraws the table
///
/// # Arguments
/// * `skip_confirm` - Delete without asking first
pub fn delete_favorite(
    store: &mut Store,
    renderer: &mut TableRenderer,
    login: &str,
    skip_confirm: bool,
) -> Result<(), AppError> {
    match store.find(login) {
        Some(_) if !skip_confirm => {
            let confirmed: bool = Confirm::new(&format!("remove '{}' from favorites?", login))
                .with_default(false)
                .prompt()?;
            if !confirmed {
                println!("{}", "deletion cancelled".yellow());
                return Ok(());
            }
        }
        Some(_) => {}
        None => println!("{} {}", "not in favorites:".yellow(), login),
    }

    if store.delete_login(login)? > 0 {
        println!("{} {}", "deleted favorite:".green(), login);
    }
    renderer.refresh_if_changed(store.entries());
    Ok(())
}

/// Shows every stored field of one favorite
pub fn show_favorite(store: &Store, login: &str) -> Result<(), AppError> {
    let entry = store
        .find(login)
        .ok_or_else(|| AppError::Validation(format!("'{}' is not in favorites", login)))?;
    print!("{}", render_detail(entry));
    Ok(())
}

/// Lists all favorites as a table
pub fn list_favorites(store: &Store, renderer: &mut TableRenderer) -> Result<(), AppError> {
    renderer.render(store.entries());
    Ok(())
}
