use clap::Parser;
use recipe_finder::{
    catalog::Catalog,
    cli::{commands, Cli, Commands, FavoritesAction},
    config::Settings,
    favorites::JsonFileFavorites,
    search::QueryResolver,
    Result,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.log_safe());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;
    debug!("Settings: {:?}", settings);

    let catalog = Arc::new(Catalog::from_file(&settings.catalog.path)?);

    match cli.command {
        Commands::Search { query, local, json } => {
            if settings.generative.is_configured() {
                info!("Generative search enabled (model: {})", settings.generative.model);
            }
            let resolver = QueryResolver::new(catalog, settings.generative)?;
            commands::search(&resolver, &query, local, json).await?;
        }
        Commands::List => {
            commands::list(&catalog);
        }
        Commands::Show { id } => {
            commands::show(&catalog, &id)?;
        }
        Commands::Favorites { action } => {
            let mut store = JsonFileFavorites::load(&settings.favorites.path);
            match action {
                FavoritesAction::List => commands::list_favorites(&store),
                FavoritesAction::Add { id } => commands::add_favorite(&catalog, &mut store, &id)?,
                FavoritesAction::Remove { id } => commands::remove_favorite(&mut store, &id)?,
            }
        }
    }

    Ok(())
}
