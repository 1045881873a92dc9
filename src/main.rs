use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cinefind::catalog::CatalogController;
use cinefind::config::Config;
use cinefind::images::ImageResolver;
use cinefind::tmdb::{CatalogApi, TmdbClient};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Smoke path for the whole stack: load the home catalog once and print it.
#[tokio::main]
async fn main() -> Result<()> {
    match dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    init_tracing();

    let config = Config::from_env()?;
    let images = ImageResolver::new(config.image_base.clone());
    let api: Arc<dyn CatalogApi> = Arc::new(TmdbClient::new(&config));

    let catalog = CatalogController::new(api);
    catalog.load().await;

    let snapshot = catalog.snapshot();
    if let Some(msg) = snapshot.phase.error() {
        anyhow::bail!("{msg}");
    }

    for movie in &snapshot.visible {
        println!(
            "{:>6}  {:<40}  {}  {}",
            movie.id,
            movie.title,
            movie.rating_display(),
            images.url_w500(movie.poster_path.as_deref())
        );
    }
    Ok(())
}
