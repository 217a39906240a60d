use std::{sync::Arc, time::Duration};

use marquee::{AppState, app, config::Config, db, media::MediaClient, store::MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,marquee=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("marquee/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let media = MediaClient::new(
        http,
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
        config.cloudinary_base_url.clone(),
    );

    let app = app(AppState { store, media: Arc::new(media) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
