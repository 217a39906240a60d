use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub cloudinary_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://marquee.db?mode=rwc".to_string());

        let cloudinary_cloud_name =
            std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_else(|_| "".to_string());
        let cloudinary_api_key =
            std::env::var("CLOUDINARY_API_KEY").unwrap_or_else(|_| "".to_string());
        let cloudinary_api_secret =
            std::env::var("CLOUDINARY_API_SECRET").unwrap_or_else(|_| "".to_string());
        let cloudinary_base_url = std::env::var("CLOUDINARY_BASE_URL")
            .unwrap_or_else(|_| "https://api.cloudinary.com".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            cloudinary_cloud_name,
            cloudinary_api_key,
            cloudinary_api_secret,
            cloudinary_base_url,
        })
    }
}
