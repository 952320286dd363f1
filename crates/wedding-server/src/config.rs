use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port = var("WEDDING_PORT", "3000");
        let port: u16 = port
            .parse()
            .with_context(|| format!("WEDDING_PORT must be a port number, got '{}'", port))?;

        Ok(Self {
            db_path: var("WEDDING_DB_PATH", "wedding.db").into(),
            host: var("WEDDING_HOST", "0.0.0.0"),
            port,
            upload_dir: var("WEDDING_UPLOAD_DIR", "uploads").into(),
        })
    }
}
