use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Environment-provided configuration, read once at startup. The API key is
/// mandatory; both base URLs fall back to the public hosts so tests and
/// self-hosted mirrors can override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_key: String,
    pub image_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        if api_key.trim().is_empty() {
            anyhow::bail!("TMDB_API_KEY is empty");
        }
        Ok(Self {
            api_base: env_or("TMDB_API_BASE", DEFAULT_API_BASE),
            api_key,
            image_base: env_or("TMDB_IMAGE_BASE", DEFAULT_IMAGE_BASE),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
