use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::models::{CastMember, Genre, MovieDetail, MovieSummary, Paged, Video};

/// One method per remote operation. Controllers depend on this seam so tests
/// can substitute a scripted fake for the real client.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_popular(&self, page: u32) -> Result<Paged<MovieSummary>>;
    async fn fetch_top_rated(&self, page: u32) -> Result<Paged<MovieSummary>>;
    async fn fetch_now_playing(&self, page: u32) -> Result<Paged<MovieSummary>>;
    async fn fetch_by_genre(&self, genre_id: i32, page: u32) -> Result<Paged<MovieSummary>>;
    async fn search(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>>;
    async fn fetch_detail(&self, movie_id: i32) -> Result<MovieDetail>;
    async fn fetch_credits(&self, movie_id: i32) -> Result<Vec<CastMember>>;
    async fn fetch_videos(&self, movie_id: i32) -> Result<Vec<Video>>;
    async fn fetch_genres(&self) -> Result<Vec<Genre>>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&Config::from_env()?))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, op: &str, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("{op}: request failed"))?;
        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("{op}: unexpected status {status}"));
        }
        let text = res
            .text()
            .await
            .with_context(|| format!("{op}: reading body failed"))?;
        let parsed: T =
            serde_json::from_str(&text).with_context(|| format!("{op}: JSON parse failed"))?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn fetch_popular(&self, page: u32) -> Result<Paged<MovieSummary>> {
        let url = format!(
            "{}/movie/popular?api_key={}&page={}",
            self.base,
            self.api_key,
            page.max(1)
        );
        self.get_json("fetch popular", &url).await
    }

    async fn fetch_top_rated(&self, page: u32) -> Result<Paged<MovieSummary>> {
        let url = format!(
            "{}/movie/top_rated?api_key={}&page={}",
            self.base,
            self.api_key,
            page.max(1)
        );
        self.get_json("fetch top rated", &url).await
    }

    async fn fetch_now_playing(&self, page: u32) -> Result<Paged<MovieSummary>> {
        let url = format!(
            "{}/movie/now_playing?api_key={}&page={}",
            self.base,
            self.api_key,
            page.max(1)
        );
        self.get_json("fetch now playing", &url).await
    }

    async fn fetch_by_genre(&self, genre_id: i32, page: u32) -> Result<Paged<MovieSummary>> {
        let url = format!(
            "{}/discover/movie?api_key={}&with_genres={}&page={}",
            self.base,
            self.api_key,
            genre_id,
            page.max(1)
        );
        self.get_json("fetch by genre", &url).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Paged::empty());
        }
        let url = format!(
            "{}/search/movie?api_key={}&query={}&page={}",
            self.base,
            self.api_key,
            urlencoding::encode(query),
            page.max(1)
        );
        self.get_json("search movies", &url).await
    }

    async fn fetch_detail(&self, movie_id: i32) -> Result<MovieDetail> {
        let url = format!("{}/movie/{}?api_key={}", self.base, movie_id, self.api_key);
        self.get_json("fetch movie detail", &url).await
    }

    async fn fetch_credits(&self, movie_id: i32) -> Result<Vec<CastMember>> {
        let url = format!(
            "{}/movie/{}/credits?api_key={}",
            self.base, movie_id, self.api_key
        );
        let data: CreditsResponse = self.get_json("fetch credits", &url).await?;
        Ok(data.cast)
    }

    async fn fetch_videos(&self, movie_id: i32) -> Result<Vec<Video>> {
        let url = format!(
            "{}/movie/{}/videos?api_key={}",
            self.base, movie_id, self.api_key
        );
        let data: VideosResponse = self.get_json("fetch videos", &url).await?;
        Ok(data.results)
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        let url = format!("{}/genre/movie/list?api_key={}", self.base, self.api_key);
        let data: GenreListResponse = self.get_json("fetch genres", &url).await?;
        Ok(data.genres)
    }
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}
