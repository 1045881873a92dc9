use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::{Genre, MovieSummary};
use crate::tmdb::CatalogApi;
use crate::view::Phase;

const LOAD_FAILED: &str = "Failed to fetch movies";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending popularity score.
    #[default]
    Popularity,
    /// Most recent first; movies without a parseable date sort as earliest.
    ReleaseDate,
    /// Descending rating.
    VoteAverage,
    /// Ascending, case-insensitive.
    Title,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub phase: Phase,
    pub genres: Vec<Genre>,
    /// The raw list with the current filter and sort applied.
    pub visible: Vec<MovieSummary>,
    pub genre_filter: Option<i32>,
    pub sort_key: SortKey,
}

/// Holds the home collection: one initial fetch of the popular page plus the
/// genre taxonomy, then client-side re-derivation only. Filter and sort never
/// touch the network.
pub struct CatalogController {
    api: Arc<dyn CatalogApi>,
    // Fetch-order list the derivation starts from on every change.
    movies: Mutex<Vec<MovieSummary>>,
    tx: watch::Sender<CatalogSnapshot>,
}

impl CatalogController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (tx, _) = watch::channel(CatalogSnapshot::default());
        Self {
            api,
            movies: Mutex::new(Vec::new()),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.tx.borrow().clone()
    }

    /// Initial (and only) fetch: popular page 1 and the genre set, joined
    /// all-or-nothing. Either failure discards any partial result.
    pub async fn load(&self) {
        self.tx.send_modify(|s| s.phase = Phase::Loading);
        match tokio::try_join!(self.api.fetch_popular(1), self.api.fetch_genres()) {
            Ok((page, genres)) => {
                info!(
                    "Catalog loaded: {} movies, {} genres",
                    page.results.len(),
                    genres.len()
                );
                let mut movies = self.movies.lock().expect("catalog state poisoned");
                *movies = page.results;
                self.tx.send_modify(|s| {
                    s.phase = Phase::Ready;
                    s.genres = genres;
                    s.visible = derive_visible(&movies, s.genre_filter, s.sort_key);
                });
            }
            Err(e) => {
                warn!("Catalog load failed: {e:#}");
                self.tx.send_modify(|s| {
                    s.phase = Phase::Failed(LOAD_FAILED.to_string());
                    s.genres = Vec::new();
                    s.visible = Vec::new();
                });
            }
        }
    }

    pub fn set_genre_filter(&self, genre_id: Option<i32>) {
        let movies = self.movies.lock().expect("catalog state poisoned");
        self.tx.send_modify(|s| {
            s.genre_filter = genre_id;
            s.visible = derive_visible(&movies, s.genre_filter, s.sort_key);
        });
    }

    pub fn set_sort_key(&self, key: SortKey) {
        let movies = self.movies.lock().expect("catalog state poisoned");
        self.tx.send_modify(|s| {
            s.sort_key = key;
            s.visible = derive_visible(&movies, s.genre_filter, s.sort_key);
        });
    }
}

fn derive_visible(
    movies: &[MovieSummary],
    filter: Option<i32>,
    sort: SortKey,
) -> Vec<MovieSummary> {
    let mut visible: Vec<MovieSummary> = movies
        .iter()
        .filter(|m| match filter {
            Some(genre_id) => m.genre_ids.contains(&genre_id),
            None => true,
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, so equal keys keep fetch order.
    match sort {
        SortKey::Popularity => visible.sort_by(|a, b| b.popularity.total_cmp(&a.popularity)),
        SortKey::ReleaseDate => visible.sort_by(|a, b| date_key(b).cmp(&date_key(a))),
        SortKey::VoteAverage => visible.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average)),
        SortKey::Title => {
            visible.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
    visible
}

// Missing and unparseable dates compare as earliest (None < Some).
fn date_key(movie: &MovieSummary) -> Option<NaiveDate> {
    movie
        .release_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            overview: String::new(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            genre_ids: Vec::new(),
        }
    }

    fn ids(list: &[MovieSummary]) -> Vec<i32> {
        list.iter().map(|m| m.id).collect()
    }

    #[test]
    fn filters_to_movies_containing_the_genre() {
        let mut a = movie(1, "A");
        a.genre_ids = vec![28, 12];
        let mut b = movie(2, "B");
        b.genre_ids = vec![35];
        let visible = derive_visible(&[a, b], Some(28), SortKey::Popularity);
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn no_filter_keeps_everything() {
        let visible = derive_visible(&[movie(1, "A"), movie(2, "B")], None, SortKey::Popularity);
        assert_eq!(ids(&visible), vec![1, 2]);
    }

    #[test]
    fn popularity_sorts_descending() {
        let mut a = movie(1, "A");
        a.popularity = 10.0;
        let mut b = movie(2, "B");
        b.popularity = 99.5;
        let visible = derive_visible(&[a, b], None, SortKey::Popularity);
        assert_eq!(ids(&visible), vec![2, 1]);
    }

    #[test]
    fn rating_sort_is_non_increasing() {
        let mut a = movie(1, "A");
        a.vote_average = 6.1;
        let mut b = movie(2, "B");
        b.vote_average = 8.7;
        let mut c = movie(3, "C");
        c.vote_average = 7.0;
        let visible = derive_visible(&[a, b, c], None, SortKey::VoteAverage);
        let ratings: Vec<f32> = visible.iter().map(|m| m.vote_average).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn title_sort_is_case_insensitive_ascending() {
        let visible = derive_visible(
            &[movie(1, "zebra"), movie(2, "Apple"), movie(3, "mango")],
            None,
            SortKey::Title,
        );
        assert_eq!(ids(&visible), vec![2, 3, 1]);
    }

    #[test]
    fn release_date_sorts_most_recent_first_with_missing_dates_last() {
        let mut a = movie(1, "A");
        a.release_date = Some("2020-05-01".to_string());
        let mut b = movie(2, "B");
        b.release_date = Some("2024-11-20".to_string());
        let c = movie(3, "C");
        let mut d = movie(4, "D");
        d.release_date = Some("not-a-date".to_string());
        let visible = derive_visible(&[a, b, c, d], None, SortKey::ReleaseDate);
        assert_eq!(ids(&visible), vec![2, 1, 3, 4]);
    }

    #[test]
    fn equal_keys_preserve_fetch_order() {
        let mut a = movie(1, "A");
        a.popularity = 5.0;
        let mut b = movie(2, "B");
        b.popularity = 5.0;
        let mut c = movie(3, "C");
        c.popularity = 5.0;
        let visible = derive_visible(&[a, b, c], None, SortKey::Popularity);
        assert_eq!(ids(&visible), vec![1, 2, 3]);
    }
}
