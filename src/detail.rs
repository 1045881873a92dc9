use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{CastMember, MovieDetail, Video};
use crate::tmdb::CatalogApi;
use crate::view::Phase;

pub const TOP_CAST_LIMIT: usize = 10;

const TRAILER_SITE: &str = "YouTube";
const TRAILER_KIND: &str = "Trailer";
const DETAIL_FAILED: &str = "Failed to fetch movie details";
const INVALID_ID: &str = "Invalid movie id";

#[derive(Debug, Clone, Default)]
pub struct DetailSnapshot {
    pub phase: Phase,
    pub detail: Option<MovieDetail>,
    /// First entries of the credits list, at most [`TOP_CAST_LIMIT`].
    pub top_cast: Vec<CastMember>,
    /// First YouTube trailer; `None` is a normal outcome, not an error.
    pub trailer: Option<Video>,
}

/// Fetches everything one detail view needs, all-or-nothing: rendering the
/// detail without cast/trailer would silently imply "none exist".
pub struct DetailController {
    api: Arc<dyn CatalogApi>,
    generation: AtomicU64,
    tx: watch::Sender<DetailSnapshot>,
}

impl DetailController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (tx, _) = watch::channel(DetailSnapshot::default());
        Self {
            api,
            generation: AtomicU64::new(0),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.tx.borrow().clone()
    }

    /// Loads one movie. Calling again with a new identifier supersedes any
    /// in-flight load; the older response is discarded at commit time.
    pub async fn load(&self, movie_id: i32) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if movie_id < 1 {
            warn!("Rejecting detail load for invalid movie id {movie_id}");
            self.tx.send_modify(|s| {
                *s = DetailSnapshot {
                    phase: Phase::Failed(INVALID_ID.to_string()),
                    ..DetailSnapshot::default()
                };
            });
            return;
        }

        // Prior contents are discarded up front so navigation never shows the
        // previous movie while the new fetch is in flight.
        self.tx.send_modify(|s| {
            *s = DetailSnapshot {
                phase: Phase::Loading,
                ..DetailSnapshot::default()
            };
        });

        let outcome = tokio::try_join!(
            self.api.fetch_detail(movie_id),
            self.api.fetch_credits(movie_id),
            self.api.fetch_videos(movie_id),
        );

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale detail response for movie {movie_id}");
            return;
        }

        match outcome {
            Ok((detail, credits, videos)) => {
                info!("Loaded detail for '{}' ({})", detail.title, detail.id);
                let top_cast: Vec<CastMember> =
                    credits.into_iter().take(TOP_CAST_LIMIT).collect();
                let trailer = select_trailer(&videos);
                self.tx.send_modify(|s| {
                    *s = DetailSnapshot {
                        phase: Phase::Ready,
                        detail: Some(detail),
                        top_cast,
                        trailer,
                    };
                });
            }
            Err(e) => {
                warn!("Detail load for movie {movie_id} failed: {e:#}");
                self.tx.send_modify(|s| {
                    *s = DetailSnapshot {
                        phase: Phase::Failed(DETAIL_FAILED.to_string()),
                        ..DetailSnapshot::default()
                    };
                });
            }
        }
    }
}

fn select_trailer(videos: &[Video]) -> Option<Video> {
    videos
        .iter()
        .find(|v| v.site.eq_ignore_ascii_case(TRAILER_SITE) && v.kind == TRAILER_KIND)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, site: &str, kind: &str) -> Video {
        Video {
            id: id.to_string(),
            key: format!("key-{id}"),
            site: site.to_string(),
            kind: kind.to_string(),
            name: String::new(),
        }
    }

    #[test]
    fn picks_the_first_youtube_trailer() {
        let videos = vec![
            video("1", "Vimeo", "Trailer"),
            video("2", "YouTube", "Teaser"),
            video("3", "YouTube", "Trailer"),
            video("4", "YouTube", "Trailer"),
        ];
        assert_eq!(select_trailer(&videos).map(|v| v.id), Some("3".to_string()));
    }

    #[test]
    fn no_matching_video_is_not_an_error() {
        let videos = vec![video("1", "Vimeo", "Trailer")];
        assert!(select_trailer(&videos).is_none());
        assert!(select_trailer(&[]).is_none());
    }
}
