use serde::Deserialize;

/// Paging envelope used by every list/search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paged<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Paged<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// One movie as returned by the list/search endpoints. Genre membership is
/// carried as raw ids and resolved against the separately fetched genre set.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    pub id: i32,
    pub name: String,
}

/// Superset of [`MovieSummary`] returned by the detail endpoint. Budget and
/// revenue of 0 mean "not reported".
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: i32,
    pub title: String,
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub original_language: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl MovieSummary {
    pub fn rating_display(&self) -> String {
        format_rating(self.vote_average)
    }
}

impl MovieDetail {
    pub fn rating_display(&self) -> String {
        format_rating(self.vote_average)
    }

    pub fn release_year(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .and_then(extract_year)
            .map(|y| y.to_string())
    }

    /// Runtime as "2h 14m"; `None` when the service did not report one.
    pub fn runtime_display(&self) -> Option<String> {
        self.runtime.map(|m| format!("{}h {}m", m / 60, m % 60))
    }
}

fn format_rating(rating: f32) -> String {
    format!("{:.1}", rating.clamp(0.0, 10.0))
}

fn extract_year(date: &str) -> Option<&str> {
    date.split('-').next().filter(|y| !y.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> MovieDetail {
        MovieDetail {
            id: 1,
            title: "Example".to_string(),
            tagline: None,
            overview: String::new(),
            release_date: Some("1999-10-15".to_string()),
            runtime: Some(134),
            poster_path: None,
            backdrop_path: None,
            vote_average: 8.433,
            vote_count: 25000,
            popularity: 61.4,
            genres: vec![],
            budget: 0,
            revenue: 0,
            production_companies: vec![],
            original_language: "en".to_string(),
            status: None,
        }
    }

    #[test]
    fn rating_renders_one_decimal() {
        assert_eq!(detail().rating_display(), "8.4");
    }

    #[test]
    fn rating_is_clamped_to_valid_range() {
        let mut d = detail();
        d.vote_average = -3.0;
        assert_eq!(d.rating_display(), "0.0");
        d.vote_average = 11.2;
        assert_eq!(d.rating_display(), "10.0");
    }

    #[test]
    fn release_year_comes_from_the_date_prefix() {
        assert_eq!(detail().release_year().as_deref(), Some("1999"));
        let mut d = detail();
        d.release_date = None;
        assert_eq!(d.release_year(), None);
        d.release_date = Some(String::new());
        assert_eq!(d.release_year(), None);
    }

    #[test]
    fn runtime_formats_hours_and_minutes() {
        assert_eq!(detail().runtime_display().as_deref(), Some("2h 14m"));
        let mut d = detail();
        d.runtime = None;
        assert_eq!(d.runtime_display(), None);
    }
}
