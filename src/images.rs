/// Served by the presentation layer itself; never a remote request.
pub const PLACEHOLDER: &str = "/placeholder-movie.jpg";

/// Default size tier for posters and profiles.
pub const SIZE_W500: &str = "w500";

/// Maps optional remote image references to fully-qualified asset URLs.
/// Absent references resolve to the local placeholder so the UI never issues
/// a broken request.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base: String,
}

impl ImageResolver {
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            base: image_base.into(),
        }
    }

    pub fn url(&self, path: Option<&str>, size: &str) -> String {
        match path {
            Some(p) if !p.is_empty() => format!("{}/{}{}", self.base, size, p),
            _ => PLACEHOLDER.to_string(),
        }
    }

    pub fn url_w500(&self, path: Option<&str>) -> String {
        self.url(path, SIZE_W500)
    }
}
