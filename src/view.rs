/// Lifecycle of a view-state controller. `Failed` carries the message shown
/// at the presentation boundary; nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl Phase {
    pub fn is_ready(&self) -> bool {
        matches!(self, Phase::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Destinations the presentation layer can navigate to. Consumed by the UI,
/// never interpreted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { query: String },
    Detail { movie_id: i32 },
}
