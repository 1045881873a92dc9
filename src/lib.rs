pub mod catalog;
pub mod config;
pub mod detail;
pub mod images;
pub mod models;
pub mod search;
pub mod tmdb;
pub mod view;

pub use catalog::{CatalogController, CatalogSnapshot, SortKey};
pub use config::Config;
pub use detail::{DetailController, DetailSnapshot};
pub use images::ImageResolver;
pub use search::{SearchController, SearchSnapshot};
pub use tmdb::{CatalogApi, TmdbClient};
pub use view::{Phase, Route};
