pub mod autotagger;
pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod utils;

pub use config::AutotagConfig;
pub use db::Database;
pub use models::{
    Entity, Gallery, GalleryId, Image, ImageId, MediaRecord, Performer, PerformerId, Scene,
    SceneId,
};
pub use service::CatalogService;
