mod ids;
mod media;
mod performer;

pub use ids::{GalleryId, ImageId, PerformerId, SceneId};
pub use media::{Gallery, Image, MediaRecord, Scene};
pub use performer::{Entity, Performer};
