use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::{GalleryId, ImageId, SceneId};

/// A media record addressable by filesystem path.
///
/// Scenes, images and galleries share this shape so the tagging applier can
/// treat them uniformly.
pub trait MediaRecord {
    /// Identifier type handed to relation writers.
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Human-readable kind label used in log lines and errors.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn path(&self) -> &str;

    /// Title if one is set, otherwise the path.
    fn display_name(&self) -> &str;
}

macro_rules! media_record {
    ($(#[$meta:meta])* $name:ident, $id:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            id: $id,
            path: String,
            title: Option<String>,
        }

        impl $name {
            /// Creates a record from its stored columns.
            pub fn new(id: $id, path: impl Into<String>, title: Option<String>) -> Self {
                Self {
                    id,
                    path: path.into(),
                    title,
                }
            }

            pub fn id(&self) -> $id {
                self.id
            }

            pub fn path(&self) -> &str {
                &self.path
            }

            pub fn title(&self) -> Option<&str> {
                self.title.as_deref()
            }
        }

        impl MediaRecord for $name {
            type Id = $id;

            const KIND: &'static str = $kind;

            fn id(&self) -> $id {
                self.id
            }

            fn path(&self) -> &str {
                &self.path
            }

            fn display_name(&self) -> &str {
                self.title
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or(&self.path)
            }
        }
    };
}

media_record!(
    /// A video file in the catalog.
    Scene,
    SceneId,
    "scene"
);

media_record!(
    /// A still image in the catalog.
    Image,
    ImageId,
    "image"
);

media_record!(
    /// A folder or archive of images in the catalog.
    Gallery,
    GalleryId,
    "gallery"
);
