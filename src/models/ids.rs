use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a typed wrapper around a database row id.
///
/// Each id type is distinct so a scene id can never be passed where a
/// performer id is expected.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new id.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying id value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Unique identifier for a performer.
    PerformerId
);

row_id!(
    /// Unique identifier for a scene.
    SceneId
);

row_id!(
    /// Unique identifier for an image.
    ImageId
);

row_id!(
    /// Unique identifier for a gallery.
    GalleryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performer_id_serializes_as_raw_integer() {
        let id = PerformerId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: PerformerId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn display_prints_raw_value() {
        assert_eq!(SceneId::new(7).to_string(), "7");
        assert_eq!(GalleryId::new(-1).to_string(), "-1");
    }

    #[test]
    fn ids_are_not_interchangeable() {
        // These lines would fail to compile:
        // let scene_id: SceneId = ImageId::new(1);
        // let performer_id: PerformerId = GalleryId::new(1);

        let scene_id = SceneId::new(1);
        let image_id = ImageId::new(1);

        assert_eq!(scene_id.get(), image_id.get());
    }
}
