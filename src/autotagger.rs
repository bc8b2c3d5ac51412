//! Path-based performer auto-tagging.
//!
//! A performer is linked to a scene, image or gallery when one of its names
//! appears in the record's file path. Names are first classified as
//! *qualified* (at least two words, the first two longer than one
//! character) or not; with `only_qualified` set, unqualified names such as
//! "Cher" or "J Li" never produce a match.
//!
//! # Examples
//!
//! ## Finding performers mentioned in a path
//!
//! ```
//! use autotag::autotagger::get_matching_performers;
//! use autotag::{CatalogService, Database};
//!
//! # fn main() -> anyhow::Result<()> {
//! let service = CatalogService::new(Database::in_memory()?);
//! service.create_performer("Jane Doe", Some("Janie"))?;
//! service.create_performer("Cher", None)?;
//!
//! let found = get_matching_performers("/media/jane_doe/cher.mp4", &service, true)?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name(), Some("Jane Doe"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Tagging scenes
//!
//! ```
//! use autotag::autotagger::performer_scenes;
//! use autotag::{CatalogService, Database};
//!
//! # fn main() -> anyhow::Result<()> {
//! let service = CatalogService::new(Database::in_memory()?);
//! let jane = service.create_performer("Jane Doe", None)?;
//! service.create_scene("/media/Jane.Doe.Beach.mp4", None)?;
//! service.create_scene("/media/other.mp4", None)?;
//!
//! let summary = performer_scenes(&jane, &[], &service, true)?;
//! assert_eq!(summary.added, 1);
//!
//! // Running again writes nothing new.
//! let summary = performer_scenes(&jane, &[], &service, true)?;
//! assert_eq!(summary.added, 0);
//! # Ok(())
//! # }
//! ```

mod error;
mod matcher;
mod normalizer;
mod path_words;
mod performer;
mod tagger;

pub use error::{AutotagError, RelationFailure};
pub use matcher::{
    CompiledNames, PerformerReader, entity_matches_path, find_matching_entities,
    get_matching_performers,
};
pub use normalizer::{ClassifiedName, NAME_TRIM_CHARS, NameNormalizer};
pub use path_words::{NamePattern, get_path_words, name_matches_path};
pub use performer::{
    PerformerRelationWriter, performer_galleries, performer_images, performer_scenes,
};
pub use tagger::{MediaReader, TagSummary, Tagger};
